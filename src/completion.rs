//! Completion signal plumbing and the join-then-timeout correlator for iframe renewals.
//!
//! A [`CompletionReceiver`] yields at most one value and only sees completions published after it
//! was subscribed, so a retried attempt never picks up an emission buffered for an earlier one.

// crates.io
use tokio::sync::oneshot;
// self
use crate::{_prelude::*, callback::CallbackContext, error::StrategyError};

/// Source of "silent renewal completed" notifications.
pub trait CompletionSource
where
	Self: Send + Sync,
{
	/// Registers interest in the next completion.
	fn subscribe(&self) -> CompletionReceiver;
}

/// Single-consumption handle for the next completion.
#[derive(Debug)]
pub struct CompletionReceiver(oneshot::Receiver<Option<CallbackContext>>);
impl CompletionReceiver {
	/// Waits for the completion this receiver was subscribed to.
	pub async fn recv(self) -> Result<Option<CallbackContext>> {
		self.0.await.map_err(|_| Error::CompletionClosed)
	}
}

/// In-process [`CompletionSource`] fed by the silent-renew callback handler.
#[derive(Debug, Default)]
pub struct CompletionHub {
	waiters: Mutex<Vec<oneshot::Sender<Option<CallbackContext>>>>,
}
impl CompletionHub {
	/// Creates a hub without subscribers.
	pub fn new() -> Self {
		Self::default()
	}

	/// Publishes a completion to every current subscriber and returns how many received it.
	///
	/// Subscribers registered afterwards wait for the next completion.
	pub fn complete(&self, context: Option<CallbackContext>) -> usize {
		let waiters = std::mem::take(&mut *self.waiters.lock());

		waiters.into_iter().map(|tx| tx.send(context.clone()).is_ok()).filter(|sent| *sent).count()
	}

	/// Returns the number of subscribers still waiting.
	pub fn pending(&self) -> usize {
		self.waiters.lock().iter().filter(|tx| !tx.is_closed()).count()
	}
}
impl CompletionSource for CompletionHub {
	fn subscribe(&self) -> CompletionReceiver {
		let (tx, rx) = oneshot::channel();
		let mut waiters = self.waiters.lock();

		waiters.retain(|waiter| !waiter.is_closed());
		waiters.push(tx);

		CompletionReceiver(rx)
	}
}

/// Joins an iframe dispatch with its completion signal under one overall bound.
///
/// Both sides must settle; a dispatch failure or a closed signal short-circuits the join. If the
/// bound elapses first the wait fails with [`Error::Timeout`].
pub async fn correlate<D>(
	dispatch: D,
	completion: CompletionReceiver,
	timeout: Duration,
) -> Result<Option<CallbackContext>>
where
	D: Future<Output = Result<()>>,
{
	let joined = async { tokio::try_join!(dispatch, completion.recv()) };

	match tokio::time::timeout(timeout, joined).await {
		Ok(Ok(((), context))) => Ok(context),
		Ok(Err(err)) => Err(err),
		Err(_) => Err(Error::Timeout { timeout }),
	}
}

/// Lifts a strategy result into the orchestrator error space.
pub(crate) fn dispatch_result<T>(result: Result<T, StrategyError>) -> Result<T> {
	result.map_err(Error::from)
}

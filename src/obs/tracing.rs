// self
use crate::{_prelude::*, obs::RenewalPath};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRenewal<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRenewal<F> = F;

/// Span wrapper used around each renewal call.
#[derive(Clone, Debug)]
pub struct RenewalSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RenewalSpan {
	/// Creates a new span tagged with the provided path + stage.
	pub fn new(path: RenewalPath, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::debug_span!("session_refresh.renewal", path = path.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (path, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRenewal<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

pub(crate) fn guard_checked(running: bool) {
	#[cfg(feature = "tracing")]
	tracing::debug!(running, "Checked the silent renew guard.");
	#[cfg(not(feature = "tracing"))]
	let _ = running;
}

pub(crate) fn missing_discovery_endpoint() {
	#[cfg(feature = "tracing")]
	tracing::error!("No discovery endpoint is configured; skipping renewal.");
}

pub(crate) fn timeout_retry(attempt: u32, delay: Duration) {
	#[cfg(feature = "tracing")]
	tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, "Silent renewal timed out; retrying.");
	#[cfg(not(feature = "tracing"))]
	let _ = (attempt, delay);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_passes_output_through() {
		let span = RenewalSpan::new(RenewalPath::Iframe, "instrument_passes_output_through");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[test]
	fn event_hooks_accept_any_input() {
		guard_checked(true);
		missing_discovery_endpoint();
		timeout_retry(1, Duration::from_secs(1));
	}
}

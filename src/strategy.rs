//! Renewal strategy contracts.
//!
//! The orchestrator never performs a token exchange or embeds an iframe itself; it sequences
//! calls to these hooks. Both strategies make a single attempt per call and leave retry policy to
//! the orchestrator.

// self
use crate::{_prelude::*, callback::CallbackContext, config::CustomParams, error::StrategyError};

/// Boxed future returned by renewal strategies.
pub type RenewalFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StrategyError>> + 'a + Send>>;

/// Renews the session by exchanging the stored refresh token.
pub trait RefreshTokenRenewal
where
	Self: Send + Sync,
{
	/// Performs one refresh-token exchange with the merged custom parameters.
	///
	/// The returned context is informational; callers read the resulting tokens from session state.
	fn renew<'a>(&'a self, params: &'a CustomParams) -> RenewalFuture<'a, Option<CallbackContext>>;
}

/// Starts a silent renewal inside a hidden iframe.
pub trait IframeRenewal
where
	Self: Send + Sync,
{
	/// Dispatches the iframe navigation.
	///
	/// The future settles once the navigation is issued. The renewal result arrives later through
	/// the completion signal.
	fn renew<'a>(&'a self, params: Option<&'a CustomParams>) -> RenewalFuture<'a, ()>;
}

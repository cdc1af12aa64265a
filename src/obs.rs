//! Optional observability hooks for renewal attempts.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to run each renewal inside a `session_refresh.renewal` span (fields `path`
//!   and `stage`) and to emit debug events for guard checks and timeout retries.
//! - Enable `metrics` to increment the `session_refresh_renewal_total` counter for every
//!   attempt/success/no-session/failure/timeout-retry, labeled by `path` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Renewal paths the orchestrator can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenewalPath {
	/// Code flow renewing through a refresh-token exchange.
	RefreshToken,
	/// Silent renewal through a hidden iframe.
	Iframe,
}
impl RenewalPath {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RenewalPath::RefreshToken => "refresh_token",
			RenewalPath::Iframe => "iframe",
		}
	}
}
impl Display for RenewalPath {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Step labels recorded while a renewal progresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenewalStep {
	/// Entry to `force_refresh_session`.
	Attempt,
	/// Renewal settled with an authenticated session.
	Success,
	/// Renewal was skipped or left no authenticated session.
	NoSession,
	/// Failure propagated back to the caller.
	Failure,
	/// A timed-out iframe attempt is about to be retried.
	TimeoutRetry,
}
impl RenewalStep {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RenewalStep::Attempt => "attempt",
			RenewalStep::Success => "success",
			RenewalStep::NoSession => "no_session",
			RenewalStep::Failure => "failure",
			RenewalStep::TimeoutRetry => "timeout_retry",
		}
	}
}
impl Display for RenewalStep {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

//! Timeout retry controller for the iframe renewal path.
//!
//! Only [`Error::Timeout`] is retried. Each retry clears the [`ConcurrencyGuard`] and then waits
//! `attempt * scaling` before invoking the operation again from scratch. Any other failure, and the
//! timeout that follows the last permitted retry, propagates unchanged.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	guard::ConcurrencyGuard,
	obs::{self, RenewalPath, RenewalStep},
	refresher::RenewalMetrics,
};

/// Upper bound on timeout retries for a single renewal call.
pub const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Bounded linear backoff applied to timed-out iframe renewals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
	/// Maximum number of retries after the first timeout.
	pub max_attempts: u32,
	/// Backoff unit; the n-th retry waits `n * scaling_in_millis`.
	pub scaling_in_millis: u64,
}
impl RetryPolicy {
	const DEFAULT_SCALING_IN_MILLIS: u64 = 1_000;

	/// Decides whether the `failure`-th consecutive failure (1-based) earns another attempt.
	pub fn should_retry(&self, err: &Error, failure: u32) -> bool {
		err.is_timeout() && failure <= self.max_attempts
	}

	/// Backoff to wait before the retry that follows the `failure`-th failure.
	pub fn delay_for(&self, failure: u32) -> Duration {
		Duration::from_millis(self.scaling_in_millis.saturating_mul(u64::from(failure)))
	}

	/// Rejects a zero backoff scale.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.scaling_in_millis == 0 { Err(ConfigError::ZeroRetryScaling) } else { Ok(()) }
	}
}
impl Default for RetryPolicy {
	fn default() -> Self {
		Self {
			max_attempts: MAX_RETRY_ATTEMPTS,
			scaling_in_millis: Self::DEFAULT_SCALING_IN_MILLIS,
		}
	}
}

/// Wraps a timeout-bounded operation with the [`RetryPolicy`].
///
/// Timed-out operations are expected to leave the guard set; the controller clears it before the
/// backoff (and before surfacing an exhausted timeout) so no other caller can slip in between.
#[derive(Debug)]
pub struct TimeoutRetry<'a> {
	policy: &'a RetryPolicy,
	guard: &'a ConcurrencyGuard,
	metrics: Option<&'a RenewalMetrics>,
}
impl<'a> TimeoutRetry<'a> {
	/// Creates a controller for the provided policy and guard.
	///
	/// The policy is not validated here. A policy that fails [`RetryPolicy::validate`] retries
	/// without backoff, so the operation should validate it before doing any work.
	pub fn new(policy: &'a RetryPolicy, guard: &'a ConcurrencyGuard) -> Self {
		Self { policy, guard, metrics: None }
	}

	/// Records retries on the provided counters.
	pub fn with_metrics(mut self, metrics: &'a RenewalMetrics) -> Self {
		self.metrics = Some(metrics);

		self
	}

	/// Runs `operation` until it succeeds, fails with a non-timeout error, or exhausts the policy.
	///
	/// The operation receives the 1-based attempt number.
	pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T>
	where
		F: FnMut(u32) -> Fut,
		Fut: Future<Output = Result<T>>,
	{
		let mut failures = 0;

		loop {
			let err = match operation(failures + 1).await {
				Ok(value) => return Ok(value),
				Err(err) => err,
			};

			failures += 1;

			if err.is_timeout() {
				self.guard.reset_running();
			}
			if !self.policy.should_retry(&err, failures) {
				return Err(err);
			}

			let delay = self.policy.delay_for(failures);

			obs::timeout_retry(failures, delay);
			obs::record_renewal_step(RenewalPath::Iframe, RenewalStep::TimeoutRetry);

			if let Some(metrics) = self.metrics {
				metrics.record_timeout_retry();
			}

			tokio::time::sleep(delay).await;
		}
	}
}

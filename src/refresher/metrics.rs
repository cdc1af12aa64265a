// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for renewal calls.
#[derive(Debug, Default)]
pub struct RenewalMetrics {
	attempts: AtomicU64,
	success: AtomicU64,
	no_session: AtomicU64,
	failure: AtomicU64,
	timeout_retries: AtomicU64,
}
impl RenewalMetrics {
	/// Returns the total number of renewal calls.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of calls that ended with an authenticated session.
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Returns the number of calls that were skipped or left no valid session.
	pub fn no_sessions(&self) -> u64 {
		self.no_session.load(Ordering::Relaxed)
	}

	/// Returns the number of calls that surfaced an error.
	pub fn failures(&self) -> u64 {
		self.failure.load(Ordering::Relaxed)
	}

	/// Returns the number of timed-out iframe attempts that were retried.
	pub fn timeout_retries(&self) -> u64 {
		self.timeout_retries.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.success.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_no_session(&self) {
		self.no_session.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failure.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_timeout_retry(&self) {
		self.timeout_retries.fetch_add(1, Ordering::Relaxed);
	}
}

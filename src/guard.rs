//! Process-wide "renewal in progress" flag shared by the orchestrator and its collaborators.
//!
//! None of the operations here suspend. Reading and setting the flag happen in one
//! [`ConcurrencyGuard::try_claim`] call, so two attempts can never both observe "not running"
//! and both dispatch.

// std
use std::sync::atomic::{AtomicBool, Ordering};
// self
use crate::_prelude::*;

/// Shared renewal-in-progress flag.
///
/// Clones share the same underlying cell, so the guard can be handed to collaborators (for example
/// a silent-renew callback handler) that clear it on their own.
#[derive(Clone, Debug, Default)]
pub struct ConcurrencyGuard(Arc<AtomicBool>);
impl ConcurrencyGuard {
	/// Creates a guard in the cleared state.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns `true` while a renewal strategy is dispatched.
	pub fn is_running(&self) -> bool {
		self.0.load(Ordering::Acquire)
	}

	/// Marks a renewal as running.
	pub fn set_running(&self) {
		self.0.store(true, Ordering::Release);
	}

	/// Clears the running flag.
	pub fn reset_running(&self) {
		self.0.store(false, Ordering::Release);
	}

	/// Atomically sets the flag if it is clear.
	///
	/// Returns `None` when another renewal already holds the guard.
	pub fn try_claim(&self) -> Option<GuardClaim> {
		self.0
			.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
			.ok()
			.map(|_| GuardClaim { guard: self.clone(), released: false })
	}
}

/// Ownership of a set [`ConcurrencyGuard`]; clears the flag when released or dropped.
#[derive(Debug)]
pub struct GuardClaim {
	guard: ConcurrencyGuard,
	released: bool,
}
impl GuardClaim {
	/// Clears the guard now.
	pub fn release(mut self) {
		self.clear();
	}

	/// Gives up ownership but leaves the guard set; whoever clears it next takes over.
	pub fn keep(mut self) {
		self.released = true;
	}

	fn clear(&mut self) {
		if !self.released {
			self.released = true;
			self.guard.reset_running();
		}
	}
}
impl Drop for GuardClaim {
	fn drop(&mut self) {
		self.clear();
	}
}

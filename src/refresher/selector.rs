//! Admission step shared by both renewal paths.

// self
use crate::{
	_prelude::*,
	config::RefreshConfig,
	guard::GuardClaim,
	obs,
	refresher::SessionRefresher,
};

/// Result of checking whether a renewal may be dispatched.
pub(super) enum Admission {
	/// Another renewal holds the guard; nothing was dispatched.
	Skipped,
	/// The guard is now held by this attempt.
	Admitted {
		/// Claim released once the attempt settles.
		claim: GuardClaim,
		/// Discovery endpoint to confirm before dispatching.
		endpoint: Url,
	},
}

impl SessionRefresher {
	/// Checks the guard, validates the discovery endpoint, and claims the guard.
	///
	/// Nothing in here suspends, so the check and the claim cannot interleave with another
	/// attempt. A missing endpoint fails fast and leaves the guard untouched.
	pub(super) fn admit(&self, config: &RefreshConfig) -> Result<Admission> {
		let running = self.guard.is_running();

		obs::guard_checked(running);

		if running {
			return Ok(Admission::Skipped);
		}

		let endpoint = config.require_discovery_endpoint().inspect_err(|_| {
			obs::missing_discovery_endpoint();
		})?;

		Ok(match self.guard.try_claim() {
			Some(claim) => Admission::Admitted { claim, endpoint: endpoint.clone() },
			None => Admission::Skipped,
		})
	}

	/// Fetches or confirms the discovery document before any strategy runs.
	pub(super) async fn confirm_discovery(&self, endpoint: &Url) -> Result<()> {
		self.discovery.fetch_metadata(endpoint).await?;

		Ok(())
	}
}

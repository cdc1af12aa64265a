//! Session renewal orchestrator.
//!
//! [`SessionRefresher::force_refresh_session`] claims the [`ConcurrencyGuard`] and confirms
//! discovery metadata before dispatching a strategy. The refresh-token strategy runs once with no
//! retries. The iframe strategy is joined with the completion signal under the silent renew
//! timeout and wrapped in the timeout retry controller. Once the renewal settles, the result is
//! projected from session state into a token pair or `None`.

mod iframe;
mod metrics;
mod project;
mod refresh_token;
mod selector;

pub use metrics::RenewalMetrics;

// self
use crate::{
	_prelude::*,
	completion::CompletionSource,
	config::{ConfigurationReader, CustomParams, RenewalRequest},
	discovery::DiscoveryService,
	flow::FlowClassifier,
	guard::ConcurrencyGuard,
	obs::{self, RenewalPath, RenewalSpan, RenewalStep},
	session::{SessionState, SessionTokens},
	strategy::{IframeRenewal, RefreshTokenRenewal},
};

/// Settled result of one externally visible renewal call.
///
/// Failures travel on the `Err` side of [`Result`]; this enum only distinguishes a renewed
/// session from "no session".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenewalOutcome {
	/// The session is authenticated after the renewal.
	Renewed(SessionTokens),
	/// The renewal was skipped (guard held) or left no valid session.
	NoSession,
}
impl RenewalOutcome {
	/// Projects the outcome into the caller-facing token pair.
	pub fn into_tokens(self) -> Option<SessionTokens> {
		match self {
			Self::Renewed(tokens) => Some(tokens),
			Self::NoSession => None,
		}
	}

	fn step(&self) -> RenewalStep {
		match self {
			Self::Renewed(_) => RenewalStep::Success,
			Self::NoSession => RenewalStep::NoSession,
		}
	}
}

/// Coordinates session renewals against injected collaborators.
#[derive(Clone)]
pub struct SessionRefresher {
	/// Configuration read once per renewal call.
	pub config: Arc<dyn ConfigurationReader>,
	/// Decides between refresh-token and iframe renewal.
	pub flow: Arc<dyn FlowClassifier>,
	/// Current session validity and tokens.
	pub session: Arc<dyn SessionState>,
	/// Discovery metadata fetcher.
	pub discovery: Arc<dyn DiscoveryService>,
	/// Refresh-token renewal strategy.
	pub refresh_token: Arc<dyn RefreshTokenRenewal>,
	/// Iframe renewal strategy.
	pub iframe: Arc<dyn IframeRenewal>,
	/// Source of iframe completion notifications.
	pub completion: Arc<dyn CompletionSource>,
	/// Renewal-in-progress flag shared with collaborators.
	pub guard: ConcurrencyGuard,
	/// Shared counters for renewal outcomes.
	pub metrics: Arc<RenewalMetrics>,
}
impl SessionRefresher {
	/// Creates an orchestrator with a fresh [`ConcurrencyGuard`].
	pub fn new(
		config: Arc<dyn ConfigurationReader>,
		flow: Arc<dyn FlowClassifier>,
		session: Arc<dyn SessionState>,
		discovery: Arc<dyn DiscoveryService>,
		refresh_token: Arc<dyn RefreshTokenRenewal>,
		iframe: Arc<dyn IframeRenewal>,
		completion: Arc<dyn CompletionSource>,
	) -> Self {
		Self {
			config,
			flow,
			session,
			discovery,
			refresh_token,
			iframe,
			completion,
			guard: ConcurrencyGuard::new(),
			metrics: Default::default(),
		}
	}

	/// Shares an existing guard, e.g. one the silent-renew callback handler also clears.
	pub fn with_guard(mut self, guard: ConcurrencyGuard) -> Self {
		self.guard = guard;

		self
	}

	/// Renews the session and returns the resulting token pair.
	///
	/// Resolves to `Ok(None)` when another renewal is already running or when the renewal left no
	/// authenticated session. Configuration problems, strategy failures, discovery failures, and
	/// exhausted timeouts surface as errors.
	pub async fn force_refresh_session(
		&self,
		extra_params: Option<CustomParams>,
	) -> Result<Option<SessionTokens>> {
		self.renew(RenewalRequest::from(extra_params)).await.map(RenewalOutcome::into_tokens)
	}

	/// Runs one renewal call and reports the settled outcome.
	pub async fn renew(&self, request: RenewalRequest) -> Result<RenewalOutcome> {
		let config = self.config.configuration();
		let path = if self.flow.is_refresh_token_flow() {
			RenewalPath::RefreshToken
		} else {
			RenewalPath::Iframe
		};
		let span = RenewalSpan::new(path, "force_refresh_session");

		obs::record_renewal_step(path, RenewalStep::Attempt);
		self.metrics.record_attempt();

		let result = span
			.instrument(async {
				match path {
					RenewalPath::RefreshToken =>
						self.renew_with_refresh_token(&config, &request).await,
					RenewalPath::Iframe => self.renew_with_iframe(&config, &request).await,
				}
			})
			.await;

		match &result {
			Ok(outcome) => {
				let step = outcome.step();

				obs::record_renewal_step(path, step);

				if step == RenewalStep::Success {
					self.metrics.record_success();
				} else {
					self.metrics.record_no_session();
				}
			},
			Err(_) => {
				obs::record_renewal_step(path, RenewalStep::Failure);
				self.metrics.record_failure();
			},
		}

		result
	}
}
impl Debug for SessionRefresher {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SessionRefresher")
			.field("guard", &self.guard)
			.field("metrics", &self.metrics)
			.finish()
	}
}

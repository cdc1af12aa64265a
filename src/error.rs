//! Orchestrator-level error types shared across the renewal paths and collaborators.

// self
use crate::_prelude::*;

/// Orchestrator-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error surfaced by [`force_refresh_session`](crate::refresher::SessionRefresher::force_refresh_session).
///
/// "No session" is deliberately absent: a skipped or unauthenticated renewal resolves to
/// `Ok(None)`, never to an error.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; no renewal was attempted.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The renewal strategy itself failed.
	#[error(transparent)]
	Strategy(#[from] StrategyError),
	/// Discovery metadata could not be fetched.
	#[error(transparent)]
	Discovery(#[from] DiscoveryError),

	/// The joined iframe wait did not settle within the silent renew timeout.
	#[error("Silent renewal did not complete within {timeout:?}.")]
	Timeout {
		/// Bound applied to the joined wait.
		timeout: Duration,
	},
	/// The completion signal source went away while an attempt was waiting on it.
	#[error("Completion signal source closed before the renewal completed.")]
	CompletionClosed,
}
impl Error {
	/// Returns `true` for the timeout condition, the only failure the retry controller retries.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Self::Timeout { .. })
	}
}

/// Configuration failures detected before any renewal work starts.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ConfigError {
	/// No well-known discovery endpoint is configured.
	#[error("No discovery endpoint is configured.")]
	MissingDiscoveryEndpoint,
	/// A zero silent renew timeout would expire every iframe attempt immediately.
	#[error("The silent renew timeout must be at least one second.")]
	ZeroSilentRenewTimeout,
	/// A retry policy with a zero backoff scale would hammer the provider.
	#[error("The retry backoff scale must be positive.")]
	ZeroRetryScaling,
}

/// Failure reported by a renewal strategy (refresh-token exchange or iframe dispatch).
#[derive(Debug, ThisError)]
#[error("Renewal strategy `{strategy}` failed: {message}.")]
pub struct StrategyError {
	/// Label of the strategy that failed.
	pub strategy: &'static str,
	/// Human-readable failure summary.
	pub message: String,
	/// Underlying cause, when the strategy has one.
	#[source]
	pub source: Option<BoxError>,
}
impl StrategyError {
	/// Builds a strategy failure without an underlying cause.
	pub fn new(strategy: &'static str, message: impl Into<String>) -> Self {
		Self { strategy, message: message.into(), source: None }
	}

	/// Attaches the underlying cause.
	pub fn with_source(mut self, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		self.source = Some(Box::new(src));

		self
	}
}

/// Failure reported by a discovery service.
#[derive(Debug, ThisError)]
pub enum DiscoveryError {
	/// The provider answered, but not with a usable discovery document.
	#[error("Discovery endpoint `{endpoint}` returned an unusable document: {message}.")]
	InvalidDocument {
		/// Endpoint that was queried.
		endpoint: String,
		/// Human-readable failure summary.
		message: String,
	},
	/// The discovery request never produced a response.
	#[error("Discovery endpoint `{endpoint}` could not be reached.")]
	Unreachable {
		/// Endpoint that was queried.
		endpoint: String,
		/// Transport-specific failure.
		#[source]
		source: BoxError,
	},
}
impl DiscoveryError {
	/// Wraps a transport failure for the provided endpoint.
	pub fn unreachable(
		endpoint: &Url,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Unreachable { endpoint: endpoint.to_string(), source: Box::new(src) }
	}
}

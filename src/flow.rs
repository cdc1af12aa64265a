//! Flow classification: which renewal strategy applies to the active authentication flow.

// self
use crate::{_prelude::*, config::RefreshConfig};

/// Capability query answered by whoever knows the active flow.
pub trait FlowClassifier
where
	Self: Send + Sync,
{
	/// Returns `true` when the session renews through a refresh-token exchange.
	fn is_refresh_token_flow(&self) -> bool;
}

/// Authentication flow kinds distinguished by the orchestrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthFlow {
	/// Authorization code flow renewed through the silent-renew iframe.
	Code,
	/// Authorization code flow renewed through refresh tokens.
	CodeWithRefreshTokens,
	/// Implicit flow (`id_token` / `id_token token`), always renewed through the iframe.
	Implicit,
}
impl AuthFlow {
	/// Classifies the flow from the configured response type and refresh-token switch.
	pub fn from_settings(response_type: &str, use_refresh_token: bool) -> Self {
		match (response_type.trim(), use_refresh_token) {
			("code", true) => Self::CodeWithRefreshTokens,
			("code", false) => Self::Code,
			_ => Self::Implicit,
		}
	}
}
impl FlowClassifier for AuthFlow {
	fn is_refresh_token_flow(&self) -> bool {
		matches!(self, Self::CodeWithRefreshTokens)
	}
}
impl FlowClassifier for RefreshConfig {
	fn is_refresh_token_flow(&self) -> bool {
		AuthFlow::from_settings(&self.response_type, self.use_refresh_token).is_refresh_token_flow()
	}
}
impl FlowClassifier for RwLock<RefreshConfig> {
	fn is_refresh_token_flow(&self) -> bool {
		self.read().is_refresh_token_flow()
	}
}

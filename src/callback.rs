//! Outcome payload of a completed iframe renewal.

// self
use crate::{_prelude::*, session::SessionTokens};

/// Authorization result fields returned by the provider.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResult {
	/// Identity token.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id_token: Option<String>,
	/// Access token.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub access_token: Option<String>,
	/// Refresh token, when the provider rotated one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<String>,
	/// Token type (`Bearer`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_type: Option<String>,
	/// Access token lifetime in seconds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expires_in: Option<u64>,
	/// Space-delimited granted scopes.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub scope: Option<String>,
	/// Echoed `state` value.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// Provider session state for session monitoring.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub session_state: Option<String>,
	/// Fields this crate does not model.
	#[serde(flatten)]
	pub extra: BTreeMap<String, serde_json::Value>,
}
impl Debug for AuthResult {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthResult")
			.field("id_token_set", &self.id_token.is_some())
			.field("access_token_set", &self.access_token.is_some())
			.field("refresh_token_set", &self.refresh_token.is_some())
			.field("token_type", &self.token_type)
			.field("expires_in", &self.expires_in)
			.field("scope", &self.scope)
			.finish()
	}
}

/// Context produced once an iframe renewal finishes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CallbackContext {
	/// Authorization code returned to the iframe, for code flows.
	#[serde(default)]
	pub code: Option<String>,
	/// Refresh token handed back with the callback.
	#[serde(default)]
	pub refresh_token: Option<String>,
	/// `state` value from the callback URL.
	#[serde(default)]
	pub state: Option<String>,
	/// Provider session state from the callback URL.
	#[serde(default)]
	pub session_state: Option<String>,
	/// Tokens and metadata from the authorization result.
	#[serde(default)]
	pub auth_result: Option<AuthResult>,
	/// Whether the callback belongs to a renewal rather than an interactive login.
	#[serde(default)]
	pub is_renew_process: bool,
}
impl CallbackContext {
	/// Creates a renewal context carrying the provided authorization result.
	pub fn renewal(auth_result: AuthResult) -> Self {
		Self { auth_result: Some(auth_result), is_renew_process: true, ..Default::default() }
	}

	/// Extracts the identity/access token pair from the authorization result.
	pub fn tokens(&self) -> SessionTokens {
		let result = self.auth_result.as_ref();

		SessionTokens {
			id_token: result.and_then(|r| r.id_token.clone()),
			access_token: result.and_then(|r| r.access_token.clone()),
		}
	}
}

//! Session state contract plus the token pair returned to callers.

// self
use crate::_prelude::*;

/// Identity/access token pair returned by a successful renewal.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokens {
	/// Identity token, when the session has one.
	pub id_token: Option<String>,
	/// Access token, when the session has one.
	pub access_token: Option<String>,
}
impl SessionTokens {
	/// Creates a token pair.
	pub fn new(id_token: Option<String>, access_token: Option<String>) -> Self {
		Self { id_token, access_token }
	}
}
impl Debug for SessionTokens {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let redact = |token: &Option<String>| token.as_ref().map(|_| "<redacted>");

		f.debug_struct("SessionTokens")
			.field("id_token", &redact(&self.id_token))
			.field("access_token", &redact(&self.access_token))
			.finish()
	}
}

/// Read access to the persisted authentication session.
pub trait SessionState
where
	Self: Send + Sync,
{
	/// Returns `true` when the stored tokens are present and still valid.
	fn tokens_valid(&self) -> bool;

	/// Returns the stored identity token.
	fn id_token(&self) -> Option<String>;

	/// Returns the stored access token.
	fn access_token(&self) -> Option<String>;

	/// Reads the current token pair.
	fn tokens(&self) -> SessionTokens {
		SessionTokens { id_token: self.id_token(), access_token: self.access_token() }
	}
}

#[derive(Clone, Debug, Default)]
struct StoredSession {
	tokens: SessionTokens,
	valid: bool,
}

/// Thread-safe in-process session state.
#[derive(Clone, Debug, Default)]
pub struct MemorySession(Arc<RwLock<StoredSession>>);
impl MemorySession {
	/// Stores a valid session with the provided tokens.
	pub fn authenticate(&self, tokens: SessionTokens) {
		*self.0.write() = StoredSession { tokens, valid: true };
	}

	/// Marks the stored tokens as invalid without discarding them.
	pub fn invalidate(&self) {
		self.0.write().valid = false;
	}

	/// Drops the stored session entirely.
	pub fn clear(&self) {
		*self.0.write() = StoredSession::default();
	}
}
impl SessionState for MemorySession {
	fn tokens_valid(&self) -> bool {
		let session = self.0.read();

		session.valid && session.tokens.access_token.is_some()
	}

	fn id_token(&self) -> Option<String> {
		self.0.read().tokens.id_token.clone()
	}

	fn access_token(&self) -> Option<String> {
		self.0.read().tokens.access_token.clone()
	}
}

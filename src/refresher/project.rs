// self
use crate::{
	callback::CallbackContext,
	refresher::{RenewalOutcome, SessionRefresher},
};

/// Which renewal path settled, with the payload the projection needs.
pub(super) enum Settled {
	/// Refresh-token exchange finished; tokens are read from session state.
	RefreshToken,
	/// Iframe renewal finished; tokens come from the completion payload.
	Iframe(Option<CallbackContext>),
}

impl SessionRefresher {
	/// Turns a settled renewal into the caller-facing outcome.
	///
	/// Session validity always decides; the token source depends on the path.
	pub(super) fn project(&self, settled: Settled) -> RenewalOutcome {
		if !self.session.tokens_valid() {
			return RenewalOutcome::NoSession;
		}

		let tokens = match settled {
			Settled::RefreshToken => self.session.tokens(),
			Settled::Iframe(context) =>
				context.as_ref().map(CallbackContext::tokens).unwrap_or_default(),
		};

		RenewalOutcome::Renewed(tokens)
	}
}

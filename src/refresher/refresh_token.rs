// self
use crate::{
	_prelude::*,
	completion,
	config::{RefreshConfig, RenewalRequest, merge_params},
	refresher::{RenewalOutcome, SessionRefresher, project::Settled, selector::Admission},
};

impl SessionRefresher {
	/// Refresh-token path: one strategy call, no timeout wrapper, no retries.
	pub(super) async fn renew_with_refresh_token(
		&self,
		config: &RefreshConfig,
		request: &RenewalRequest,
	) -> Result<RenewalOutcome> {
		let params =
			merge_params(request.extra_params.as_ref(), &config.custom_params_refresh_token);
		let Admission::Admitted { claim, endpoint } = self.admit(config)? else {
			return Ok(RenewalOutcome::NoSession);
		};

		self.confirm_discovery(&endpoint).await?;
		// The strategy's own payload is ignored; tokens come from session state.
		completion::dispatch_result(self.refresh_token.renew(&params).await)?;
		claim.release();

		Ok(self.project(Settled::RefreshToken))
	}
}

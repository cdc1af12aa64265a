// self
use crate::{
	_prelude::*,
	callback::CallbackContext,
	completion,
	config::{CustomParams, RefreshConfig, RenewalRequest},
	refresher::{RenewalOutcome, SessionRefresher, project::Settled, selector::Admission},
	retry::TimeoutRetry,
};

/// Result of one iframe attempt that did not fail.
enum IframeAttempt {
	Skipped,
	Completed(Option<CallbackContext>),
}

impl SessionRefresher {
	/// Iframe path: dispatch joined with the completion signal, bounded and retried on timeout.
	pub(super) async fn renew_with_iframe(
		&self,
		config: &RefreshConfig,
		request: &RenewalRequest,
	) -> Result<RenewalOutcome> {
		let params = request.extra_params.as_ref();
		let attempt = TimeoutRetry::new(&config.retry, &self.guard)
			.with_metrics(&self.metrics)
			.run(|_| self.iframe_attempt(config, params))
			.await?;

		Ok(match attempt {
			IframeAttempt::Skipped => RenewalOutcome::NoSession,
			IframeAttempt::Completed(context) => self.project(Settled::Iframe(context)),
		})
	}

	async fn iframe_attempt(
		&self,
		config: &RefreshConfig,
		params: Option<&CustomParams>,
	) -> Result<IframeAttempt> {
		let Admission::Admitted { claim, endpoint } = self.admit(config)? else {
			return Ok(IframeAttempt::Skipped);
		};
		// Read after admission so a held guard short-circuits before any setting is checked.
		// A rejected setting drops the claim and is not retried.
		let timeout = config.silent_renew_timeout()?;

		config.retry.validate()?;

		let signal = self.completion.subscribe();
		let dispatch = async {
			self.confirm_discovery(&endpoint).await?;

			completion::dispatch_result(self.iframe.renew(params).await)
		};

		match completion::correlate(dispatch, signal, timeout).await {
			Ok(context) => {
				claim.release();

				Ok(IframeAttempt::Completed(context))
			},
			// The abandoned dispatch is not aborted. The guard stays set until the retry
			// controller clears it.
			Err(err) if err.is_timeout() => {
				claim.keep();

				Err(err)
			},
			Err(err) => Err(err),
		}
	}
}

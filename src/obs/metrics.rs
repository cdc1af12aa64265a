// self
use crate::obs::{RenewalPath, RenewalStep};

/// Records a renewal step via the global metrics recorder (when enabled).
pub fn record_renewal_step(path: RenewalPath, step: RenewalStep) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"session_refresh_renewal_total",
			"path" => path.as_str(),
			"outcome" => step.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (path, step);
	}
}

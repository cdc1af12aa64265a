//! Orchestrator configuration, renewal requests, and custom parameter handling.

// self
use crate::{_prelude::*, error::ConfigError, retry::RetryPolicy};

/// Extra request parameters keyed by name.
pub type CustomParams = BTreeMap<String, ParamValue>;

/// Value of a single custom parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
	/// Boolean flag (`prompt_consent=true`).
	Bool(bool),
	/// Numeric value (`max_age=300`).
	///
	/// Stored as `f64`, so integers are exact only up to 2^53. Only `i32` converts implicitly.
	Number(f64),
	/// Free-form string value.
	String(String),
}
impl From<&str> for ParamValue {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}
impl From<String> for ParamValue {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}
impl From<bool> for ParamValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}
impl From<f64> for ParamValue {
	fn from(value: f64) -> Self {
		Self::Number(value)
	}
}
impl From<i32> for ParamValue {
	fn from(value: i32) -> Self {
		Self::Number(f64::from(value))
	}
}
impl Display for ParamValue {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Bool(value) => write!(f, "{value}"),
			Self::Number(value) => write!(f, "{value}"),
			Self::String(value) => f.write_str(value),
		}
	}
}

/// Overlays `configured` on top of `caller`; configured values win on key collision.
pub fn merge_params(caller: Option<&CustomParams>, configured: &CustomParams) -> CustomParams {
	let mut merged = caller.cloned().unwrap_or_default();

	merged.extend(configured.iter().map(|(key, value)| (key.clone(), value.clone())));

	merged
}

/// One caller-initiated renewal attempt.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenewalRequest {
	/// Extra parameters forwarded to the renewal strategy.
	pub extra_params: Option<CustomParams>,
}
impl RenewalRequest {
	/// Creates a request without extra parameters.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a request carrying the provided parameters.
	pub fn with_params(params: CustomParams) -> Self {
		Self { extra_params: Some(params) }
	}

	/// Adds a single extra parameter.
	pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
		self.extra_params.get_or_insert_with(CustomParams::new).insert(key.into(), value.into());

		self
	}
}
impl From<Option<CustomParams>> for RenewalRequest {
	fn from(extra_params: Option<CustomParams>) -> Self {
		Self { extra_params }
	}
}

/// Source of the current [`RefreshConfig`], read once per renewal call.
pub trait ConfigurationReader
where
	Self: Send + Sync,
{
	/// Returns the configuration that applies to the next renewal.
	fn configuration(&self) -> RefreshConfig;
}
impl ConfigurationReader for RefreshConfig {
	fn configuration(&self) -> RefreshConfig {
		self.clone()
	}
}
impl ConfigurationReader for RwLock<RefreshConfig> {
	fn configuration(&self) -> RefreshConfig {
		self.read().clone()
	}
}

/// Settings consumed by the orchestrator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
	/// Well-known discovery endpoint; renewals fail fast without it.
	pub discovery_endpoint: Option<Url>,
	/// Bound applied to each joined iframe wait.
	pub silent_renew_timeout_in_seconds: u64,
	/// Parameters always sent with refresh-token renewals; they override caller values.
	pub custom_params_refresh_token: CustomParams,
	/// OAuth response type of the active flow (`code`, `id_token token`, ...).
	pub response_type: String,
	/// Whether the code flow renews through refresh tokens instead of an iframe.
	pub use_refresh_token: bool,
	/// Timeout retry policy for the iframe path.
	pub retry: RetryPolicy,
}
impl RefreshConfig {
	const DEFAULT_SILENT_RENEW_TIMEOUT_IN_SECONDS: u64 = 20;

	/// Creates a new builder seeded with defaults.
	pub fn builder() -> RefreshConfigBuilder {
		RefreshConfigBuilder::default()
	}

	/// Returns the configured discovery endpoint or the fail-fast configuration error.
	pub fn require_discovery_endpoint(&self) -> Result<&Url, ConfigError> {
		self.discovery_endpoint.as_ref().ok_or(ConfigError::MissingDiscoveryEndpoint)
	}

	/// Converts the configured silent renew timeout into the joined-wait bound.
	pub fn silent_renew_timeout(&self) -> Result<Duration, ConfigError> {
		match self.silent_renew_timeout_in_seconds {
			0 => Err(ConfigError::ZeroSilentRenewTimeout),
			secs => Ok(Duration::from_secs(secs)),
		}
	}

	/// Validates invariants that would otherwise surface only mid-renewal.
	pub fn validate(&self) -> Result<(), ConfigError> {
		self.silent_renew_timeout()?;
		self.retry.validate()?;

		Ok(())
	}
}
impl Default for RefreshConfig {
	fn default() -> Self {
		Self {
			discovery_endpoint: None,
			silent_renew_timeout_in_seconds: Self::DEFAULT_SILENT_RENEW_TIMEOUT_IN_SECONDS,
			custom_params_refresh_token: CustomParams::new(),
			response_type: "code".into(),
			use_refresh_token: false,
			retry: RetryPolicy::default(),
		}
	}
}

/// Builder for [`RefreshConfig`] values.
#[derive(Debug, Default)]
pub struct RefreshConfigBuilder {
	config: RefreshConfig,
}
impl RefreshConfigBuilder {
	/// Sets the discovery endpoint.
	pub fn discovery_endpoint(mut self, url: Url) -> Self {
		self.config.discovery_endpoint = Some(url);

		self
	}

	/// Sets the silent renew timeout in whole seconds.
	pub fn silent_renew_timeout_in_seconds(mut self, secs: u64) -> Self {
		self.config.silent_renew_timeout_in_seconds = secs;

		self
	}

	/// Adds a static refresh-token parameter.
	pub fn refresh_token_param(
		mut self,
		key: impl Into<String>,
		value: impl Into<ParamValue>,
	) -> Self {
		self.config.custom_params_refresh_token.insert(key.into(), value.into());

		self
	}

	/// Sets the OAuth response type.
	pub fn response_type(mut self, response_type: impl Into<String>) -> Self {
		self.config.response_type = response_type.into();

		self
	}

	/// Enables or disables refresh-token renewal for the code flow.
	pub fn use_refresh_token(mut self, enabled: bool) -> Self {
		self.config.use_refresh_token = enabled;

		self
	}

	/// Overrides the retry policy.
	pub fn retry(mut self, policy: RetryPolicy) -> Self {
		self.config.retry = policy;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<RefreshConfig, ConfigError> {
		self.config.validate()?;

		Ok(self.config)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn params(pairs: &[(&str, i32)]) -> CustomParams {
		pairs.iter().map(|(key, value)| (key.to_string(), ParamValue::from(*value))).collect()
	}

	#[test]
	fn configured_params_win_on_collision() {
		let caller = params(&[("a", 1), ("b", 2)]);
		let configured = params(&[("b", 3), ("c", 4)]);

		assert_eq!(merge_params(Some(&caller), &configured), params(&[("a", 1), ("b", 3), ("c", 4)]));
		assert_eq!(merge_params(None, &configured), configured);
	}

	#[test]
	fn param_values_deserialize_untagged() {
		let parsed: CustomParams =
			serde_json::from_str(r#"{"prompt":"none","max_age":300,"consent":true}"#)
				.expect("Custom params should deserialize from JSON.");

		assert_eq!(parsed["prompt"], ParamValue::from("none"));
		assert_eq!(parsed["max_age"], ParamValue::from(300));
		assert_eq!(parsed["consent"], ParamValue::from(true));
		assert_eq!(parsed["max_age"].to_string(), "300");
	}

	#[test]
	fn builder_rejects_zero_timeout() {
		let err = RefreshConfig::builder()
			.silent_renew_timeout_in_seconds(0)
			.build()
			.expect_err("A zero timeout should be rejected.");

		assert_eq!(err, ConfigError::ZeroSilentRenewTimeout);
	}

	#[test]
	fn config_deserializes_with_defaults() {
		let config: RefreshConfig = serde_json::from_str(
			r#"{"discovery_endpoint":"https://idp.example.com/.well-known/openid-configuration"}"#,
		)
		.expect("Partial config should deserialize with defaults.");

		assert_eq!(config.silent_renew_timeout_in_seconds, 20);
		assert_eq!(config.silent_renew_timeout(), Ok(Duration::from_secs(20)));
		assert_eq!(config.retry, RetryPolicy::default());
		assert!(config.require_discovery_endpoint().is_ok());
		assert_eq!(
			RefreshConfig::default().require_discovery_endpoint(),
			Err(ConfigError::MissingDiscoveryEndpoint)
		);
	}

	#[test]
	fn request_builder_collects_params() {
		let request = RenewalRequest::new().param("prompt", "none").param("max_age", 60);
		let extra = request.extra_params.expect("Params should be recorded.");

		assert_eq!(extra.len(), 2);
		assert_eq!(extra["prompt"], ParamValue::from("none"));
		assert_eq!(RenewalRequest::with_params(extra.clone()), RenewalRequest::from(Some(extra)));
	}

	#[test]
	fn large_integers_fit_through_f64_only_up_to_2_pow_53() {
		assert_eq!(ParamValue::from(i32::MAX), ParamValue::Number(2_147_483_647_f64));

		let parsed: ParamValue = serde_json::from_str("9007199254740993")
			.expect("Large integers should still deserialize as numbers.");

		assert_eq!(parsed, ParamValue::Number(9_007_199_254_740_992_f64));
	}
}

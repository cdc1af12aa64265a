#![allow(dead_code)]

// std
use std::{
	collections::VecDeque,
	sync::{
		Arc,
		atomic::{AtomicU32, Ordering},
	},
	time::Duration,
};
// crates.io
use parking_lot::Mutex;
use tokio::time::Instant;
// self
use session_refresh::{
	callback::{AuthResult, CallbackContext},
	completion::{CompletionHub, CompletionSource},
	config::{CustomParams, RefreshConfig},
	discovery::{DiscoveryDocument, DiscoveryFuture, DiscoveryService},
	error::{DiscoveryError, StrategyError},
	guard::ConcurrencyGuard,
	refresher::SessionRefresher,
	session::{MemorySession, SessionTokens},
	strategy::{IframeRenewal, RefreshTokenRenewal, RenewalFuture},
	url::Url,
};

pub const SILENT_RENEW_TIMEOUT_SECS: u64 = 5;

pub fn discovery_endpoint() -> Url {
	Url::parse("https://idp.example.com/.well-known/openid-configuration")
		.expect("Discovery endpoint fixture should parse.")
}

pub fn tokens(id_token: &str, access_token: &str) -> SessionTokens {
	SessionTokens::new(Some(id_token.into()), Some(access_token.into()))
}

pub fn callback(id_token: &str, access_token: &str) -> CallbackContext {
	CallbackContext::renewal(AuthResult {
		id_token: Some(id_token.into()),
		access_token: Some(access_token.into()),
		..Default::default()
	})
}

pub fn int_params(pairs: &[(&str, i32)]) -> CustomParams {
	pairs.iter().map(|(key, value)| (key.to_string(), (*value).into())).collect()
}

// The paused clock advances in whole-millisecond ticks.
pub fn assert_close(actual: Duration, expected: Duration) {
	assert!(
		actual >= expected && actual <= expected + Duration::from_millis(5),
		"Expected roughly {expected:?}, observed {actual:?}."
	);
}

#[derive(Default)]
pub struct MockDiscovery {
	pub calls: AtomicU32,
	pub fail: Mutex<bool>,
}
impl DiscoveryService for MockDiscovery {
	fn fetch_metadata<'a>(&'a self, endpoint: &'a Url) -> DiscoveryFuture<'a, DiscoveryDocument> {
		Box::pin(async move {
			self.calls.fetch_add(1, Ordering::SeqCst);

			if *self.fail.lock() {
				return Err(DiscoveryError::unreachable(
					endpoint,
					std::io::Error::other("connection refused"),
				));
			}

			Ok(DiscoveryDocument {
				issuer: "https://idp.example.com".into(),
				authorization_endpoint: Url::parse("https://idp.example.com/authorize").ok(),
				token_endpoint: Url::parse("https://idp.example.com/token").ok(),
				userinfo_endpoint: None,
				end_session_endpoint: None,
				check_session_iframe: None,
				jwks_uri: None,
			})
		})
	}
}

pub enum RefreshBehavior {
	/// Succeeds, optionally storing new tokens in the session first.
	Succeed { store: Option<SessionTokens>, payload: Option<CallbackContext> },
	Fail,
}

pub struct MockRefreshToken {
	pub session: MemorySession,
	pub guard: ConcurrencyGuard,
	pub behavior: Mutex<RefreshBehavior>,
	pub received: Mutex<Vec<CustomParams>>,
	pub guard_seen: Mutex<Vec<bool>>,
}
impl RefreshTokenRenewal for MockRefreshToken {
	fn renew<'a>(&'a self, params: &'a CustomParams) -> RenewalFuture<'a, Option<CallbackContext>> {
		Box::pin(async move {
			self.received.lock().push(params.clone());
			self.guard_seen.lock().push(self.guard.is_running());
			tokio::time::sleep(Duration::from_millis(20)).await;

			match &*self.behavior.lock() {
				RefreshBehavior::Succeed { store, payload } => {
					if let Some(tokens) = store {
						self.session.authenticate(tokens.clone());
					}

					Ok(payload.clone())
				},
				RefreshBehavior::Fail =>
					Err(StrategyError::new("refresh_token", "invalid_grant from token endpoint")),
			}
		})
	}
}

#[derive(Clone)]
pub enum IframeBehavior {
	/// Dispatch succeeds and the completion signal fires after `after`.
	Complete { after: Duration, context: Option<CallbackContext> },
	/// Dispatch succeeds but no completion ever arrives.
	Hang,
	/// Dispatch itself fails.
	Fail,
}

pub struct MockIframe {
	pub hub: Arc<CompletionHub>,
	pub guard: ConcurrencyGuard,
	pub script: Mutex<VecDeque<IframeBehavior>>,
	pub dispatches: Mutex<Vec<(Instant, bool)>>,
	pub received: Mutex<Vec<Option<CustomParams>>>,
}
impl MockIframe {
	pub fn script(&self, behaviors: impl IntoIterator<Item = IframeBehavior>) {
		self.script.lock().extend(behaviors);
	}

	pub fn dispatch_count(&self) -> usize {
		self.dispatches.lock().len()
	}
}
impl IframeRenewal for MockIframe {
	fn renew<'a>(&'a self, params: Option<&'a CustomParams>) -> RenewalFuture<'a, ()> {
		Box::pin(async move {
			self.dispatches.lock().push((Instant::now(), self.guard.is_running()));
			self.received.lock().push(params.cloned());

			let behavior = self.script.lock().pop_front().unwrap_or(IframeBehavior::Hang);

			match behavior {
				IframeBehavior::Complete { after, context } => {
					let hub = self.hub.clone();

					tokio::spawn(async move {
						tokio::time::sleep(after).await;
						hub.complete(context);
					});

					Ok(())
				},
				IframeBehavior::Hang => Ok(()),
				IframeBehavior::Fail => Err(StrategyError::new("iframe", "iframe could not be attached")),
			}
		})
	}
}

pub struct Harness {
	pub refresher: SessionRefresher,
	pub config: Arc<RefreshConfig>,
	pub guard: ConcurrencyGuard,
	pub session: MemorySession,
	pub hub: Arc<CompletionHub>,
	pub discovery: Arc<MockDiscovery>,
	pub refresh_token: Arc<MockRefreshToken>,
	pub iframe: Arc<MockIframe>,
}
impl Harness {
	pub fn new(config: RefreshConfig) -> Self {
		let config = Arc::new(config);
		let guard = ConcurrencyGuard::new();
		let session = MemorySession::default();
		let hub = Arc::new(CompletionHub::new());
		let discovery = Arc::new(MockDiscovery::default());
		let refresh_token = Arc::new(MockRefreshToken {
			session: session.clone(),
			guard: guard.clone(),
			behavior: Mutex::new(RefreshBehavior::Succeed { store: None, payload: None }),
			received: Default::default(),
			guard_seen: Default::default(),
		});
		let iframe = Arc::new(MockIframe {
			hub: hub.clone(),
			guard: guard.clone(),
			script: Default::default(),
			dispatches: Default::default(),
			received: Default::default(),
		});
		let completion: Arc<dyn CompletionSource> = hub.clone();
		let refresher = SessionRefresher::new(
			config.clone(),
			config.clone(),
			Arc::new(session.clone()),
			discovery.clone(),
			refresh_token.clone(),
			iframe.clone(),
			completion,
		)
		.with_guard(guard.clone());

		Self { refresher, config, guard, session, hub, discovery, refresh_token, iframe }
	}

	pub fn refresh_token_flow() -> Self {
		Self::new(
			RefreshConfig::builder()
				.discovery_endpoint(discovery_endpoint())
				.use_refresh_token(true)
				.build()
				.expect("Refresh-token config fixture should be valid."),
		)
	}

	pub fn iframe_flow() -> Self {
		Self::new(
			RefreshConfig::builder()
				.discovery_endpoint(discovery_endpoint())
				.silent_renew_timeout_in_seconds(SILENT_RENEW_TIMEOUT_SECS)
				.build()
				.expect("Iframe config fixture should be valid."),
		)
	}

	pub fn discovery_calls(&self) -> u32 {
		self.discovery.calls.load(Ordering::SeqCst)
	}
}

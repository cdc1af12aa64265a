//! Discovery metadata contract and a caching wrapper that fetches each document once.

// self
use crate::{_prelude::*, error::DiscoveryError};

/// Boxed future returned by [`DiscoveryService::fetch_metadata`].
pub type DiscoveryFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, DiscoveryError>> + 'a + Send>>;

/// Fetches the provider's published discovery document.
pub trait DiscoveryService
where
	Self: Send + Sync,
{
	/// Retrieves (or confirms) the discovery document served at `endpoint`.
	fn fetch_metadata<'a>(&'a self, endpoint: &'a Url) -> DiscoveryFuture<'a, DiscoveryDocument>;
}

/// Subset of the OpenID Provider metadata needed by renewal flows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryDocument {
	/// Issuer identifier.
	pub issuer: String,
	/// Authorization endpoint the silent-renew iframe navigates to.
	pub authorization_endpoint: Option<Url>,
	/// Token endpoint used by refresh-token renewals.
	pub token_endpoint: Option<Url>,
	/// User info endpoint.
	#[serde(default)]
	pub userinfo_endpoint: Option<Url>,
	/// RP-initiated logout endpoint.
	#[serde(default)]
	pub end_session_endpoint: Option<Url>,
	/// Session monitoring iframe.
	#[serde(default)]
	pub check_session_iframe: Option<Url>,
	/// JSON Web Key Set location.
	#[serde(default)]
	pub jwks_uri: Option<Url>,
}

/// [`DiscoveryService`] decorator that remembers fetched documents per endpoint.
///
/// Concurrent fetches for the same endpoint share one upstream call; failures are not cached.
pub struct CachedDiscovery<D>
where
	D: ?Sized + DiscoveryService,
{
	inner: Arc<D>,
	documents: RwLock<HashMap<Url, DiscoveryDocument>>,
	fetch_guards: Mutex<HashMap<Url, Arc<AsyncMutex<()>>>>,
}
impl<D> CachedDiscovery<D>
where
	D: ?Sized + DiscoveryService,
{
	/// Wraps the provided discovery service.
	pub fn new(inner: impl Into<Arc<D>>) -> Self {
		Self { inner: inner.into(), documents: Default::default(), fetch_guards: Default::default() }
	}

	/// Returns the cached document for `endpoint`, if any.
	pub fn cached(&self, endpoint: &Url) -> Option<DiscoveryDocument> {
		self.documents.read().get(endpoint).cloned()
	}

	/// Forgets every cached document so the next renewal fetches fresh metadata.
	pub fn invalidate(&self) {
		self.documents.write().clear();
	}

	fn fetch_guard(&self, endpoint: &Url) -> Arc<AsyncMutex<()>> {
		let mut guards = self.fetch_guards.lock();

		guards.entry(endpoint.clone()).or_insert_with(|| Arc::new(AsyncMutex::new(()))).clone()
	}

	async fn fetch_or_cached(&self, endpoint: &Url) -> Result<DiscoveryDocument, DiscoveryError> {
		if let Some(document) = self.cached(endpoint) {
			return Ok(document);
		}

		let guard = self.fetch_guard(endpoint);
		let _singleflight = guard.lock().await;

		if let Some(document) = self.cached(endpoint) {
			return Ok(document);
		}

		let document = self.inner.fetch_metadata(endpoint).await?;

		self.documents.write().insert(endpoint.clone(), document.clone());

		Ok(document)
	}
}
impl<D> DiscoveryService for CachedDiscovery<D>
where
	D: ?Sized + DiscoveryService,
{
	fn fetch_metadata<'a>(&'a self, endpoint: &'a Url) -> DiscoveryFuture<'a, DiscoveryDocument> {
		Box::pin(self.fetch_or_cached(endpoint))
	}
}
impl<D> Debug for CachedDiscovery<D>
where
	D: ?Sized + DiscoveryService,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CachedDiscovery")
			.field("cached_endpoints", &self.documents.read().len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicU32, Ordering};
	// self
	use super::*;

	#[derive(Default)]
	struct CountingDiscovery {
		calls: AtomicU32,
		fail: bool,
	}
	impl DiscoveryService for CountingDiscovery {
		fn fetch_metadata<'a>(
			&'a self,
			endpoint: &'a Url,
		) -> DiscoveryFuture<'a, DiscoveryDocument> {
			Box::pin(async move {
				self.calls.fetch_add(1, Ordering::SeqCst);
				tokio::time::sleep(Duration::from_millis(10)).await;

				if self.fail {
					return Err(DiscoveryError::InvalidDocument {
						endpoint: endpoint.to_string(),
						message: "missing issuer".into(),
					});
				}

				Ok(DiscoveryDocument {
					issuer: "https://idp.example.com".into(),
					authorization_endpoint: None,
					token_endpoint: None,
					userinfo_endpoint: None,
					end_session_endpoint: None,
					check_session_iframe: None,
					jwks_uri: None,
				})
			})
		}
	}

	fn endpoint() -> Url {
		Url::parse("https://idp.example.com/.well-known/openid-configuration")
			.expect("Discovery endpoint fixture should parse.")
	}

	#[tokio::test(start_paused = true)]
	async fn concurrent_fetches_share_one_upstream_call() {
		let discovery = <CachedDiscovery<CountingDiscovery>>::new(CountingDiscovery::default());
		let endpoint = endpoint();
		let (first, second) = tokio::join!(
			discovery.fetch_metadata(&endpoint),
			discovery.fetch_metadata(&endpoint)
		);

		assert_eq!(
			first.expect("First fetch should succeed."),
			second.expect("Second fetch should succeed.")
		);
		assert_eq!(discovery.inner.calls.load(Ordering::SeqCst), 1);

		discovery.invalidate();
		discovery.fetch_metadata(&endpoint).await.expect("Refetch should succeed.");

		assert_eq!(discovery.inner.calls.load(Ordering::SeqCst), 2);
	}

	#[tokio::test(start_paused = true)]
	async fn failures_are_not_cached() {
		let discovery = <CachedDiscovery<CountingDiscovery>>::new(CountingDiscovery {
			fail: true,
			..Default::default()
		});
		let endpoint = endpoint();

		assert!(discovery.fetch_metadata(&endpoint).await.is_err());
		assert!(discovery.fetch_metadata(&endpoint).await.is_err());
		assert!(discovery.cached(&endpoint).is_none());
		assert_eq!(discovery.inner.calls.load(Ordering::SeqCst), 2);
	}

	#[test]
	fn document_deserializes_from_provider_metadata() {
		let document: DiscoveryDocument = serde_json::from_str(
			r#"{
				"issuer": "https://idp.example.com",
				"authorization_endpoint": "https://idp.example.com/authorize",
				"token_endpoint": "https://idp.example.com/token",
				"check_session_iframe": "https://idp.example.com/session"
			}"#,
		)
		.expect("Discovery document should deserialize.");

		assert_eq!(
			document.token_endpoint.as_ref().map(Url::as_str),
			Some("https://idp.example.com/token")
		);
		assert!(document.jwks_uri.is_none());
	}
}

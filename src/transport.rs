//! The authenticating decorator that attaches, acquires, and refreshes bearer credentials.
//!
//! [`AuthenticatingTransport::send`] walks a small state machine per call:
//!
//! 1. With no credentials held, exchange the configured grant token (authorization-code grant). A
//!    failure aborts the call.
//! 2. Dispatch a copy of the request carrying `Authorization: Bearer <access_token>`.
//! 3. If that answer is exactly `401`, exchange the held refresh token, then dispatch one more copy
//!    with the new access token and return its answer whatever the status.
//!
//! Failed exchanges leave the held credentials untouched. Each call holds one async critical
//! section from the credential check to the final dispatch, so concurrent callers are serialized
//! instead of racing on the token pair.

mod metrics;

pub use metrics::{ExchangeCounts, ExchangeMetrics};

// crates.io
use oauth2::{
	AsyncHttpClient,
	http::{HeaderValue, StatusCode},
};
// self
use crate::{
	_prelude::*,
	auth::{GrantType, credentials::Credentials},
	config::OAuthConfig,
	error::{ConfigError, TransportError},
	http::{self, HttpRequest, HttpResponse, HttpTransport, TransportFuture},
	oauth::{self, TokenGrant},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Authenticating transport specialized for the crate's default reqwest stack.
pub type ReqwestAuthenticatingTransport = AuthenticatingTransport<ReqwestHttpClient>;

/// Decorates an [`HttpTransport`] with OAuth 2.0 bearer authentication.
///
/// The decorator implements [`HttpTransport`] itself (and `oauth2`'s [`AsyncHttpClient`]), so it
/// can be stacked under other decorators or handed to any code that expects the inner transport.
pub struct AuthenticatingTransport<C>
where
	C: ?Sized + HttpTransport,
{
	http_client: Arc<C>,
	config: OAuthConfig,
	credentials: RwLock<Option<Credentials>>,
	send_guard: AsyncMutex<()>,
	exchange_metrics: ExchangeMetrics,
}
impl<C> AuthenticatingTransport<C>
where
	C: ?Sized + HttpTransport,
{
	/// Wraps the caller-provided transport.
	pub fn with_http_client(http_client: impl Into<Arc<C>>, config: OAuthConfig) -> Self {
		Self {
			http_client: http_client.into(),
			config,
			credentials: RwLock::new(None),
			send_guard: AsyncMutex::new(()),
			exchange_metrics: ExchangeMetrics::default(),
		}
	}

	/// Configuration supplied at construction.
	pub fn config(&self) -> &OAuthConfig {
		&self.config
	}

	/// Wrapped transport.
	pub fn http_client(&self) -> &Arc<C> {
		&self.http_client
	}

	/// Acquisition and refresh counters for this transport.
	pub fn exchange_metrics(&self) -> &ExchangeMetrics {
		&self.exchange_metrics
	}

	/// Returns true once a credential pair has been acquired.
	pub fn is_authenticated(&self) -> bool {
		self.credentials.read().is_some()
	}

	/// Sends `request` with bearer credentials, acquiring or refreshing them as needed.
	///
	/// At most two authenticated dispatches happen per call. Only a `401` on the first one
	/// triggers a refresh; every other status, and every failure, is returned as is.
	pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
		const KIND: FlowKind = FlowKind::Request;

		let span = FlowSpan::new(KIND, "send");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let _critical = self.send_guard.lock().await;
				let authorization = match self.held_authorization() {
					Some(authorization) => authorization,
					None => self.acquire().await?,
				};
				let response = self.dispatch(&request, &authorization).await?;

				if response.status() != StatusCode::UNAUTHORIZED {
					return Ok(response);
				}

				obs::record_unauthorized("send");
				obs::record_unauthorized_retry();
				self.exchange_metrics.record_unauthorized();

				let authorization = self.refresh().await?;

				self.dispatch(&request, &authorization).await
			})
			.await;

		obs::record_flow_result(KIND, &result);

		result
	}

	fn held_authorization(&self) -> Option<HeaderValue> {
		self.credentials.read().as_ref().map(|credentials| credentials.authorization().clone())
	}

	fn store(&self, credentials: Credentials) -> HeaderValue {
		let authorization = credentials.authorization().clone();

		*self.credentials.write() = Some(credentials);

		authorization
	}

	async fn acquire(&self) -> Result<HeaderValue> {
		let grant = TokenGrant::AuthorizationCode { code: self.config.grant_token() };

		self.exchange(grant).await
	}

	async fn refresh(&self) -> Result<HeaderValue> {
		let refresh_token =
			self.credentials.read().as_ref().map(|credentials| credentials.refresh_token().clone());
		let Some(refresh_token) = refresh_token else {
			self.exchange_metrics.record(GrantType::RefreshToken, FlowOutcome::Attempt);
			self.exchange_metrics.record(GrantType::RefreshToken, FlowOutcome::Failure);

			return Err(ConfigError::MissingRefreshToken.into());
		};

		self.exchange(TokenGrant::RefreshToken { refresh_token: &refresh_token }).await
	}

	// Credentials are replaced only after a fully parsed success.
	async fn exchange(&self, grant: TokenGrant<'_>) -> Result<HeaderValue> {
		self.exchange_metrics.record(grant.kind(), FlowOutcome::Attempt);

		match oauth::exchange(self.http_client.as_ref(), &self.config, grant).await {
			Ok(credentials) => {
				self.exchange_metrics.record(grant.kind(), FlowOutcome::Success);

				Ok(self.store(credentials))
			},
			Err(err) => {
				self.exchange_metrics.record(grant.kind(), FlowOutcome::Failure);

				Err(err)
			},
		}
	}

	async fn dispatch(
		&self,
		request: &HttpRequest,
		authorization: &HeaderValue,
	) -> Result<HttpResponse> {
		let authorized = http::with_authorization(request, authorization);

		Ok(self.http_client.send(authorized).await.map_err(TransportError::network)?)
	}
}
#[cfg(feature = "reqwest")]
impl AuthenticatingTransport<ReqwestHttpClient> {
	/// Creates a transport backed by a fresh reqwest client that never follows redirects.
	pub fn new(config: OAuthConfig) -> Result<Self> {
		Ok(Self::with_http_client(ReqwestHttpClient::new()?, config))
	}
}
impl<C> HttpTransport for AuthenticatingTransport<C>
where
	C: ?Sized + HttpTransport,
{
	type Error = Error;

	fn send(&self, request: HttpRequest) -> TransportFuture<'_, Self::Error> {
		Box::pin(AuthenticatingTransport::send(self, request))
	}
}
impl<'c, C> AsyncHttpClient<'c> for AuthenticatingTransport<C>
where
	C: ?Sized + HttpTransport,
{
	type Error = Error;
	type Future = TransportFuture<'c, Self::Error>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		Box::pin(AuthenticatingTransport::send(self, request))
	}
}
impl<C> Debug for AuthenticatingTransport<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthenticatingTransport")
			.field("config", &self.config)
			.field("authenticated", &self.is_authenticated())
			.finish()
	}
}

//! Transport primitives shared by the decorator and the token exchanges.
//!
//! [`HttpTransport`] is the crate's only dependency on an HTTP stack. The authenticating
//! transport both consumes and implements it, so decorators stack and tests can script
//! responses without a network.

// crates.io
pub use oauth2::{HttpRequest, HttpResponse};
use oauth2::http::{HeaderValue, header::AUTHORIZATION};
// self
use crate::_prelude::*;

/// Boxed future returned by [`HttpTransport::send`].
pub type TransportFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, E>> + 'a + Send>>;

/// Capability that dispatches an HTTP request and resolves to its response.
///
/// Implementations must be `Send + Sync + 'static` so they can be shared behind an [`Arc`], and
/// the futures they return must be `Send` so callers can spawn them on multi-threaded runtimes.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the transport.
	type Error: 'static + Send + Sync + StdError;

	/// Dispatches `request` and resolves to the response, whatever its status code.
	fn send(&self, request: HttpRequest) -> TransportFuture<'_, Self::Error>;
}
impl<T> HttpTransport for Arc<T>
where
	T: ?Sized + HttpTransport,
{
	type Error = T::Error;

	fn send(&self, request: HttpRequest) -> TransportFuture<'_, Self::Error> {
		(**self).send(request)
	}
}

/// Copies `request`, replacing any `Authorization` header with `authorization`.
///
/// The original request is left untouched so it can be replayed after a refresh.
pub fn with_authorization(request: &HttpRequest, authorization: &HeaderValue) -> HttpRequest {
	let mut copy = HttpRequest::new(request.body().clone());

	*copy.method_mut() = request.method().clone();
	*copy.uri_mut() = request.uri().clone();
	*copy.version_mut() = request.version();
	*copy.headers_mut() = request.headers().clone();
	*copy.extensions_mut() = request.extensions().clone();

	copy.headers_mut().insert(AUTHORIZATION, authorization.clone());

	copy
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Token requests should not follow redirects, matching OAuth 2.0 guidance that token endpoints
/// return results directly. [`ReqwestHttpClient::new`] disables redirects; configure any custom
/// client passed to [`ReqwestHttpClient::with_client`] the same way.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a client that never follows redirects.
	pub fn new() -> Result<Self, crate::error::ConfigError> {
		let client = ReqwestClient::builder().redirect(reqwest::redirect::Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestHttpClient {
	type Error = ReqwestError;

	fn send(&self, request: HttpRequest) -> TransportFuture<'_, Self::Error> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client.execute(request.try_into()?).await?;
			let status = response.status();
			let version = response.version();
			let headers = response.headers().to_owned();
			let mut response_new = HttpResponse::new(response.bytes().await?.to_vec());

			*response_new.status_mut() = status;
			*response_new.version_mut() = version;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

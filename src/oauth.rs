//! Token endpoint exchanges for the authorization-code and refresh-token grants.
//!
//! Both grants share one wire shape: an empty-bodied `POST` to
//! `https://{base_uri}/oauth/v2/token` whose parameters travel in the query string, answered by a
//! JSON object. Only the grant-specific secret parameter differs.

// crates.io
use oauth2::http::{Method, StatusCode, Uri};
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::{GrantType, TokenSecret, credentials::Credentials},
	config::OAuthConfig,
	error::{ConfigError, MalformedResponseError, TransportError},
	http::{HttpRequest, HttpResponse, HttpTransport},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Grant presented to the token endpoint.
#[derive(Clone, Copy, Debug)]
pub enum TokenGrant<'a> {
	/// Exchange the configured authorization code.
	AuthorizationCode {
		/// Authorization code issued to the client.
		code: &'a TokenSecret,
	},
	/// Rotate the held refresh token.
	RefreshToken {
		/// Refresh token held before the exchange.
		refresh_token: &'a TokenSecret,
	},
}
impl TokenGrant<'_> {
	/// Grant kind used for error and span labels.
	pub fn kind(&self) -> GrantType {
		match self {
			Self::AuthorizationCode { .. } => GrantType::AuthorizationCode,
			Self::RefreshToken { .. } => GrantType::RefreshToken,
		}
	}

	fn secret(&self) -> &TokenSecret {
		match self {
			Self::AuthorizationCode { code } => code,
			Self::RefreshToken { refresh_token } => refresh_token,
		}
	}
}

#[derive(Deserialize)]
struct TokenResponse {
	access_token: TokenSecret,
	refresh_token: TokenSecret,
}

/// Builds the unauthenticated token request for `grant`.
pub fn token_request(config: &OAuthConfig, grant: TokenGrant<'_>) -> Result<HttpRequest> {
	let kind = grant.kind();
	let mut url = config.token_endpoint().clone();

	url.query_pairs_mut()
		.append_pair("client_id", config.client_id())
		.append_pair("client_secret", config.client_secret().expose())
		.append_pair(kind.secret_param(), grant.secret().expose())
		.append_pair("grant_type", kind.as_str());

	let uri = url.as_str().parse::<Uri>().map_err(|_| ConfigError::InvalidBaseUri {
		base_uri: config.base_uri().to_owned(),
	})?;
	let mut request = HttpRequest::new(Vec::new());

	*request.method_mut() = Method::POST;
	*request.uri_mut() = uri;

	Ok(request)
}

/// Interprets a token endpoint response as a fresh credential pair.
///
/// A non-`200` status is [`Error::AccessDenied`], a `200` body carrying an `error` member is
/// [`Error::InvalidGrant`], and anything else without both tokens is
/// [`Error::MalformedCredentialResponse`].
pub(crate) fn credentials_from_response(
	grant: GrantType,
	response: &HttpResponse,
) -> Result<Credentials> {
	if response.status() != StatusCode::OK {
		return Err(Error::AccessDenied { grant, status: response.status().as_u16() });
	}

	let body: Value = serde_json::from_slice(response.body())
		.map_err(|source| MalformedResponseError::Syntax { grant, source })?;
	let Value::Object(object) = body else {
		return Err(MalformedResponseError::NotAnObject { grant }.into());
	};

	if let Some(error) = object.get("error") {
		return Err(Error::InvalidGrant { grant, reason: error_reason(error) });
	}

	let tokens: TokenResponse = serde_path_to_error::deserialize(Value::Object(object))
		.map_err(|source| MalformedResponseError::Fields { grant, source })?;

	Ok(Credentials::new(grant, tokens.access_token, tokens.refresh_token)?)
}

/// Runs one token exchange through `http_client`, unauthenticated.
pub(crate) async fn exchange<C>(
	http_client: &C,
	config: &OAuthConfig,
	grant: TokenGrant<'_>,
) -> Result<Credentials>
where
	C: ?Sized + HttpTransport,
{
	let kind = FlowKind::from(grant.kind());
	let span = FlowSpan::new(kind, "token_exchange");

	obs::record_flow_outcome(kind, FlowOutcome::Attempt);

	let result = span
		.instrument(async move {
			let request = token_request(config, grant)?;
			let response =
				http_client.send(request).await.map_err(TransportError::network)?;

			credentials_from_response(grant.kind(), &response)
		})
		.await;

	obs::record_flow_result(kind, &result);

	result
}

fn error_reason(error: &Value) -> String {
	match error {
		Value::String(reason) => reason.clone(),
		other => other.to_string(),
	}
}

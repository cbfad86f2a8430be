//! The access/refresh token pair held by an authenticating transport.

// crates.io
use oauth2::http::HeaderValue;
// self
use crate::{
	_prelude::*,
	auth::{GrantType, TokenSecret},
	error::MalformedResponseError,
};

/// Access + refresh token pair, always populated together.
///
/// The `Authorization` header value is prepared once at construction so a token that cannot be
/// carried in a header is rejected before it replaces the previous pair.
#[derive(Clone)]
pub(crate) struct Credentials {
	access_token: TokenSecret,
	refresh_token: TokenSecret,
	authorization: HeaderValue,
}
impl Credentials {
	pub(crate) fn new(
		grant: GrantType,
		access_token: TokenSecret,
		refresh_token: TokenSecret,
	) -> Result<Self, MalformedResponseError> {
		if access_token.is_empty() {
			return Err(MalformedResponseError::InvalidToken { grant, field: "access_token" });
		}
		if refresh_token.is_empty() {
			return Err(MalformedResponseError::InvalidToken { grant, field: "refresh_token" });
		}

		let authorization = access_token
			.bearer()
			.ok_or(MalformedResponseError::InvalidToken { grant, field: "access_token" })?;

		Ok(Self { access_token, refresh_token, authorization })
	}

	/// Ready-made `Authorization: Bearer <access_token>` value.
	pub(crate) fn authorization(&self) -> &HeaderValue {
		&self.authorization
	}

	pub(crate) fn refresh_token(&self) -> &TokenSecret {
		&self.refresh_token
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("access_token", &self.access_token)
			.field("refresh_token", &self.refresh_token)
			.finish()
	}
}

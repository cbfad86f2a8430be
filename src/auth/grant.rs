//! Grant kinds exchanged at the token endpoint.

// self
use crate::_prelude::*;

/// OAuth 2.0 grants the transport exchanges at the token endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrantType {
	/// Initial exchange of the configured grant token.
	AuthorizationCode,
	/// Rotation of the held refresh token.
	RefreshToken,
}
impl GrantType {
	/// Returns the RFC 6749 `grant_type` value.
	pub const fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::RefreshToken => "refresh_token",
		}
	}

	/// Returns the query parameter that carries the grant secret.
	pub const fn secret_param(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "code",
			GrantType::RefreshToken => "refresh_token",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn wire_names_match_the_token_endpoint_query() {
		assert_eq!(GrantType::AuthorizationCode.as_str(), "authorization_code");
		assert_eq!(GrantType::AuthorizationCode.secret_param(), "code");
		assert_eq!(GrantType::RefreshToken.to_string(), "refresh_token");
		assert_eq!(GrantType::RefreshToken.secret_param(), "refresh_token");
	}
}

//! Construction-time OAuth configuration.
//!
//! [`OAuthConfig`] is immutable once built. Both [`OAuthConfig::new`] and the `serde`
//! deserializer run the same validation, so a config loaded from a file can never carry an empty
//! secret or a base URI that would produce a different token endpoint.

// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Path of the token endpoint below the configured authority.
pub const TOKEN_ENDPOINT_PATH: &str = "/oauth/v2/token";

/// Immutable OAuth client configuration shared by every token exchange.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOAuthConfig", into = "RawOAuthConfig")]
pub struct OAuthConfig {
	base_uri: String,
	client_id: String,
	client_secret: TokenSecret,
	grant_token: TokenSecret,
	token_endpoint: Url,
}
impl OAuthConfig {
	/// Validates the options and derives `https://{base_uri}/oauth/v2/token`.
	pub fn new(
		base_uri: impl Into<String>,
		client_id: impl Into<String>,
		client_secret: impl Into<TokenSecret>,
		grant_token: impl Into<TokenSecret>,
	) -> Result<Self, ConfigError> {
		let base_uri = base_uri.into();
		let client_id = client_id.into();
		let client_secret = client_secret.into();
		let grant_token = grant_token.into();

		if base_uri.is_empty() {
			return Err(ConfigError::MissingField { field: "base_uri" });
		}
		if client_id.is_empty() {
			return Err(ConfigError::MissingField { field: "client_id" });
		}
		if client_secret.is_empty() {
			return Err(ConfigError::MissingField { field: "client_secret" });
		}
		if grant_token.is_empty() {
			return Err(ConfigError::MissingField { field: "grant_token" });
		}

		let token_endpoint = token_endpoint(&base_uri)?;

		Ok(Self { base_uri, client_id, client_secret, grant_token, token_endpoint })
	}

	/// Authority of the OAuth server, e.g. `accounts.zoho.com`.
	pub fn base_uri(&self) -> &str {
		&self.base_uri
	}

	/// OAuth client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// OAuth client secret.
	pub fn client_secret(&self) -> &TokenSecret {
		&self.client_secret
	}

	/// Authorization code exchanged on first use.
	pub fn grant_token(&self) -> &TokenSecret {
		&self.grant_token
	}

	/// Token endpoint without query parameters.
	pub fn token_endpoint(&self) -> &Url {
		&self.token_endpoint
	}
}
impl Debug for OAuthConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuthConfig")
			.field("base_uri", &self.base_uri)
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.field("grant_token", &self.grant_token)
			.finish()
	}
}
impl TryFrom<RawOAuthConfig> for OAuthConfig {
	type Error = ConfigError;

	fn try_from(raw: RawOAuthConfig) -> Result<Self, Self::Error> {
		Self::new(raw.base_uri, raw.client_id, raw.client_secret, raw.grant_token)
	}
}

#[derive(Serialize, Deserialize)]
struct RawOAuthConfig {
	#[serde(alias = "oauth_base_uri")]
	base_uri: String,
	client_id: String,
	client_secret: TokenSecret,
	grant_token: TokenSecret,
}
impl From<OAuthConfig> for RawOAuthConfig {
	fn from(config: OAuthConfig) -> Self {
		Self {
			base_uri: config.base_uri,
			client_id: config.client_id,
			client_secret: config.client_secret,
			grant_token: config.grant_token,
		}
	}
}

fn token_endpoint(base_uri: &str) -> Result<Url, ConfigError> {
	if base_uri.contains(['/', '?', '#', '@']) || base_uri.chars().any(char::is_whitespace) {
		return Err(ConfigError::InvalidBaseUri { base_uri: base_uri.to_owned() });
	}

	let url = Url::parse(&format!("https://{base_uri}{TOKEN_ENDPOINT_PATH}")).map_err(|source| {
		ConfigError::InvalidTokenEndpoint { base_uri: base_uri.to_owned(), source }
	})?;

	if url.host_str().is_none_or(str::is_empty) {
		return Err(ConfigError::InvalidBaseUri { base_uri: base_uri.to_owned() });
	}

	Ok(url)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn derives_https_token_endpoint() {
		let config = OAuthConfig::new("accounts.zoho.com", "client", "secret", "grant")
			.expect("Config should accept a bare host.");

		assert_eq!(config.token_endpoint().as_str(), "https://accounts.zoho.com/oauth/v2/token");

		let config = OAuthConfig::new("127.0.0.1:8443", "client", "secret", "grant")
			.expect("Config should accept a host with a port.");

		assert_eq!(config.token_endpoint().as_str(), "https://127.0.0.1:8443/oauth/v2/token");
	}

	#[test]
	fn rejects_empty_options() {
		let err = OAuthConfig::new("accounts.zoho.com", "client", "", "grant")
			.expect_err("Empty client secret must be rejected.");

		assert!(matches!(err, ConfigError::MissingField { field: "client_secret" }));

		let err = OAuthConfig::new("", "client", "secret", "grant")
			.expect_err("Empty base URI must be rejected.");

		assert!(matches!(err, ConfigError::MissingField { field: "base_uri" }));
	}

	#[test]
	fn rejects_base_uri_with_scheme_or_path() {
		for base_uri in ["https://accounts.zoho.com", "accounts.zoho.com/oauth", "a b", "x?y=1"] {
			let err = OAuthConfig::new(base_uri, "client", "secret", "grant")
				.expect_err("Base URI must be a bare authority.");

			assert!(matches!(err, ConfigError::InvalidBaseUri { .. }), "{base_uri}: {err:?}");
		}

		let err = OAuthConfig::new("bad:port", "client", "secret", "grant")
			.expect_err("Non-numeric ports must be rejected.");

		assert!(matches!(err, ConfigError::InvalidTokenEndpoint { .. }));
	}

	#[test]
	fn deserialization_validates_and_redacts() {
		let config: OAuthConfig = serde_json::from_str(
			r#"{"oauth_base_uri":"accounts.zoho.eu","client_id":"id","client_secret":"s3cret","grant_token":"1000.abc"}"#,
		)
		.expect("Config should deserialize.");

		assert_eq!(config.base_uri(), "accounts.zoho.eu");
		assert_eq!(config.grant_token().expose(), "1000.abc");
		assert!(!format!("{config:?}").contains("s3cret"));

		let err = serde_json::from_str::<OAuthConfig>(
			r#"{"base_uri":"accounts.zoho.eu","client_id":"","client_secret":"s","grant_token":"g"}"#,
		)
		.expect_err("Empty client id must fail deserialization.");

		assert!(err.to_string().contains("client_id"));
	}
}

//! Redacting wrapper for client secrets, grant codes, and tokens.

// crates.io
use oauth2::http::HeaderValue;
// self
use crate::_prelude::*;

const REDACTED: &str = "<redacted>";

/// Secret string whose formatters never print its contents.
///
/// Every credential the transport handles passes through this type, so the `Debug` output of a
/// config, a credential pair, or the transport itself is safe to log. Only the token endpoint query
/// and the `Authorization` header read the value through [`TokenSecret::expose`].
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Plain value, for the wire only.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns true for the empty string.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Builds a sensitive `Bearer <secret>` header value.
	///
	/// Returns `None` when the secret holds bytes an HTTP header cannot carry.
	pub(crate) fn bearer(&self) -> Option<HeaderValue> {
		let mut value = HeaderValue::try_from(format!("Bearer {}", self.0)).ok()?;

		value.set_sensitive(true);

		Some(value)
	}
}
impl From<String> for TokenSecret {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl From<&str> for TokenSecret {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "TokenSecret({REDACTED})")
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(REDACTED)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn formatters_never_print_the_value() {
		let secret = TokenSecret::new("1000.grant-code");

		assert_eq!(format!("{secret:?}"), "TokenSecret(<redacted>)");
		assert_eq!(format!("{secret}"), "<redacted>");
		assert_eq!(secret.expose(), "1000.grant-code");
	}

	#[test]
	fn bearer_header_is_sensitive_and_header_safe() {
		let header = TokenSecret::from("A1").bearer().expect("Plain token should fit a header.");

		assert_eq!(header, "Bearer A1");
		assert!(header.is_sensitive());
		assert!(TokenSecret::from("A\r\n1").bearer().is_none());
	}

	#[test]
	fn deserializes_from_a_plain_string() {
		let secret: TokenSecret =
			serde_json::from_str("\"s3cret\"").expect("Secret should deserialize.");

		assert_eq!(secret, TokenSecret::from("s3cret"));
		assert!(TokenSecret::default().is_empty());
	}
}

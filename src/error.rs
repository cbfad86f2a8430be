//! Error types surfaced by the authenticating transport and its token exchanges.

// self
use crate::{_prelude::*, auth::GrantType};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed, thread-safe error used to carry foreign failures unchanged.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error returned by [`AuthenticatingTransport::send`](crate::transport::AuthenticatingTransport::send).
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The wrapped transport failed; the original error is boxed unchanged.
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Token endpoint answered with a status other than `200 OK`.
	#[error(
		"Token endpoint denied the {grant} exchange with HTTP {status}; check the OAuth configuration."
	)]
	AccessDenied {
		/// Grant that was being exchanged.
		grant: GrantType,
		/// HTTP status code returned by the token endpoint.
		status: u16,
	},
	/// Token endpoint answered `200 OK` with an `error` member (bad or expired grant).
	#[error("Token endpoint rejected the {grant} grant: {reason}.")]
	InvalidGrant {
		/// Grant that was being exchanged.
		grant: GrantType,
		/// Value of the `error` member.
		reason: String,
	},
	/// Token endpoint answered `200 OK` with a body that does not carry usable credentials.
	#[error(transparent)]
	MalformedCredentialResponse(#[from] MalformedResponseError),
}

/// Configuration and construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A required option was empty.
	#[error("The `{field}` option must not be empty.")]
	MissingField {
		/// Name of the empty option.
		field: &'static str,
	},
	/// OAuth base URI is not a bare `host[:port]` authority.
	#[error("OAuth base URI `{base_uri}` must be a bare host, optionally with a port.")]
	InvalidBaseUri {
		/// Offending base URI.
		base_uri: String,
	},
	/// Token endpoint URL derived from the base URI does not parse.
	#[error("Token endpoint URL for `{base_uri}` is invalid.")]
	InvalidTokenEndpoint {
		/// Offending base URI.
		base_uri: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Token exchange started without cached credentials to refresh.
	#[error("No refresh token is held; credentials must be acquired first.")]
	MissingRefreshToken,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures raised by the wrapped transport.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// The wrapped transport returned an error while dispatching a request.
	#[error("HTTP transport failed while dispatching the request.")]
	Network {
		/// Original transport error; downcast to recover the concrete type.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Returns the original transport error when it has type `E`.
	pub fn downcast_ref<E>(&self) -> Option<&E>
	where
		E: 'static + std::error::Error,
	{
		match self {
			Self::Network { source } => source.downcast_ref::<E>(),
		}
	}
}

/// A `200 OK` token response that does not carry a usable credential pair.
#[derive(Debug, ThisError)]
pub enum MalformedResponseError {
	/// Body is not valid JSON.
	#[error("Token endpoint returned malformed JSON during the {grant} exchange.")]
	Syntax {
		/// Grant that was being exchanged.
		grant: GrantType,
		/// JSON syntax failure.
		#[source]
		source: serde_json::Error,
	},
	/// A token field is missing or is not a string.
	#[error("Token endpoint response lacks usable token fields during the {grant} exchange.")]
	Fields {
		/// Grant that was being exchanged.
		grant: GrantType,
		/// Field-level failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Body is valid JSON but not an object.
	#[error("Token endpoint returned a non-object JSON body during the {grant} exchange.")]
	NotAnObject {
		/// Grant that was being exchanged.
		grant: GrantType,
	},
	/// A token cannot be carried in an HTTP header.
	#[error("Token endpoint returned an unusable `{field}` during the {grant} exchange.")]
	InvalidToken {
		/// Grant that was being exchanged.
		grant: GrantType,
		/// Name of the offending field.
		field: &'static str,
	},
}

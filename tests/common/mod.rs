//! Scripted in-memory [`HttpTransport`] shared by the integration tests.

#![allow(dead_code)]

// std
use std::{
	collections::VecDeque,
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
};
// crates.io
use oauth2_authenticator::{
	config::OAuthConfig,
	http::{HttpRequest, HttpResponse, HttpTransport, TransportFuture},
	oauth2::http::{Method, StatusCode, Uri, header::AUTHORIZATION},
};
use parking_lot::Mutex;

pub const BASE_URI: &str = "accounts.zoho.com";
pub const CLIENT_ID: &str = "1000.CLIENT";
pub const CLIENT_SECRET: &str = "client-secret";
pub const GRANT_TOKEN: &str = "1000.grant";

pub const ACQUIRE_QUERY: &str =
	"client_id=1000.CLIENT&client_secret=client-secret&code=1000.grant&grant_type=authorization_code";

pub fn refresh_query(refresh_token: &str) -> String {
	format!(
		"client_id=1000.CLIENT&client_secret=client-secret&refresh_token={refresh_token}&grant_type=refresh_token"
	)
}

pub fn config() -> OAuthConfig {
	OAuthConfig::new(BASE_URI, CLIENT_ID, CLIENT_SECRET, GRANT_TOKEN)
		.expect("Test OAuth config should be valid.")
}

/// API request used by the tests; carries its own headers to prove they survive decoration.
pub fn api_request() -> HttpRequest {
	let mut request = HttpRequest::new(b"{\"data\":[]}".to_vec());

	*request.method_mut() = Method::POST;
	*request.uri_mut() = "https://www.zohoapis.com/crm/v2/Leads".parse().expect("API URI parses.");
	request.headers_mut().insert("x-trace", "trace-1".parse().expect("Header value parses."));

	request
}

pub fn response(status: u16, body: &str) -> HttpResponse {
	let mut response = HttpResponse::new(body.as_bytes().to_vec());

	*response.status_mut() = StatusCode::from_u16(status).expect("Status code should be valid.");

	response
}

pub fn tokens(access: &str, refresh: &str) -> HttpResponse {
	response(200, &format!("{{\"access_token\":\"{access}\",\"refresh_token\":\"{refresh}\"}}"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedFailure {
	/// Simulated network failure.
	ConnectionReset,
	/// More dispatches happened than the test scripted.
	Exhausted,
}
impl Display for ScriptedFailure {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::ConnectionReset => write!(f, "Connection reset by peer."),
			Self::Exhausted => write!(f, "No scripted response left."),
		}
	}
}
impl StdError for ScriptedFailure {}

/// Snapshot of a dispatched request.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
	pub method: Method,
	pub uri: Uri,
	pub authorization: Option<String>,
	pub trace: Option<String>,
	pub body: Vec<u8>,
}
impl RecordedRequest {
	pub fn is_token_request(&self) -> bool {
		self.uri.path() == "/oauth/v2/token"
	}
}

enum Scripted {
	Respond(HttpResponse),
	Fail(ScriptedFailure),
}

/// Answers dispatches from a queue and records every request it receives.
#[derive(Default)]
pub struct ScriptedTransport {
	script: Mutex<VecDeque<Scripted>>,
	recorded: Mutex<Vec<RecordedRequest>>,
}
impl ScriptedTransport {
	pub fn new(responses: impl IntoIterator<Item = HttpResponse>) -> Self {
		let transport = Self::default();

		for response in responses {
			transport.push(response);
		}

		transport
	}

	pub fn push(&self, response: HttpResponse) {
		self.script.lock().push_back(Scripted::Respond(response));
	}

	pub fn push_failure(&self, failure: ScriptedFailure) {
		self.script.lock().push_back(Scripted::Fail(failure));
	}

	pub fn recorded(&self) -> Vec<RecordedRequest> {
		self.recorded.lock().clone()
	}

	pub fn token_requests(&self) -> Vec<RecordedRequest> {
		self.recorded().into_iter().filter(RecordedRequest::is_token_request).collect()
	}

	pub fn api_requests(&self) -> Vec<RecordedRequest> {
		self.recorded().into_iter().filter(|request| !request.is_token_request()).collect()
	}

	pub fn remaining(&self) -> usize {
		self.script.lock().len()
	}
}
impl HttpTransport for ScriptedTransport {
	type Error = ScriptedFailure;

	fn send(&self, request: HttpRequest) -> TransportFuture<'_, Self::Error> {
		let header = |name: &str| {
			request.headers().get(name).and_then(|value| value.to_str().ok()).map(str::to_owned)
		};

		self.recorded.lock().push(RecordedRequest {
			method: request.method().clone(),
			uri: request.uri().clone(),
			authorization: header(AUTHORIZATION.as_str()),
			trace: header("x-trace"),
			body: request.body().clone(),
		});

		let next = self.script.lock().pop_front();

		Box::pin(async move {
			match next {
				Some(Scripted::Respond(response)) => Ok(response),
				Some(Scripted::Fail(failure)) => Err(failure),
				None => Err(ScriptedFailure::Exhausted),
			}
		})
	}
}

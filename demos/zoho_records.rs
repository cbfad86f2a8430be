//! Demonstrates wrapping the default reqwest transport so CRM calls carry bearer tokens that are
//! acquired on first use and refreshed once when the API answers `401`.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use oauth2_authenticator::{
	config::OAuthConfig,
	http::{HttpRequest, ReqwestHttpClient},
	oauth2::http::Method,
	reqwest::{Client, redirect::Policy},
	transport::{AuthenticatingTransport, ReqwestAuthenticatingTransport},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/v2/token").query_param("grant_type", "authorization_code");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"demo-access\",\"refresh_token\":\"demo-refresh\"}");
		})
		.await;
	let records_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/crm/v2/Leads").header("authorization", "Bearer demo-access");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"data\":[{\"Last_Name\":\"Lau\"}]}");
		})
		.await;
	let config = OAuthConfig::new(
		server.address().to_string(),
		"1000.DEMO",
		"demo-secret",
		"1000.demo-grant",
	)?;
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.redirect(Policy::none())
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let transport: ReqwestAuthenticatingTransport =
		AuthenticatingTransport::with_http_client(http_client, config);

	for attempt in 1..=2 {
		let mut request = HttpRequest::new(Vec::new());

		*request.method_mut() = Method::GET;
		*request.uri_mut() = server.url("/crm/v2/Leads").parse()?;

		let response = transport.send(request).await?;

		println!(
			"Attempt {attempt}: HTTP {} with body {}.",
			response.status(),
			String::from_utf8_lossy(response.body())
		);
	}

	token_mock.assert_calls_async(1).await;
	records_mock.assert_calls_async(2).await;

	println!(
		"Token endpoint was called {} time(s) for two API calls.",
		transport.exchange_metrics().acquisition().attempts
	);

	Ok(())
}

//! Shared fixtures for the integration suites: a client wired to an `httpmock` server plus
//! canned sandbox answers.

#![allow(dead_code)]

// crates.io
use httpmock::{Mock, prelude::*};
// self
use open_banking_aisp::{
	config::AispConfig,
	flows::AispClient,
	http::ReqwestHttpClient,
	reqwest::{Client, redirect::Policy},
	url::Url,
};

pub const CLIENT_ID: &str = "C_sandbox-client";
pub const CLIENT_SECRET: &str = "sandbox-secret";
pub const REDIRECT_URI: &str = "https://balance-check.com";
pub const APP_TOKEN: &str = "app-token";
pub const USER_TOKEN: &str = "user-token";
pub const CONSENT_ID: &str = "consent-123";
pub const AUTH_CODE: &str = "abc123";
pub const ACCOUNTS_PATH: &str = "/open-banking/v4.0/aisp/accounts";
pub const CONSENT_PATH: &str = "/open-banking/v4.0/aisp/account-access-consents";

/// Configuration pointing both base URLs at `server`.
pub fn build_config(server: &MockServer) -> AispConfig {
	let base = Url::parse(&server.base_url()).expect("Mock server URL should parse.");

	AispConfig::new(CLIENT_ID, CLIENT_SECRET, REDIRECT_URI)
		.expect("Test configuration should validate.")
		.with_base_url(base.clone())
		.expect("Mock base URL should validate.")
		.with_auth_base_url(base)
		.expect("Mock auth base URL should validate.")
}

/// Client that never follows redirects, talking to `server`.
pub fn build_client(server: &MockServer) -> AispClient {
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.redirect(Policy::none())
			.build()
			.expect("Test reqwest client should build."),
	);

	AispClient::with_http_client(build_config(server), http_client)
}

pub fn token_body(token: &str, scope: &str) -> String {
	format!(
		"{{\"access_token\":\"{token}\",\"token_type\":\"Bearer\",\"expires_in\":600,\"scope\":\"{scope}\"}}"
	)
}

pub fn accounts_path(account_id: &str, resource: &str) -> String {
	format!("{ACCOUNTS_PATH}/{account_id}/{resource}")
}

pub async fn mock_app_token(server: &MockServer) -> Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/token")
				.form_urlencoded_tuple("grant_type", "client_credentials");
			then.status(200)
				.header("content-type", "application/json")
				.body(token_body(APP_TOKEN, "accounts"));
		})
		.await
}

pub async fn mock_user_token(server: &MockServer) -> Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/token")
				.form_urlencoded_tuple("grant_type", "authorization_code")
				.form_urlencoded_tuple("code", AUTH_CODE);
			then.status(200)
				.header("content-type", "application/json")
				.body(token_body(USER_TOKEN, "openid accounts"));
		})
		.await
}

pub async fn mock_consent(server: &MockServer) -> Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(POST)
				.path(CONSENT_PATH)
				.header("authorization", format!("Bearer {APP_TOKEN}"));
			then.status(201).header("content-type", "application/json").body(format!(
				"{{\"Data\":{{\"ConsentId\":\"{CONSENT_ID}\",\"Status\":\"AwaitingAuthorisation\",\"CreationDateTime\":\"2024-05-01T09:00:00+00:00\"}},\"Risk\":{{}}}}"
			));
		})
		.await
}

/// Authorize endpoint answering with a code-bearing redirect straight away.
pub async fn mock_authorize_with_code(server: &MockServer) -> Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(GET).path("/authorize").query_param("request", CONSENT_ID);
			then.status(302)
				.header("location", format!("{REDIRECT_URI}?state=ABC&code={AUTH_CODE}&id_token=x"));
		})
		.await
}

/// Runs the first two steps so the session holds the app token and the consent id.
pub async fn client_with_consent(server: &MockServer) -> AispClient {
	mock_app_token(server).await;
	mock_consent(server).await;

	let mut client = build_client(server);

	client.get_client_credentials_token().await.expect("App token should be issued.");
	client.create_account_consent().await.expect("Consent should be created.");

	client
}

//! Token-endpoint facade over the `oauth2` crate.
//!
//! Both grants authenticate with `client_id`/`client_secret` in the form body and go
//! through the caller's [`AispHttpClient`], so the exchange shares the transport (and its
//! no-redirect policy) with every other step.

pub use oauth2;

// crates.io
use oauth2::{
	AuthType, AuthorizationCode as OAuthCode, ClientId, ClientSecret, EndpointNotSet, EndpointSet,
	HttpClientError, RedirectUrl, RequestTokenError, Scope, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicErrorResponse, BasicRequestTokenError, BasicTokenResponse},
};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, AuthorizationCode, GrantType},
	config::AispConfig,
	error::{ConfigError, ResponseError},
	http::{self, AispHttpClient, ResponseMetadata, ResponseMetadataSlot},
	obs::StepKind,
};

/// Scope requested with the client-credentials grant.
pub const CLIENT_CREDENTIALS_SCOPE: &str = "accounts";

type ConfiguredBasicClient =
	BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

pub(crate) struct TokenFacade<'a, C>
where
	C: ?Sized + AispHttpClient,
{
	oauth_client: ConfiguredBasicClient,
	http_client: &'a C,
}
impl<'a, C> TokenFacade<'a, C>
where
	C: ?Sized + AispHttpClient,
{
	pub(crate) fn from_config(config: &AispConfig, http_client: &'a C) -> Result<Self> {
		let token_url = TokenUrl::new(config.token_url()?.to_string())
			.map_err(|source| ConfigError::InvalidEndpoint { source })?;
		let redirect_url = RedirectUrl::new(config.redirect_uri.clone())
			.map_err(|source| ConfigError::InvalidEndpoint { source })?;
		let oauth_client = BasicClient::new(ClientId::new(config.client_id.clone()))
			.set_client_secret(ClientSecret::new(config.client_secret.expose().to_owned()))
			.set_token_uri(token_url)
			.set_redirect_uri(redirect_url)
			.set_auth_type(AuthType::RequestBody);

		Ok(Self { oauth_client, http_client })
	}

	/// `grant_type=client_credentials`, `client_id`, `client_secret`, `scope`.
	pub(crate) async fn exchange_client_credentials(&self, scope: &str) -> Result<AccessToken> {
		const GRANT: GrantType = GrantType::ClientCredentials;

		let meta = ResponseMetadataSlot::default();
		let handle = self.http_client.with_metadata(meta.clone());
		let result = self
			.oauth_client
			.exchange_client_credentials()
			.add_scope(Scope::new(scope.to_owned()))
			.request_async(&handle)
			.await;

		match result {
			Ok(response) => map_token_response(GRANT, response),
			Err(err) => map_request_error(GRANT, meta.take(), err),
		}
	}

	/// `grant_type=authorization_code`, `code`, `client_id`, `client_secret`, `redirect_uri`.
	pub(crate) async fn exchange_code(&self, code: &AuthorizationCode) -> Result<AccessToken> {
		const GRANT: GrantType = GrantType::AuthorizationCode;

		let meta = ResponseMetadataSlot::default();
		let handle = self.http_client.with_metadata(meta.clone());
		let result = self
			.oauth_client
			.exchange_code(OAuthCode::new(code.expose().to_owned()))
			.request_async(&handle)
			.await;

		match result {
			Ok(response) => map_token_response(GRANT, response),
			Err(err) => map_request_error(GRANT, meta.take(), err),
		}
	}
}

fn map_token_response(grant: GrantType, response: BasicTokenResponse) -> Result<AccessToken> {
	let token_type: &str = response.token_type().as_ref();
	let mut token =
		AccessToken::new(grant, response.access_token().secret().to_owned(), token_type);

	if let Some(expires_in) = response.expires_in() {
		let expires_in =
			Duration::try_from(expires_in).map_err(|_| ResponseError::ExpiresInOutOfRange)?;

		token = token.with_expires_in(expires_in);
	}
	if let Some(scopes) = response.scopes() {
		let joined = scopes.iter().map(|scope| scope.as_str()).collect::<Vec<_>>().join(" ");

		token = token.with_scope(joined);
	}

	Ok(token)
}

// `oauth2` only accepts HTTP 200 and parses any other status as an error body, so a
// non-200 2xx carrying a token lands here as a parse failure.
fn map_request_error<E>(
	grant: GrantType,
	meta: Option<ResponseMetadata>,
	err: BasicRequestTokenError<HttpClientError<E>>,
) -> Result<AccessToken>
where
	E: 'static + Send + Sync + StdError,
{
	let status = meta.and_then(|value| value.status);
	let err = match err {
		RequestTokenError::ServerResponse(response) =>
			map_server_response_error(grant, response, status),
		RequestTokenError::Request(error) => http::map_client_error(step_of(grant), error),
		RequestTokenError::Parse(_, body) if status.is_some_and(is_success) =>
			return decode_token_body(grant, status, &body),
		RequestTokenError::Parse(source, body) => ResponseError::TokenResponseParse {
			grant: grant.as_str(),
			source,
			status,
			body: http::body_preview(&body),
		}
		.into(),
		RequestTokenError::Other(message) =>
			ResponseError::TokenEndpoint { grant: grant.as_str(), message, status }.into(),
	};

	Err(err)
}

fn decode_token_body(grant: GrantType, status: Option<u16>, body: &[u8]) -> Result<AccessToken> {
	let mut de = serde_json::Deserializer::from_slice(body);
	let response = serde_path_to_error::deserialize::<_, BasicTokenResponse>(&mut de).map_err(
		|source| ResponseError::TokenResponseParse {
			grant: grant.as_str(),
			source,
			status,
			body: http::body_preview(body),
		},
	)?;

	map_token_response(grant, response)
}

fn is_success(status: u16) -> bool {
	(200..300).contains(&status)
}

fn map_server_response_error(
	grant: GrantType,
	response: BasicErrorResponse,
	status: Option<u16>,
) -> Error {
	let code = response.error().as_ref().to_string();
	let message = match response.error_description() {
		Some(description) => format!("{code}: {description}"),
		None => code,
	};

	ResponseError::TokenEndpoint { grant: grant.as_str(), message, status }.into()
}

fn step_of(grant: GrantType) -> StepKind {
	match grant {
		GrantType::ClientCredentials => StepKind::ClientCredentials,
		GrantType::AuthorizationCode => StepKind::CodeExchange,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::http::ReqwestHttpClient;

	fn config() -> AispConfig {
		AispConfig::new("C_client", "secret", "http://balance-check.com")
			.expect("Config should validate.")
	}

	#[test]
	fn facade_builds_from_config() {
		let http_client = ReqwestHttpClient::new().expect("Client should build.");

		assert!(TokenFacade::from_config(&config(), &http_client).is_ok());
	}

	#[test]
	fn token_response_keeps_metadata() {
		let response: BasicTokenResponse = serde_json::from_str(
			r#"{"access_token":"t-1","token_type":"Bearer","expires_in":300,"scope":"openid accounts"}"#,
		)
		.expect("Token response should decode.");
		let token = map_token_response(GrantType::AuthorizationCode, response)
			.expect("Token response should map.");

		assert_eq!(token.secret.expose(), "t-1");
		assert_eq!(token.token_type.to_ascii_lowercase(), "bearer");
		assert_eq!(token.expires_in, Some(Duration::seconds(300)));
		assert_eq!(token.scope.as_deref(), Some("openid accounts"));
	}

	#[test]
	fn server_errors_carry_code_and_description() {
		let response: BasicErrorResponse = serde_json::from_str(
			r#"{"error":"invalid_client","error_description":"bad secret"}"#,
		)
		.expect("Error response should decode.");
		let err = map_server_response_error(GrantType::ClientCredentials, response, Some(401));

		assert!(matches!(
			err,
			Error::Response(ResponseError::TokenEndpoint { status: Some(401), ref message, .. })
				if message == "invalid_client: bad secret"
		));
	}

	#[test]
	fn non_200_success_body_is_decoded_as_a_token() {
		let token = decode_token_body(
			GrantType::ClientCredentials,
			Some(201),
			br#"{"access_token":"t-201","token_type":"Bearer","expires_in":600}"#,
		)
		.expect("A 2xx token body should map.");

		assert_eq!(token.secret.expose(), "t-201");
		assert_eq!(token.expires_in, Some(Duration::seconds(600)));
		assert!(matches!(
			decode_token_body(GrantType::ClientCredentials, Some(201), br#"{"token_type":"Bearer"}"#),
			Err(Error::Response(ResponseError::TokenResponseParse { status: Some(201), .. }))
		));
		assert!(!is_success(302));
	}
}

//! Step 3: sandbox auto-approval of the consent.
//!
//! The authorize endpoint is called with `authorization_mode=AUTO_POSTMAN`, which skips the
//! login UI. The code then arrives in one of three shapes, all handled without following
//! redirects automatically:
//!
//! 1. the first redirect's `Location` already carries `code=`;
//! 2. the first redirect points at a second endpoint that answers `200` with a JSON body
//!    whose `redirectUri` carries `code=`;
//! 3. that second endpoint redirects again and its `Location` carries `code=`.
//!
//! Codes are pulled out with [`extract_authorization_code`], a substring match rather than
//! query parsing, because the sandbox does not always hand back a well-formed query string.

// crates.io
use oauth2::{HttpResponse, http::StatusCode};
// self
use crate::{
	_prelude::*,
	auth::{AuthorizationCode, ConsentId},
	error::AuthorizationError,
	flows::{AispClient, common},
	http::{self, AispHttpClient},
	obs::StepKind,
};

const KIND: StepKind = StepKind::Authorization;
const CODE_MARKER: &str = "code=";

impl<C> AispClient<C>
where
	C: ?Sized + AispHttpClient,
{
	/// Walks the auto-approval redirect chain for the stored consent as `username`.
	pub async fn authorize_consent(&mut self, username: &str) -> Result<AuthorizationCode> {
		common::run_step(KIND, "authorize_consent", async {
			let consent_id = self.session.require_consent()?;
			let url = self.authorization_request_url(consent_id, username)?;
			let code = walk_redirects(self.http_client.as_ref(), &url).await?;

			self.session.mark_authorized();

			Ok(code)
		})
		.await
	}

	/// Authorize URL with the sandbox auto-approval query for `consent_id`.
	pub fn authorization_request_url(&self, consent_id: &ConsentId, username: &str) -> Result<Url> {
		let mut url = self.config.authorize_url()?;

		url.query_pairs_mut()
			.append_pair("client_id", &self.config.client_id)
			.append_pair("response_type", "code id_token")
			.append_pair("scope", "openid accounts")
			.append_pair("redirect_uri", &self.config.redirect_uri)
			.append_pair("state", "ABC")
			.append_pair("request", consent_id.as_str())
			.append_pair("authorization_mode", "AUTO_POSTMAN")
			.append_pair("authorization_username", &self.config.authorization_username(username))
			.append_pair("authorization_result", "APPROVED")
			.append_pair("authorization_accounts", "*");

		Ok(url)
	}
}

/// Returns the text between the first `code=` and the next `&`.
///
/// `None` when the marker is absent or the value is empty.
///
/// ```
/// use open_banking_aisp::flows::extract_authorization_code;
///
/// assert_eq!(
/// 	extract_authorization_code("https://app.example/cb?state=ABC&code=abc123&id_token=x"),
/// 	Some("abc123")
/// );
/// assert_eq!(extract_authorization_code("https://app.example/cb#code=abc123"), Some("abc123"));
/// assert_eq!(extract_authorization_code("https://app.example/cb?state=ABC"), None);
/// ```
pub fn extract_authorization_code(location: &str) -> Option<&str> {
	let code = location.split(CODE_MARKER).nth(1)?.split('&').next()?;

	if code.is_empty() { None } else { Some(code) }
}

async fn walk_redirects<C>(http_client: &C, url: &Url) -> Result<AuthorizationCode>
where
	C: ?Sized + AispHttpClient,
{
	let first = http::send(http_client, KIND, http::get_request(url, None)?).await?;

	if !http::is_redirect(first.status()) {
		return Err(unexpected_status(&first).into());
	}

	let location = redirect_location(&first)?;

	if location.contains(CODE_MARKER) {
		return code_from(location);
	}

	let next = url
		.join(location)
		.map_err(|source| AuthorizationError::InvalidLocation { location: location.into(), source })?;

	#[cfg(feature = "tracing")]
	tracing::debug!(hop = %next, "Following authorization redirect.");

	let second = http::send(http_client, KIND, http::get_request(&next, None)?).await?;
	let status = second.status();

	if status == StatusCode::OK {
		return code_from_json(second.body());
	}
	if http::is_redirect(status) {
		return code_from(redirect_location(&second)?);
	}

	Err(unexpected_status(&second).into())
}

fn code_from_json(body: &[u8]) -> Result<AuthorizationCode> {
	let value = serde_json::from_slice::<serde_json::Value>(body)
		.map_err(|_| AuthorizationError::NotJson { body: http::body_preview(body) })?;
	let redirect_uri = value
		.get("redirectUri")
		.and_then(serde_json::Value::as_str)
		.ok_or_else(|| AuthorizationError::MissingRedirectUri { body: http::body_preview(body) })?;

	code_from(redirect_uri)
}

fn code_from(location: &str) -> Result<AuthorizationCode> {
	extract_authorization_code(location)
		.map(AuthorizationCode::new)
		.ok_or_else(|| AuthorizationError::MissingCode { location: location.into() }.into())
}

fn redirect_location(response: &HttpResponse) -> Result<&str, AuthorizationError> {
	http::location(response)
		.filter(|location| !location.is_empty())
		.ok_or(AuthorizationError::MissingLocation { status: response.status().as_u16() })
}

fn unexpected_status(response: &HttpResponse) -> AuthorizationError {
	AuthorizationError::UnexpectedStatus {
		status: response.status().as_u16(),
		body: http::body_preview(response.body()),
	}
}

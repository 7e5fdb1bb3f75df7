//! Access tokens issued by the token endpoint.

// self
use crate::{_prelude::*, auth::token::secret::TokenSecret};

/// OAuth 2.0 grants used by the walkthrough.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// App-scoped token used to create the consent.
	ClientCredentials,
	/// User-scoped token bound to the authorized consent.
	AuthorizationCode,
}
impl GrantType {
	/// Returns the RFC 6749 identifier for the grant type.
	pub fn as_str(self) -> &'static str {
		match self {
			GrantType::ClientCredentials => "client_credentials",
			GrantType::AuthorizationCode => "authorization_code",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Bearer token plus the metadata echoed by the token endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
	/// Grant that produced this token.
	pub grant: GrantType,
	/// Bearer secret; callers must avoid logging it.
	pub secret: TokenSecret,
	/// `token_type` field (usually `Bearer`).
	pub token_type: String,
	/// `expires_in` field, when returned.
	pub expires_in: Option<Duration>,
	/// Space-delimited `scope` field, when returned.
	pub scope: Option<String>,
	/// Local instant the response was processed.
	pub issued_at: OffsetDateTime,
}
impl AccessToken {
	/// Creates a token record issued now.
	pub fn new(grant: GrantType, secret: impl Into<String>, token_type: impl Into<String>) -> Self {
		Self {
			grant,
			secret: TokenSecret::new(secret),
			token_type: token_type.into(),
			expires_in: None,
			scope: None,
			issued_at: OffsetDateTime::now_utc(),
		}
	}

	/// Sets the relative lifetime.
	pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
		self.expires_in = Some(expires_in);

		self
	}

	/// Sets the granted scope string.
	pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = Some(scope.into());

		self
	}

	/// Returns the `Authorization` header value.
	pub fn bearer_header(&self) -> String {
		format!("Bearer {}", self.secret.expose())
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("grant", &self.grant)
			.field("secret", &self.secret)
			.field("token_type", &self.token_type)
			.field("expires_in", &self.expires_in)
			.field("scope", &self.scope)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn debug_output_redacts_the_bearer() {
		let token = AccessToken::new(GrantType::ClientCredentials, "app-token", "Bearer")
			.with_expires_in(Duration::seconds(300))
			.with_scope("accounts");
		let rendered = format!("{token:?}");

		assert!(!rendered.contains("app-token"));
		assert_eq!(token.bearer_header(), "Bearer app-token");
		assert_eq!(token.grant.as_str(), "client_credentials");
	}
}

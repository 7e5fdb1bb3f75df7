//! Mutable per-run session state owned by [`AispClient`](crate::flows::AispClient).

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ConsentId},
	error::SessionError,
};

/// Position in the walkthrough; advances by exactly one step per successful operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SessionStage {
	/// Nothing obtained yet.
	#[default]
	Unauthenticated,
	/// Client-credentials token stored.
	HasAppToken,
	/// Consent created and its id stored.
	HasConsent,
	/// Consent authorized; code handed back to the caller.
	HasAuthCode,
	/// Authorization code exchanged; user token replaced the app token.
	HasUserToken,
	/// Account data fetched and rendered.
	Done,
}
impl SessionStage {
	/// Returns a stable label.
	pub const fn as_str(self) -> &'static str {
		match self {
			SessionStage::Unauthenticated => "unauthenticated",
			SessionStage::HasAppToken => "has_app_token",
			SessionStage::HasConsent => "has_consent",
			SessionStage::HasAuthCode => "has_auth_code",
			SessionStage::HasUserToken => "has_user_token",
			SessionStage::Done => "done",
		}
	}
}
impl Display for SessionStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Bearer token and consent id for one run. Nothing here is persisted.
#[derive(Clone, Debug, Default)]
pub struct Session {
	stage: SessionStage,
	access_token: Option<AccessToken>,
	consent_id: Option<ConsentId>,
}
impl Session {
	/// Current stage.
	pub fn stage(&self) -> SessionStage {
		self.stage
	}

	/// Most recently issued token; the user token once the code exchange succeeds.
	pub fn access_token(&self) -> Option<&AccessToken> {
		self.access_token.as_ref()
	}

	/// Consent created in this run.
	pub fn consent_id(&self) -> Option<&ConsentId> {
		self.consent_id.as_ref()
	}

	pub(crate) fn require_access_token(&self) -> Result<&AccessToken, SessionError> {
		self.access_token.as_ref().ok_or(SessionError::MissingAccessToken { stage: self.stage })
	}

	pub(crate) fn require_consent(&self) -> Result<&ConsentId, SessionError> {
		self.consent_id.as_ref().ok_or(SessionError::MissingConsent { stage: self.stage })
	}

	pub(crate) fn store_app_token(&mut self, token: AccessToken) {
		self.access_token = Some(token);
		self.stage = SessionStage::HasAppToken;
	}

	pub(crate) fn store_consent(&mut self, consent_id: ConsentId) {
		self.consent_id = Some(consent_id);
		self.stage = SessionStage::HasConsent;
	}

	pub(crate) fn mark_authorized(&mut self) {
		self.stage = SessionStage::HasAuthCode;
	}

	pub(crate) fn store_user_token(&mut self, token: AccessToken) {
		self.access_token = Some(token);
		self.stage = SessionStage::HasUserToken;
	}

	pub(crate) fn mark_done(&mut self) {
		self.stage = SessionStage::Done;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::auth::GrantType;

	#[test]
	fn user_token_overwrites_app_token() {
		let mut session = Session::default();

		assert_eq!(
			session.require_access_token().expect_err("Fresh session has no token."),
			SessionError::MissingAccessToken { stage: SessionStage::Unauthenticated }
		);

		session.store_app_token(AccessToken::new(GrantType::ClientCredentials, "app", "Bearer"));
		session.store_consent(ConsentId::new("consent-1").expect("Consent id should be valid."));
		session.mark_authorized();
		session.store_user_token(AccessToken::new(GrantType::AuthorizationCode, "user", "Bearer"));

		let token = session.require_access_token().expect("User token should be stored.");

		assert_eq!(token.secret.expose(), "user");
		assert_eq!(session.stage(), SessionStage::HasUserToken);
		assert_eq!(session.consent_id().map(|id| id.as_str()), Some("consent-1"));
	}

	#[test]
	fn consent_is_required_before_authorization() {
		let session = Session::default();

		assert!(matches!(
			session.require_consent(),
			Err(SessionError::MissingConsent { stage: SessionStage::Unauthenticated })
		));
	}
}

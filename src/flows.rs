//! The account-information walkthrough: one method per step on [`AispClient`], plus the
//! driver in [`pipeline`].

pub mod accounts;
pub mod authorize;
pub mod pipeline;

mod auth_code;
mod client_credentials;
mod common;
mod consent;

pub use accounts::*;
pub use authorize::*;
pub use pipeline::*;

// self
use crate::{
	_prelude::*,
	auth::Session,
	config::AispConfig,
	http::{AispHttpClient, ReqwestHttpClient},
};

/// Sequential AISP client owning the configuration and the run's [`Session`].
///
/// Steps must be called in walkthrough order; each one that needs the token or consent
/// from an earlier step fails with a [`SessionError`](crate::error::SessionError) instead of
/// sending a blank value. Nothing is retried and nothing outlives the instance.
pub struct AispClient<C = ReqwestHttpClient>
where
	C: ?Sized + AispHttpClient,
{
	/// HTTP transport used for every upstream request.
	pub http_client: Arc<C>,
	config: AispConfig,
	session: Session,
	transaction_display_limit: usize,
}
impl AispClient<ReqwestHttpClient> {
	/// Creates a client with its own redirect-free reqwest transport.
	pub fn new(config: AispConfig) -> Result<Self> {
		Ok(Self::with_http_client(config, ReqwestHttpClient::new()?))
	}
}
impl<C> AispClient<C>
where
	C: ?Sized + AispHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(config: AispConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self {
			http_client: http_client.into(),
			config,
			session: Session::default(),
			transaction_display_limit: DISPLAY_TRANSACTION_LIMIT,
		}
	}

	/// Overrides how many transactions per account [`AispClient::display_account_details`]
	/// fetches and prints.
	pub fn with_transaction_display_limit(mut self, limit: usize) -> Self {
		self.transaction_display_limit = limit;

		self
	}

	/// Configuration the client was built with.
	pub fn config(&self) -> &AispConfig {
		&self.config
	}

	/// Current session state.
	pub fn session(&self) -> &Session {
		&self.session
	}

	/// Transactions shown per account.
	pub fn transaction_display_limit(&self) -> usize {
		self.transaction_display_limit
	}
}
impl<C> Debug for AispClient<C>
where
	C: ?Sized + AispHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AispClient")
			.field("client_id", &self.config.client_id)
			.field("base_url", &self.config.base_url.as_str())
			.field("stage", &self.session.stage())
			.field("consent_id", &self.session.consent_id())
			.finish()
	}
}

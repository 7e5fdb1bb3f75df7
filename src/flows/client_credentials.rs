//! Step 1: app-scoped token via the client-credentials grant.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	flows::{AispClient, common},
	http::AispHttpClient,
	oauth::{CLIENT_CREDENTIALS_SCOPE, TokenFacade},
	obs::StepKind,
};

impl<C> AispClient<C>
where
	C: ?Sized + AispHttpClient,
{
	/// Requests a token with `scope=accounts` and stores it as the session bearer.
	///
	/// Any non-2xx answer, OAuth error body, or network failure is returned as-is; the
	/// session keeps whatever it held before.
	pub async fn get_client_credentials_token(&mut self) -> Result<AccessToken> {
		const KIND: StepKind = StepKind::ClientCredentials;

		common::run_step(KIND, "get_client_credentials_token", async {
			let facade = TokenFacade::from_config(&self.config, self.http_client.as_ref())?;
			let token = facade.exchange_client_credentials(CLIENT_CREDENTIALS_SCOPE).await?;

			self.session.store_app_token(token.clone());

			Ok(token)
		})
		.await
	}
}

//! Step 4: authorization-code exchange.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, AuthorizationCode},
	flows::{AispClient, common},
	http::AispHttpClient,
	oauth::TokenFacade,
	obs::StepKind,
};

impl<C> AispClient<C>
where
	C: ?Sized + AispHttpClient,
{
	/// Redeems `code` for a user-scoped token, which replaces the app token in the session.
	pub async fn exchange_authorization_code(
		&mut self,
		code: &AuthorizationCode,
	) -> Result<AccessToken> {
		const KIND: StepKind = StepKind::CodeExchange;

		common::run_step(KIND, "exchange_authorization_code", async {
			let facade = TokenFacade::from_config(&self.config, self.http_client.as_ref())?;
			let token = facade.exchange_code(code).await?;

			self.session.store_user_token(token.clone());

			Ok(token)
		})
		.await
	}
}

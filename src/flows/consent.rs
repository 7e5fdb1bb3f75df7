//! Step 2: account-access consent.

// self
use crate::{
	_prelude::*,
	aisp::{Consent, ConsentRequest, ConsentResponse},
	flows::{AispClient, common},
	http::{self, AispHttpClient},
	obs::StepKind,
};

impl<C> AispClient<C>
where
	C: ?Sized + AispHttpClient,
{
	/// Posts the fixed account-access permission set and stores the returned consent id.
	pub async fn create_account_consent(&mut self) -> Result<Consent> {
		const KIND: StepKind = StepKind::Consent;

		common::run_step(KIND, "create_account_consent", async {
			let token = self.session.require_access_token()?;
			let request = http::json_post_request(
				&self.config.consent_url()?,
				token,
				&ConsentRequest::account_access(),
			)?;
			let response: ConsentResponse =
				common::fetch_json(self.http_client.as_ref(), KIND, request).await?;
			let consent = response.data;

			self.session.store_consent(consent.consent_id.clone());

			Ok(consent)
		})
		.await
	}
}

//! Driver running the five steps in order and aborting at the first failure.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ConsentId},
	error::ResponseError,
	flows::AispClient,
	http::AispHttpClient,
	render,
};

/// What a completed walkthrough established.
#[derive(Clone, Debug)]
pub struct WalkthroughSummary {
	/// Consent authorized during the run.
	pub consent_id: ConsentId,
	/// User-scoped token left in the session.
	pub access_token: AccessToken,
	/// Number of accounts rendered.
	pub account_count: usize,
}

/// Runs token, consent, authorization, code exchange, and account display against the
/// client's configuration, writing the console walkthrough to `out`.
///
/// The first failing step prints a one-line notice and its error is returned unchanged;
/// server-side state such as an unauthorized consent is abandoned. A consent covering no
/// accounts fails step 5 with [`ResponseError::NoAccounts`]. Per-account balance and
/// transaction failures do not abort the run.
pub async fn run_walkthrough<C, W>(
	client: &mut AispClient<C>,
	out: &mut W,
) -> Result<WalkthroughSummary>
where
	C: ?Sized + AispHttpClient,
	W: Write,
{
	render::environment(out, client.config()).map_err(Error::render)?;

	render::banner(out, "STEP 1: Getting Client Credentials Token").map_err(Error::render)?;

	let app_token = abort_on_err(
		out,
		"Failed to get initial token",
		client.get_client_credentials_token().await,
	)?;

	render::token(out, &app_token).map_err(Error::render)?;
	render::banner(out, "STEP 2: Creating Account Access Consent").map_err(Error::render)?;

	let consent =
		abort_on_err(out, "Failed to create consent", client.create_account_consent().await)?;

	render::consent(out, &consent).map_err(Error::render)?;
	render::banner(out, "STEP 3: Authorizing Consent (Sandbox Auto-Approval)")
		.map_err(Error::render)?;

	let username = client.config().test_username.clone();
	let code = abort_on_err(
		out,
		"Failed to authorize consent",
		client.authorize_consent(&username).await,
	)?;

	render::authorization_code(out, &code).map_err(Error::render)?;
	render::banner(out, "STEP 4: Exchanging Authorization Code for Access Token")
		.map_err(Error::render)?;

	let user_token = abort_on_err(
		out,
		"Failed to exchange authorization code",
		client.exchange_authorization_code(&code).await,
	)?;

	render::token(out, &user_token).map_err(Error::render)?;
	render::banner(out, "STEP 5: Fetching Account Details").map_err(Error::render)?;

	let accounts = abort_on_err(out, "Failed to fetch accounts", client.get_accounts().await)?;

	render::account_count(out, accounts.len()).map_err(Error::render)?;

	if accounts.is_empty() {
		return abort_on_err(out, "Failed to fetch accounts", Err(ResponseError::NoAccounts.into()));
	}

	client.display_account_details(&accounts, out).await?;
	client.session.mark_done();
	render::success(out).map_err(Error::render)?;

	Ok(WalkthroughSummary {
		consent_id: consent.consent_id,
		access_token: user_token,
		account_count: accounts.len(),
	})
}

fn abort_on_err<T, W>(out: &mut W, message: &str, result: Result<T>) -> Result<T>
where
	W: Write,
{
	if result.is_err() {
		render::failure(out, message).map_err(Error::render)?;
	}

	result
}

//! Step 5: account, balance, and transaction reads plus their console rendering.

// self
use crate::{
	_prelude::*,
	aisp::{Account, AccountList, Balance, BalanceList, DataEnvelope, Transaction, TransactionList},
	auth::AccountId,
	flows::{AispClient, common},
	http::{self, AispHttpClient},
	obs::StepKind,
	render,
};

/// Transactions kept by [`AispClient::get_account_transactions`] callers that have no
/// preference.
pub const DEFAULT_TRANSACTION_LIMIT: usize = 10;
/// Transactions shown per account by [`AispClient::display_account_details`].
pub const DISPLAY_TRANSACTION_LIMIT: usize = 5;

impl<C> AispClient<C>
where
	C: ?Sized + AispHttpClient,
{
	/// Lists the accounts visible under the authorized consent.
	///
	/// A missing `Data.Account` array is an empty list, not an error.
	pub async fn get_accounts(&self) -> Result<Vec<Account>> {
		const KIND: StepKind = StepKind::Accounts;

		common::run_step(KIND, "get_accounts", async {
			let url = self.config.accounts_url()?;
			let envelope: DataEnvelope<AccountList> = self.get_json(KIND, &url).await?;

			Ok(envelope.into_inner().account)
		})
		.await
	}

	/// Balances of one account, in upstream order.
	pub async fn get_account_balances(&self, account_id: &AccountId) -> Result<Vec<Balance>> {
		const KIND: StepKind = StepKind::Balances;

		common::run_step(KIND, "get_account_balances", async {
			let url = self.config.balances_url(account_id)?;
			let envelope: DataEnvelope<BalanceList> = self.get_json(KIND, &url).await?;

			Ok(envelope.into_inner().balance)
		})
		.await
	}

	/// The first `limit` transactions of one account, in upstream order.
	pub async fn get_account_transactions(
		&self,
		account_id: &AccountId,
		limit: usize,
	) -> Result<Vec<Transaction>> {
		const KIND: StepKind = StepKind::Transactions;

		common::run_step(KIND, "get_account_transactions", async {
			let url = self.config.transactions_url(account_id)?;
			let envelope: DataEnvelope<TransactionList> = self.get_json(KIND, &url).await?;
			let mut transactions = envelope.into_inner().transaction;

			transactions.truncate(limit);

			Ok(transactions)
		})
		.await
	}

	/// Renders every account, fetching its balances and recent transactions one account at a
	/// time.
	///
	/// A failed balance or transaction read only drops that section for that account; the
	/// failure is logged and rendering moves on. Accounts without an `AccountId` print their
	/// identity block only. The only error returned is a failed write to `out`.
	pub async fn display_account_details<W>(&self, accounts: &[Account], out: &mut W) -> Result<()>
	where
		W: Write,
	{
		render::banner(out, "ACCOUNT DETAILS").map_err(Error::render)?;

		for (position, account) in accounts.iter().enumerate() {
			render::account(out, position + 1, account).map_err(Error::render)?;

			let Some(account_id) = account.account_id.as_ref() else {
				writeln!(out).map_err(Error::render)?;

				continue;
			};

			let limit = self.transaction_display_limit;
			let balances = self.get_account_balances(account_id).await.unwrap_or_default();

			if !balances.is_empty() {
				render::balances(out, &balances).map_err(Error::render)?;
			}

			let transactions =
				self.get_account_transactions(account_id, limit).await.unwrap_or_default();

			if !transactions.is_empty() {
				render::transactions(out, &transactions, limit).map_err(Error::render)?;
			}

			writeln!(out).map_err(Error::render)?;
		}

		Ok(())
	}

	async fn get_json<T>(&self, step: StepKind, url: &Url) -> Result<T>
	where
		T: serde::de::DeserializeOwned,
	{
		let token = self.session.require_access_token()?;
		let request = http::get_request(url, Some(token))?;

		common::fetch_json(self.http_client.as_ref(), step, request).await
	}
}

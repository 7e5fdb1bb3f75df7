//! Balance resources.

// self
use crate::{
	_prelude::*,
	aisp::{Amount, CreditDebitIndicator},
	auth::AccountId,
};

/// Payload of `GET /accounts/{id}/balances`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BalanceList {
	/// Balances for the account.
	#[serde(default)]
	pub balance: Vec<Balance>,
}

/// One balance entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Balance {
	/// Owning account.
	pub account_id: Option<AccountId>,
	/// Balance type tag, e.g. `InterimAvailable`.
	#[serde(rename = "Type")]
	pub balance_type: Option<String>,
	/// Balance amount.
	pub amount: Option<Amount>,
	/// Whether the balance is in credit or debit.
	pub credit_debit_indicator: Option<CreditDebitIndicator>,
	/// Timestamp of the balance.
	pub date_time: Option<String>,
}

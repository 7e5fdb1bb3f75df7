//! Transaction resources.

// self
use crate::{
	_prelude::*,
	aisp::{Amount, CreditDebitIndicator},
	auth::AccountId,
};

/// Payload of `GET /accounts/{id}/transactions`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionList {
	/// Transactions in upstream order.
	#[serde(default)]
	pub transaction: Vec<Transaction>,
}

/// One booked or pending transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transaction {
	/// Owning account.
	pub account_id: Option<AccountId>,
	/// Upstream transaction identifier.
	pub transaction_id: Option<String>,
	/// `Booked` or `Pending`.
	pub status: Option<String>,
	/// Booking timestamp.
	pub booking_date_time: Option<String>,
	/// Transaction amount.
	pub amount: Option<Amount>,
	/// Direction of the movement.
	pub credit_debit_indicator: Option<CreditDebitIndicator>,
	/// Free-text description.
	pub transaction_information: Option<String>,
	/// Payment reference.
	pub transaction_reference: Option<String>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn transaction_decodes_upstream_field_names() {
		let txn: Transaction = serde_json::from_str(
			r#"{
				"AccountId": "a1",
				"BookingDateTime": "2024-05-01T10:00:00Z",
				"Amount": {"Amount": "42.50", "Currency": "GBP"},
				"CreditDebitIndicator": "Credit",
				"TransactionInformation": "Salary",
				"TransactionReference": "REF-1"
			}"#,
		)
		.expect("Transaction should decode.");
		let amount = txn.amount.expect("Amount should be present.");

		assert_eq!(amount.amount.as_deref(), Some("42.50"));
		assert_eq!(txn.credit_debit_indicator, Some(CreditDebitIndicator::Credit));
		assert_eq!(txn.transaction_reference.as_deref(), Some("REF-1"));
	}
}

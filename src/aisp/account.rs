//! Account resources.

// std
use std::slice;
// self
use crate::{_prelude::*, auth::AccountId};

/// Payload of `GET /accounts`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountList {
	/// Accounts visible under the consent.
	#[serde(default)]
	pub account: Vec<Account>,
}

/// One account as returned by the accounts endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Account {
	/// Upstream account identifier.
	pub account_id: Option<AccountId>,
	/// `Personal` or `Business`.
	pub account_type: Option<String>,
	/// e.g. `CurrentAccount`.
	pub account_sub_type: Option<String>,
	/// ISO 4217 currency code.
	pub currency: Option<String>,
	/// Customer-chosen label.
	pub nickname: Option<String>,
	/// e.g. `Enabled`.
	pub status: Option<String>,
	/// Account-number details.
	pub account: Option<AccountIdentifiers>,
}

/// Scheme-qualified account number.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountIdentifier {
	/// e.g. `UK.OBIE.SortCodeAccountNumber`.
	pub scheme_name: Option<String>,
	/// Scheme-specific identification.
	pub identification: Option<String>,
	/// Account holder name.
	pub name: Option<String>,
	/// Roll number or similar.
	pub secondary_identification: Option<String>,
}

/// The nested `Account` field arrives either as one object or as an array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountIdentifiers {
	/// Single object.
	One(AccountIdentifier),
	/// Array of any length.
	Many(Vec<AccountIdentifier>),
}
impl AccountIdentifiers {
	/// Views both shapes as a slice.
	pub fn as_slice(&self) -> &[AccountIdentifier] {
		match self {
			AccountIdentifiers::One(identifier) => slice::from_ref(identifier),
			AccountIdentifiers::Many(identifiers) => identifiers,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn nested_account_accepts_object_and_array() {
		let object: Account = serde_json::from_str(
			r#"{"AccountId":"a1","Account":{"SchemeName":"UK.OBIE.IBAN","Identification":"GB00"}}"#,
		)
		.expect("Object shape should decode.");
		let array: Account = serde_json::from_str(
			r#"{"AccountId":"a2","Account":[{"SchemeName":"S1"},{"SchemeName":"S2","Name":"Bob"}]}"#,
		)
		.expect("Array shape should decode.");

		let object_ids = object.account.expect("Object shape should be present.");
		let array_ids = array.account.expect("Array shape should be present.");

		assert_eq!(object_ids.as_slice().len(), 1);
		assert_eq!(object_ids.as_slice()[0].identification.as_deref(), Some("GB00"));
		assert_eq!(array_ids.as_slice().len(), 2);
		assert_eq!(array_ids.as_slice()[1].name.as_deref(), Some("Bob"));
	}

	#[test]
	fn unknown_fields_are_ignored() {
		let account: Account = serde_json::from_str(
			r#"{"AccountId":"a3","OpeningDate":"2020-01-01","Currency":"GBP"}"#,
		)
		.expect("Extra fields should be ignored.");

		assert_eq!(account.currency.as_deref(), Some("GBP"));
		assert!(account.account.is_none());
	}
}

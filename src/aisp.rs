//! Open Banking AISP wire models.
//!
//! Every resource wraps its payload under `Data`; the envelope and payload structs default
//! missing collections to empty so a sparse sandbox answer still decodes.

pub mod account;
pub mod balance;
pub mod consent;
pub mod transaction;

pub use account::*;
pub use balance::*;
pub use consent::*;
pub use transaction::*;

// self
use crate::_prelude::*;

/// `{"Data": ...}` wrapper shared by every AISP resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
	/// Wrapped payload.
	#[serde(rename = "Data", default)]
	pub data: T,
}
impl<T> DataEnvelope<T> {
	/// Unwraps the payload.
	pub fn into_inner(self) -> T {
		self.data
	}
}

/// Monetary amount; both fields stay decimal strings as sent upstream.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Amount {
	/// Decimal amount, e.g. `42.50`.
	pub amount: Option<String>,
	/// ISO 4217 currency code.
	pub currency: Option<String>,
}

/// `Credit` or `Debit`; any other label is kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CreditDebitIndicator {
	/// Money in.
	Credit,
	/// Money out.
	Debit,
	/// Unrecognised label.
	Other(String),
}
impl CreditDebitIndicator {
	/// Returns the wire label.
	pub fn as_str(&self) -> &str {
		match self {
			CreditDebitIndicator::Credit => "Credit",
			CreditDebitIndicator::Debit => "Debit",
			CreditDebitIndicator::Other(label) => label,
		}
	}

	/// Sign prefixed to amounts: `+` for credits, `-` otherwise.
	pub fn sign(&self) -> char {
		if matches!(self, CreditDebitIndicator::Credit) { '+' } else { '-' }
	}
}
impl From<String> for CreditDebitIndicator {
	fn from(value: String) -> Self {
		match value.as_str() {
			"Credit" => CreditDebitIndicator::Credit,
			"Debit" => CreditDebitIndicator::Debit,
			_ => CreditDebitIndicator::Other(value),
		}
	}
}
impl From<CreditDebitIndicator> for String {
	fn from(value: CreditDebitIndicator) -> Self {
		match value {
			CreditDebitIndicator::Other(label) => label,
			known => known.as_str().to_owned(),
		}
	}
}
impl Display for CreditDebitIndicator {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

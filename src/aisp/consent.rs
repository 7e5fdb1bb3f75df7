//! Account-access consent request and response bodies.

// self
use crate::{_prelude::*, auth::ConsentId};

/// Permissions requested by the walkthrough, in wire order.
pub const ACCOUNT_ACCESS_PERMISSIONS: [Permission; 12] = [
	Permission::ReadAccountsDetail,
	Permission::ReadBalances,
	Permission::ReadTransactionsCredits,
	Permission::ReadTransactionsDebits,
	Permission::ReadTransactionsDetail,
	Permission::ReadProducts,
	Permission::ReadBeneficiariesDetail,
	Permission::ReadDirectDebits,
	Permission::ReadOffers,
	Permission::ReadScheduledPaymentsDetail,
	Permission::ReadStandingOrdersDetail,
	Permission::ReadStatementsDetail,
];

/// AISP permission codes used by the consent request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
	/// Account list with account-number details.
	ReadAccountsDetail,
	/// Balances.
	ReadBalances,
	/// Incoming transactions.
	ReadTransactionsCredits,
	/// Outgoing transactions.
	ReadTransactionsDebits,
	/// Transaction descriptions and references.
	ReadTransactionsDetail,
	/// Product information.
	ReadProducts,
	/// Beneficiaries with account details.
	ReadBeneficiariesDetail,
	/// Direct debits.
	ReadDirectDebits,
	/// Offers.
	ReadOffers,
	/// Scheduled payments with payee details.
	ReadScheduledPaymentsDetail,
	/// Standing orders with payee details.
	ReadStandingOrdersDetail,
	/// Statements with amounts.
	ReadStatementsDetail,
}

/// `{"Data":{"Permissions":[...]},"Risk":{}}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConsentRequest {
	/// Requested permissions.
	#[serde(rename = "Data")]
	pub data: ConsentRequestData,
	/// Always an empty object for AISP.
	#[serde(rename = "Risk")]
	pub risk: serde_json::Map<String, serde_json::Value>,
}
impl ConsentRequest {
	/// Builds the request with [`ACCOUNT_ACCESS_PERMISSIONS`].
	pub fn account_access() -> Self {
		Self {
			data: ConsentRequestData { permissions: ACCOUNT_ACCESS_PERMISSIONS.to_vec() },
			risk: Default::default(),
		}
	}
}

/// Inner `Data` of a consent request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConsentRequestData {
	/// Requested permissions.
	pub permissions: Vec<Permission>,
}

/// `{"Data":{"ConsentId":...}}`; unlike [`DataEnvelope`](crate::aisp::DataEnvelope), `Data` is mandatory here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentResponse {
	/// Created consent.
	#[serde(rename = "Data")]
	pub data: Consent,
}

/// Consent as echoed by the consent endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Consent {
	/// Identifier passed as `request` to the authorize endpoint.
	pub consent_id: ConsentId,
	/// e.g. `AwaitingAuthorisation`.
	pub status: Option<String>,
	/// Creation timestamp.
	pub creation_date_time: Option<String>,
	/// Granted permissions, when echoed.
	#[serde(default)]
	pub permissions: Vec<String>,
}

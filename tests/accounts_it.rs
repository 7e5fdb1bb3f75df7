mod common;

// crates.io
use httpmock::prelude::*;
// self
use common::*;
use open_banking_aisp::{
	aisp::{AccountIdentifiers, CreditDebitIndicator},
	auth::{AccountId, AuthorizationCode, SessionStage},
	error::{Error, ResponseError, SessionError},
	flows::{AispClient, DEFAULT_TRANSACTION_LIMIT},
	obs::StepKind,
};

fn transactions_body(count: usize) -> String {
	let entries = (1..=count)
		.map(|n| {
			let indicator = if n % 2 == 0 { "Debit" } else { "Credit" };

			format!(
				"{{\"AccountId\":\"acc-1\",\"TransactionId\":\"t-{n}\",\"BookingDateTime\":\"2024-05-{n:02}T10:00:00+00:00\",\"Amount\":{{\"Amount\":\"{n}.00\",\"Currency\":\"GBP\"}},\"CreditDebitIndicator\":\"{indicator}\",\"TransactionInformation\":\"Item {n}\"}}"
			)
		})
		.collect::<Vec<_>>()
		.join(",");

	format!("{{\"Data\":{{\"Transaction\":[{entries}]}}}}")
}

/// Client holding the user token, as after step 4.
async fn authorized_client(server: &MockServer) -> AispClient {
	let mut client = client_with_consent(server).await;

	mock_user_token(server).await;
	client
		.exchange_authorization_code(&AuthorizationCode::new(AUTH_CODE))
		.await
		.expect("User token should be issued.");

	client
}

#[tokio::test]
async fn transactions_are_truncated_in_upstream_order() {
	let server = MockServer::start_async().await;
	let client = authorized_client(&server).await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(accounts_path("acc-1", "transactions"))
				.header("authorization", format!("Bearer {USER_TOKEN}"));
			then.status(200).header("content-type", "application/json").body(transactions_body(10));
		})
		.await;
	let account_id = AccountId::new("acc-1").expect("Account id should be valid.");
	let first_five = client
		.get_account_transactions(&account_id, 5)
		.await
		.expect("Transactions should be fetched.");
	let default = client
		.get_account_transactions(&account_id, DEFAULT_TRANSACTION_LIMIT)
		.await
		.expect("Transactions should be fetched.");

	assert_eq!(
		first_five.iter().filter_map(|txn| txn.transaction_id.as_deref()).collect::<Vec<_>>(),
		["t-1", "t-2", "t-3", "t-4", "t-5"]
	);
	assert_eq!(first_five[0].credit_debit_indicator, Some(CreditDebitIndicator::Credit));
	assert_eq!(default.len(), 10);

	mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn accounts_decode_both_nested_identifier_shapes() {
	let server = MockServer::start_async().await;
	let client = authorized_client(&server).await;

	server
		.mock_async(|when, then| {
			when.method(GET).path(ACCOUNTS_PATH);
			then.status(200).header("content-type", "application/json").body(
				r#"{"Data":{"Account":[
					{"AccountId":"acc-1","Currency":"GBP","Account":{"SchemeName":"UK.OBIE.SortCodeAccountNumber","Identification":"50000012345601"}},
					{"AccountId":"acc-2","Currency":"GBP","Account":[{"SchemeName":"UK.OBIE.IBAN","Identification":"GB29NWBK60161331926819"}]}
				]}}"#,
			);
		})
		.await;

	let accounts = client.get_accounts().await.expect("Accounts should be fetched.");

	assert_eq!(accounts.len(), 2);
	assert!(matches!(accounts[0].account, Some(AccountIdentifiers::One(_))));
	assert!(matches!(accounts[1].account, Some(AccountIdentifiers::Many(ref ids)) if ids.len() == 1));
}

#[tokio::test]
async fn missing_account_array_is_an_empty_list() {
	let server = MockServer::start_async().await;
	let client = authorized_client(&server).await;

	server
		.mock_async(|when, then| {
			when.method(GET).path(ACCOUNTS_PATH);
			then.status(200).header("content-type", "application/json").body(r#"{"Data":{}}"#);
		})
		.await;

	assert!(client.get_accounts().await.expect("Empty data should succeed.").is_empty());
}

#[tokio::test]
async fn non_success_status_is_reported_with_the_body() {
	let server = MockServer::start_async().await;
	let client = authorized_client(&server).await;

	server
		.mock_async(|when, then| {
			when.method(GET).path(accounts_path("acc-1", "balances"));
			then.status(403).body(r#"{"Code":"UK.OBIE.Resource.NotFound"}"#);
		})
		.await;

	let account_id = AccountId::new("acc-1").expect("Account id should be valid.");
	let err = client.get_account_balances(&account_id).await.expect_err("403 must fail.");

	assert!(matches!(
		err,
		Error::Response(ResponseError::Status { step: StepKind::Balances, status: 403, ref body })
			if body.contains("NotFound")
	));
}

#[tokio::test]
async fn resource_reads_require_a_token() {
	let server = MockServer::start_async().await;
	let accounts = server
		.mock_async(|when, then| {
			when.method(GET).path(ACCOUNTS_PATH);
			then.status(200).body(r#"{"Data":{"Account":[]}}"#);
		})
		.await;
	let client = build_client(&server);
	let err = client.get_accounts().await.expect_err("No token yet.");

	assert!(matches!(
		err,
		Error::Session(SessionError::MissingAccessToken { stage: SessionStage::Unauthenticated })
	));

	accounts.assert_calls_async(0).await;
}

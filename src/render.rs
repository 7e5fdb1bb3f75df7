//! Console rendering for the walkthrough.
//!
//! Every function writes to the supplied sink so the binary can target stdout while tests
//! capture a `Vec<u8>`. Missing upstream fields print as `N/A`.

// std
use std::io;
// self
use crate::{
	_prelude::*,
	aisp::{Account, AccountIdentifier, Amount, Balance, Consent, CreditDebitIndicator, Transaction},
	auth::{AccessToken, AuthorizationCode, GrantType},
	config::AispConfig,
};

const RULE_WIDTH: usize = 60;
const NOT_AVAILABLE: &str = "N/A";

/// `====` framed title.
pub fn banner<W>(out: &mut W, title: &str) -> io::Result<()>
where
	W: Write,
{
	let rule = "=".repeat(RULE_WIDTH);

	writeln!(out)?;
	writeln!(out, "{rule}")?;
	writeln!(out, "{title}")?;
	writeln!(out, "{rule}")
}

/// Opening banner naming the environment, API version, and sandbox user.
pub fn environment<W>(out: &mut W, config: &AispConfig) -> io::Result<()>
where
	W: Write,
{
	let rule = "=".repeat(RULE_WIDTH);

	writeln!(out)?;
	writeln!(out, "{rule}")?;
	writeln!(out, "Open Banking AISP - Account Details Fetcher")?;
	writeln!(out, "{rule}")?;
	writeln!(out, "Environment: Sandbox ({})", config.base_url)?;
	writeln!(out, "API Version: {}", config.api_version)?;
	writeln!(out, "Test User: {}", config.test_username)?;
	writeln!(out, "{rule}")
}

/// Metadata of a freshly issued token; the bearer itself is never printed.
pub fn token<W>(out: &mut W, token: &AccessToken) -> io::Result<()>
where
	W: Write,
{
	let expires_in = token
		.expires_in
		.map(|value| format!("{} seconds", value.whole_seconds()))
		.unwrap_or_else(|| NOT_AVAILABLE.into());

	let headline = match token.grant {
		GrantType::ClientCredentials => "Token obtained successfully",
		GrantType::AuthorizationCode => "Access token obtained",
	};

	writeln!(out, "✓ {headline}")?;
	writeln!(out, "  Token Type: {}", token.token_type)?;
	writeln!(out, "  Expires In: {expires_in}")?;
	writeln!(out, "  Scope: {}", or_na(token.scope.as_deref()))
}

/// Identifier, status, and creation time of a new consent.
pub fn consent<W>(out: &mut W, consent: &Consent) -> io::Result<()>
where
	W: Write,
{
	writeln!(out, "✓ Consent created successfully")?;
	writeln!(out, "  Consent ID: {}", consent.consent_id)?;
	writeln!(out, "  Status: {}", or_na(consent.status.as_deref()))?;
	writeln!(out, "  Created: {}", or_na(consent.creation_date_time.as_deref()))
}

/// Prefix of the authorization code.
pub fn authorization_code<W>(out: &mut W, code: &AuthorizationCode) -> io::Result<()>
where
	W: Write,
{
	writeln!(out, "✓ Authorization successful")?;
	writeln!(out, "  Authorization Code: {}...", code.preview())
}

/// Number of accounts visible under the consent.
pub fn account_count<W>(out: &mut W, count: usize) -> io::Result<()>
where
	W: Write,
{
	writeln!(out, "✓ Retrieved {count} account(s)")
}

/// Identity block of one account, including every nested account-number element.
pub fn account<W>(out: &mut W, position: usize, account: &Account) -> io::Result<()>
where
	W: Write,
{
	let rule = "─".repeat(RULE_WIDTH);

	writeln!(out)?;
	writeln!(out, "{rule}")?;
	writeln!(out, "ACCOUNT #{position}")?;
	writeln!(out, "{rule}")?;
	writeln!(out)?;
	writeln!(out, "📋 Account Information:")?;
	writeln!(out, "  Account ID: {}", or_na(account.account_id.as_ref().map(|id| id.as_str())))?;
	writeln!(out, "  Account Type: {}", or_na(account.account_type.as_deref()))?;
	writeln!(out, "  Account Sub Type: {}", or_na(account.account_sub_type.as_deref()))?;
	writeln!(out, "  Currency: {}", or_na(account.currency.as_deref()))?;
	writeln!(out, "  Nickname: {}", or_na(account.nickname.as_deref()))?;
	writeln!(out, "  Status: {}", or_na(account.status.as_deref()))?;

	if let Some(identifiers) = &account.account {
		for identifier in identifiers.as_slice() {
			account_number(out, identifier)?;
		}
	}

	Ok(())
}

fn account_number<W>(out: &mut W, identifier: &AccountIdentifier) -> io::Result<()>
where
	W: Write,
{
	writeln!(out)?;
	writeln!(out, "  Account Number:")?;
	writeln!(out, "    Scheme: {}", or_na(identifier.scheme_name.as_deref()))?;
	writeln!(out, "    Identification: {}", or_na(identifier.identification.as_deref()))?;
	writeln!(out, "    Name: {}", or_na(identifier.name.as_deref()))?;

	if let Some(secondary) = &identifier.secondary_identification {
		writeln!(out, "    Secondary Identification: {secondary}")?;
	}

	Ok(())
}

/// Balance section; callers skip it when the list is empty.
pub fn balances<W>(out: &mut W, balances: &[Balance]) -> io::Result<()>
where
	W: Write,
{
	writeln!(out)?;
	writeln!(out, "💰 Balances:")?;

	for balance in balances {
		writeln!(out, "  {}:", or_na(balance.balance_type.as_deref()))?;
		writeln!(out, "    Amount: {}", plain_amount(balance.amount.as_ref()))?;
		writeln!(out, "    Type: {}", indicator_label(balance.credit_debit_indicator.as_ref()))?;
		writeln!(out, "    Date: {}", or_na(balance.date_time.as_deref()))?;
	}

	Ok(())
}

/// Transaction section; callers skip it when the list is empty.
pub fn transactions<W>(out: &mut W, transactions: &[Transaction], limit: usize) -> io::Result<()>
where
	W: Write,
{
	writeln!(out)?;
	writeln!(out, "📊 Recent Transactions (Last {limit}):")?;

	for (position, txn) in transactions.iter().enumerate() {
		let indicator = txn.credit_debit_indicator.as_ref();

		writeln!(out)?;
		writeln!(out, "  Transaction {}:", position + 1)?;
		writeln!(out, "    Date: {}", or_na(txn.booking_date_time.as_deref()))?;
		writeln!(out, "    Amount: {}", signed_amount(indicator, txn.amount.as_ref()))?;
		writeln!(out, "    Type: {}", indicator_label(indicator))?;
		writeln!(out, "    Description: {}", or_na(txn.transaction_information.as_deref()))?;
		writeln!(out, "    Reference: {}", or_na(txn.transaction_reference.as_deref()))?;
	}

	Ok(())
}

/// `+GBP 42.50` for credits; every other indicator, missing included, gets `-`.
pub fn signed_amount(indicator: Option<&CreditDebitIndicator>, amount: Option<&Amount>) -> String {
	let sign = indicator.map(CreditDebitIndicator::sign).unwrap_or('-');

	format!("{sign}{}", plain_amount(amount))
}

/// Closing banner after a complete run.
pub fn success<W>(out: &mut W) -> io::Result<()>
where
	W: Write,
{
	banner(out, "✓ Account details fetched successfully!")?;

	writeln!(out)
}

/// One-line notice printed before the run aborts.
pub fn failure<W>(out: &mut W, message: &str) -> io::Result<()>
where
	W: Write,
{
	writeln!(out)?;
	writeln!(out, "✗ {message}. Exiting.")
}

fn plain_amount(amount: Option<&Amount>) -> String {
	let (currency, value) = amount
		.map(|amount| (amount.currency.as_deref(), amount.amount.as_deref()))
		.unwrap_or_default();

	format!("{} {}", or_na(currency), or_na(value))
}

fn indicator_label(indicator: Option<&CreditDebitIndicator>) -> &str {
	indicator.map(CreditDebitIndicator::as_str).unwrap_or(NOT_AVAILABLE)
}

fn or_na(value: Option<&str>) -> &str {
	value.unwrap_or(NOT_AVAILABLE)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::aisp::AccountIdentifiers;

	fn amount(value: &str) -> Amount {
		Amount { amount: Some(value.into()), currency: Some("GBP".into()) }
	}

	fn rendered(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
		let mut buf = Vec::new();

		f(&mut buf).expect("Rendering into a Vec should not fail.");

		String::from_utf8(buf).expect("Rendered output should be UTF-8.")
	}

	#[test]
	fn credit_and_debit_amounts_carry_their_sign() {
		assert_eq!(
			signed_amount(Some(&CreditDebitIndicator::Credit), Some(&amount("42.50"))),
			"+GBP 42.50"
		);
		assert_eq!(
			signed_amount(Some(&CreditDebitIndicator::Debit), Some(&amount("42.50"))),
			"-GBP 42.50"
		);
		assert_eq!(signed_amount(None, None), "-N/A N/A");
	}

	#[test]
	fn transaction_block_shows_every_field() {
		let txn = Transaction {
			booking_date_time: Some("2024-05-01T10:00:00Z".into()),
			amount: Some(amount("42.50")),
			credit_debit_indicator: Some(CreditDebitIndicator::Credit),
			transaction_information: Some("Salary".into()),
			..Default::default()
		};
		let text = rendered(|out| transactions(out, &[txn], 5));

		assert!(text.contains("Recent Transactions (Last 5):"));
		assert!(text.contains("Transaction 1:"));
		assert!(text.contains("Amount: +GBP 42.50"));
		assert!(text.contains("Type: Credit"));
		assert!(text.contains("Description: Salary"));
		assert!(text.contains("Reference: N/A"));
	}

	#[test]
	fn account_block_lists_all_nested_identifiers() {
		let account = Account {
			account_type: Some("Personal".into()),
			account: Some(AccountIdentifiers::Many(vec![
				AccountIdentifier {
					scheme_name: Some("UK.OBIE.SortCodeAccountNumber".into()),
					identification: Some("50000012345601".into()),
					..Default::default()
				},
				AccountIdentifier {
					scheme_name: Some("UK.OBIE.IBAN".into()),
					name: Some("Jane".into()),
					..Default::default()
				},
			])),
			..Default::default()
		};
		let text = rendered(|out| super::account(out, 2, &account));

		assert!(text.contains("ACCOUNT #2"));
		assert!(text.contains("Account ID: N/A"));
		assert!(text.contains("Account Type: Personal"));
		assert_eq!(text.matches("Account Number:").count(), 2);
		assert!(text.contains("Identification: 50000012345601"));
		assert!(text.contains("Name: Jane"));
	}

	#[test]
	fn balance_block_falls_back_to_placeholders() {
		let balance = Balance { balance_type: Some("InterimAvailable".into()), ..Default::default() };
		let text = rendered(|out| balances(out, &[balance]));

		assert!(text.contains("InterimAvailable:"));
		assert!(text.contains("Amount: N/A N/A"));
		assert!(text.contains("Date: N/A"));
	}

	#[test]
	fn token_metadata_never_prints_the_secret() {
		let token = AccessToken::new(GrantType::ClientCredentials, "s3cr3t", "Bearer")
			.with_expires_in(Duration::seconds(600));
		let text = rendered(|out| super::token(out, &token));

		assert!(text.contains("Expires In: 600 seconds"));
		assert!(text.contains("Scope: N/A"));
		assert!(!text.contains("s3cr3t"));
	}

	#[test]
	fn token_headline_names_the_grant() {
		let app = rendered(|out| {
			super::token(out, &AccessToken::new(GrantType::ClientCredentials, "a", "Bearer"))
		});
		let user = rendered(|out| {
			super::token(out, &AccessToken::new(GrantType::AuthorizationCode, "u", "Bearer"))
		});

		assert!(app.starts_with("✓ Token obtained successfully\n"));
		assert!(user.starts_with("✓ Access token obtained\n"));
	}
}

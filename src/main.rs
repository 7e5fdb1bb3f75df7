//! `aisp-fetch`: runs the sandbox account-information walkthrough end to end.
//!
//! Progress and account data go to stdout; diagnostics go to stderr through `tracing`
//! (`RUST_LOG`, default `info`). Exits non-zero on a missing configuration or on the first
//! failed step.

// std
use std::{io, path::PathBuf};
// crates.io
use clap::Parser;
use color_eyre::{Result, eyre::WrapErr};
use tracing_subscriber::EnvFilter;
// self
use open_banking_aisp::{
	config::AispConfig,
	flows::{self, AispClient, DISPLAY_TRANSACTION_LIMIT},
};

#[derive(Debug, Parser)]
#[command(name = "aisp-fetch", version, about = "Open Banking AISP sandbox account fetcher")]
struct Cli {
	/// TOML file holding the sandbox app credentials.
	#[arg(long, short, default_value = "aisp.toml")]
	config: PathBuf,
	/// Transactions shown per account.
	#[arg(long, default_value_t = DISPLAY_TRANSACTION_LIMIT)]
	transactions: usize,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with_writer(io::stderr)
		.init();

	let cli = Cli::parse();
	let config = AispConfig::load(&cli.config)
		.wrap_err_with(|| format!("Configuration is required (looked for {}).", cli.config.display()))?;
	let mut client = AispClient::new(config)?.with_transaction_display_limit(cli.transactions);
	let mut stdout = io::stdout().lock();
	let summary = flows::run_walkthrough(&mut client, &mut stdout).await?;

	tracing::info!(
		consent_id = %summary.consent_id,
		accounts = summary.account_count,
		"Walkthrough completed."
	);

	Ok(())
}

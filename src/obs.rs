//! Optional observability helpers for the AISP steps.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `aisp.step` with the `step` and `stage`
//!   (call site) fields, plus one error event per failed step.
//! - Enable `metrics` to increment the `aisp_step_total` counter for every
//!   attempt/success/failure, labeled by `step` + `outcome`, record step latency in the
//!   `aisp_step_duration_seconds` histogram, and count resource and authorization answers in
//!   `aisp_upstream_responses_total` by `step` + status `class`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Steps of the account-information walkthrough, in call order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepKind {
	/// Client-credentials token request.
	ClientCredentials,
	/// Account-access consent creation.
	Consent,
	/// Sandbox auto-approval redirect walk.
	Authorization,
	/// Authorization-code exchange.
	CodeExchange,
	/// Account listing.
	Accounts,
	/// Per-account balance read.
	Balances,
	/// Per-account transaction read.
	Transactions,
}
impl StepKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			StepKind::ClientCredentials => "client_credentials",
			StepKind::Consent => "consent",
			StepKind::Authorization => "authorization",
			StepKind::CodeExchange => "code_exchange",
			StepKind::Accounts => "accounts",
			StepKind::Balances => "balances",
			StepKind::Transactions => "transactions",
		}
	}
}
impl Display for StepKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepOutcome {
	/// Entry to a step.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl StepOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			StepOutcome::Attempt => "attempt",
			StepOutcome::Success => "success",
			StepOutcome::Failure => "failure",
		}
	}
}
impl Display for StepOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

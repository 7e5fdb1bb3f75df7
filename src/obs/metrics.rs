// std
use std::time::Duration as StdDuration;
// self
use crate::obs::{StepKind, StepOutcome};

/// Bumps `aisp_step_total{step, outcome}`.
pub fn record_step_outcome(kind: StepKind, outcome: StepOutcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!("aisp_step_total", "step" => kind.as_str(), "outcome" => outcome.as_str())
		.increment(1);

	#[cfg(not(feature = "metrics"))]
	let _ = (kind, outcome);
}

/// Wall-clock time of one step, including every request it issued.
pub fn record_step_duration(kind: StepKind, elapsed: StdDuration) {
	#[cfg(feature = "metrics")]
	metrics::histogram!("aisp_step_duration_seconds", "step" => kind.as_str())
		.record(elapsed.as_secs_f64());

	#[cfg(not(feature = "metrics"))]
	let _ = (kind, elapsed);
}

/// Counts upstream answers per step by status class, so redirect hops show up as `3xx`.
pub fn record_upstream_status(kind: StepKind, status: u16) {
	#[cfg(feature = "metrics")]
	metrics::counter!(
		"aisp_upstream_responses_total",
		"step" => kind.as_str(),
		"class" => status_class(status)
	)
	.increment(1);

	#[cfg(not(feature = "metrics"))]
	let _ = (kind, status);
}

/// `2xx`-style label for a status code; anything outside 1xx-5xx is `other`.
pub fn status_class(status: u16) -> &'static str {
	match status / 100 {
		1 => "1xx",
		2 => "2xx",
		3 => "3xx",
		4 => "4xx",
		5 => "5xx",
		_ => "other",
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn status_codes_collapse_into_classes() {
		assert_eq!(status_class(200), "2xx");
		assert_eq!(status_class(201), "2xx");
		assert_eq!(status_class(302), "3xx");
		assert_eq!(status_class(403), "4xx");
		assert_eq!(status_class(500), "5xx");
		assert_eq!(status_class(999), "other");
	}

	#[test]
	fn recorders_accept_every_step() {
		record_step_outcome(StepKind::Authorization, StepOutcome::Failure);
		record_step_duration(StepKind::Accounts, StdDuration::from_millis(12));
		record_upstream_status(StepKind::Authorization, 302);
	}
}

//! Shared helpers for the step implementations (instrumentation, JSON decoding).

// std
use std::time::Instant;
// crates.io
use oauth2::{HttpRequest, HttpResponse};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	error::ResponseError,
	http::{self, AispHttpClient},
	obs::{self, StepKind, StepOutcome, StepSpan},
};

/// Runs one step inside its span and records the attempt plus its outcome.
pub(crate) async fn run_step<T, Fut>(kind: StepKind, stage: &'static str, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = StepSpan::new(kind, stage);

	obs::record_step_outcome(kind, StepOutcome::Attempt);

	let started = Instant::now();
	let result = span.instrument(fut).await;

	obs::record_step_duration(kind, started.elapsed());

	match &result {
		Ok(_) => {
			obs::record_step_outcome(kind, StepOutcome::Success);
			obs::log_step_success(kind);
		},
		Err(e) => {
			obs::record_step_outcome(kind, StepOutcome::Failure);
			obs::log_step_failure(kind, e);
		},
	}

	result
}

/// Sends `request` and decodes a 2xx JSON answer into `T`.
pub(crate) async fn fetch_json<C, T>(http_client: &C, step: StepKind, request: HttpRequest) -> Result<T>
where
	C: ?Sized + AispHttpClient,
	T: DeserializeOwned,
{
	let response = http::send(http_client, step, request).await?;

	decode_json(step, &response)
}

/// Rejects non-2xx statuses, then decodes the body while keeping the failing JSON path.
pub(crate) fn decode_json<T>(step: StepKind, response: &HttpResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	let status = response.status();

	if !status.is_success() {
		return Err(ResponseError::Status {
			step,
			status: status.as_u16(),
			body: http::body_preview(response.body()),
		}
		.into());
	}

	let mut deserializer = serde_json::Deserializer::from_slice(response.body());

	serde_path_to_error::deserialize(&mut deserializer).map_err(|source| {
		ResponseError::Decode { step, source, body: http::body_preview(response.body()) }.into()
	})
}

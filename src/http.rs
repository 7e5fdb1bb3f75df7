//! Transport primitives for token, consent, authorization, and resource calls.
//!
//! The module exposes [`AispHttpClient`] alongside [`ResponseMetadata`] and
//! [`ResponseMetadataSlot`] so callers can swap the HTTP stack without losing the status
//! capture the token-endpoint error mapping relies on. Implementations call
//! [`ResponseMetadataSlot::take`] before dispatching a request and
//! [`ResponseMetadataSlot::store`] once an HTTP status is known.
//!
//! Transports must hand redirects back to the caller instead of following them: the
//! sandbox authorization walk reads the `Location` header of each hop.

// crates.io
use oauth2::{
	AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
	http::{
		HeaderValue, Method, Request, StatusCode,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, LOCATION},
	},
};
use reqwest::redirect::Policy;
// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	error::{ConfigError, TransportError},
	obs::{self, StepKind},
};

const BODY_PREVIEW_LIMIT: usize = 300;
const JSON: &str = "application/json";

/// Abstraction over HTTP transports used for every upstream call.
///
/// Callers provide an implementation (typically behind `Arc<T>`) and the client requests
/// short-lived [`AsyncHttpClient`] handles that each carry a clone of a
/// [`ResponseMetadataSlot`]. The same handle type serves the `oauth2` token exchanges and
/// the plain resource requests, so one transport covers the whole walkthrough.
pub trait AispHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle tied to a [`ResponseMetadataSlot`].
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds an [`AsyncHttpClient`] handle that records outcomes in `slot`.
	///
	/// # Metadata Contract
	///
	/// - Call [`ResponseMetadataSlot::take`] before submitting the HTTP request.
	/// - Once a response (successful or erroneous) provides a status, save it with
	///   [`ResponseMetadataSlot::store`].
	/// - Never follow redirects; return the 3xx response as-is.
	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle;
}

/// Captures metadata from the most recent HTTP response for downstream error mapping.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadata {
	/// HTTP status code, if a response arrived.
	pub status: Option<u16>,
}

/// Thread-safe slot for sharing [`ResponseMetadata`] between transport and error layers.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadataSlot(Arc<Mutex<Option<ResponseMetadata>>>);
impl ResponseMetadataSlot {
	/// Stores new metadata for the current request.
	pub fn store(&self, meta: ResponseMetadata) {
		*self.0.lock() = Some(meta);
	}

	/// Returns the captured metadata, if any, consuming it from the slot.
	pub fn take(&self) -> Option<ResponseMetadata> {
		self.0.lock().take()
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// [`ReqwestHttpClient::new`] disables redirect following. Any client passed to
/// [`ReqwestHttpClient::with_client`] must be built with `redirect::Policy::none()` too,
/// or the authorization walk will never see the code-bearing `Location`.
#[derive(Clone)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Builds a client that hands redirects back to the caller.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().redirect(Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	pub(crate) fn instrumented(&self, slot: ResponseMetadataSlot) -> InstrumentedHandle {
		InstrumentedHandle::new(self.0.clone(), slot)
	}
}
impl AispHttpClient for ReqwestHttpClient {
	type Handle = InstrumentedHandle;
	type TransportError = ReqwestError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		self.instrumented(slot)
	}
}

struct InstrumentedHttpClient {
	client: ReqwestClient,
	slot: ResponseMetadataSlot,
}

/// Handle returned by [`ReqwestHttpClient`] that satisfies [`AispHttpClient`].
#[derive(Clone)]
pub struct InstrumentedHandle(Arc<InstrumentedHttpClient>);
impl InstrumentedHandle {
	fn new(client: ReqwestClient, slot: ResponseMetadataSlot) -> Self {
		Self(Arc::new(InstrumentedHttpClient { client, slot }))
	}
}
impl<'c> AsyncHttpClient<'c> for InstrumentedHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = Arc::clone(&self.0);

		Box::pin(async move {
			client.slot.take();

			let response = client
				.client
				.execute(request.try_into().map_err(Box::new)?)
				.await
				.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();

			client.slot.store(ResponseMetadata { status: Some(status.as_u16()) });

			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

/// Builds a `GET` request, bearer-authenticated when a token is supplied.
pub(crate) fn get_request(url: &Url, bearer: Option<&AccessToken>) -> Result<HttpRequest> {
	let mut builder = Request::builder().method(Method::GET).uri(url.as_str());

	if let Some(token) = bearer {
		builder = builder.header(AUTHORIZATION, token.bearer_header()).header(ACCEPT, JSON);
	}

	Ok(builder.body(Vec::new()).map_err(ConfigError::from)?)
}

/// Builds a bearer-authenticated `POST` with a JSON body.
pub(crate) fn json_post_request<T>(url: &Url, bearer: &AccessToken, body: &T) -> Result<HttpRequest>
where
	T: Serialize,
{
	let payload = serde_json::to_vec(body).map_err(ConfigError::RequestBody)?;
	let request = Request::builder()
		.method(Method::POST)
		.uri(url.as_str())
		.header(AUTHORIZATION, bearer.bearer_header())
		.header(CONTENT_TYPE, JSON)
		.header(ACCEPT, JSON)
		.body(payload)
		.map_err(ConfigError::from)?;

	Ok(request)
}

/// Sends one request through a fresh handle; a single attempt, no retries.
pub(crate) async fn send<C>(
	http_client: &C,
	step: StepKind,
	request: HttpRequest,
) -> Result<HttpResponse>
where
	C: ?Sized + AispHttpClient,
{
	let handle = http_client.with_metadata(ResponseMetadataSlot::default());
	let response = handle.call(request).await.map_err(|err| map_client_error(step, err))?;

	obs::record_upstream_status(step, response.status().as_u16());

	Ok(response)
}

/// Converts an [`HttpClientError`] emitted by a transport into a client error.
pub(crate) fn map_client_error<E>(step: StepKind, err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::network(step, *inner).into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { step, message }.into(),
		_ => TransportError::Other { step, message: "unrecognized transport failure".into() }
			.into(),
	}
}

/// Statuses the sandbox uses to hand over the next authorization hop.
pub(crate) fn is_redirect(status: StatusCode) -> bool {
	matches!(status.as_u16(), 302 | 303 | 307 | 308)
}

/// Raw `Location` header, when present and valid UTF-8.
pub(crate) fn location(response: &HttpResponse) -> Option<&str> {
	response.headers().get(LOCATION).and_then(|value: &HeaderValue| value.to_str().ok())
}

/// Lossy UTF-8 rendering of a body, truncated for diagnostics.
pub(crate) fn body_preview(body: &[u8]) -> String {
	let text = String::from_utf8_lossy(body);

	if text.chars().count() <= BODY_PREVIEW_LIMIT {
		return text.into_owned();
	}

	let mut buf = text.chars().take(BODY_PREVIEW_LIMIT).collect::<String>();

	buf.push('…');

	buf
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::auth::GrantType;

	#[test]
	fn body_preview_truncates_long_bodies() {
		let long = "x".repeat(BODY_PREVIEW_LIMIT + 10);
		let preview = body_preview(long.as_bytes());

		assert_eq!(preview.chars().count(), BODY_PREVIEW_LIMIT + 1);
		assert!(preview.ends_with('…'));
		assert_eq!(body_preview(b"short"), "short");
	}

	#[test]
	fn requests_carry_bearer_and_json_headers() {
		let url = Url::parse("https://example.com/accounts").expect("URL should parse.");
		let token = AccessToken::new(GrantType::AuthorizationCode, "user-token", "Bearer");
		let get = get_request(&url, Some(&token)).expect("GET should build.");
		let post = json_post_request(&url, &token, &serde_json::json!({"Risk": {}}))
			.expect("POST should build.");

		assert_eq!(get.method(), Method::GET);
		assert_eq!(
			get.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
			Some("Bearer user-token")
		);
		assert_eq!(post.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()), Some(JSON));
		assert_eq!(post.body().as_slice(), br#"{"Risk":{}}"#);
		assert!(get_request(&url, None).expect("Anonymous GET should build.").headers().is_empty());
	}

	#[test]
	fn only_handover_statuses_count_as_redirects() {
		assert!(is_redirect(StatusCode::FOUND));
		assert!(is_redirect(StatusCode::PERMANENT_REDIRECT));
		assert!(!is_redirect(StatusCode::MOVED_PERMANENTLY));
		assert!(!is_redirect(StatusCode::OK));
	}
}

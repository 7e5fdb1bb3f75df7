//! Client-level error types shared across configuration, transport, and the AISP steps.

// self
use crate::{_prelude::*, auth::SessionStage, obs::StepKind};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Upstream answered with a status or body the step cannot use.
	#[error(transparent)]
	Response(#[from] ResponseError),
	/// The sandbox authorization walk did not yield a code.
	#[error(transparent)]
	Authorization(#[from] AuthorizationError),
	/// A step ran before the state it depends on was established.
	#[error(transparent)]
	Session(#[from] SessionError),

	/// Console output could not be written.
	#[error("Failed to write console output.")]
	Render {
		/// Underlying writer failure.
		#[source]
		source: std::io::Error,
	},
}
impl Error {
	/// Wraps a writer failure raised while rendering.
	pub fn render(source: std::io::Error) -> Self {
		Self::Render { source }
	}
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Configuration file could not be read.
	#[error("Configuration file `{path}` could not be read; copy `config.example.toml` and fill in your credentials.")]
	Read {
		/// Path that was attempted.
		path: String,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// Configuration file is not valid TOML or misses required keys.
	#[error("Configuration file `{path}` is invalid.")]
	Parse {
		/// Path (or `<inline>`) of the configuration source.
		path: String,
		/// Underlying TOML failure.
		#[source]
		source: toml::de::Error,
	},
	/// A required value is empty.
	#[error("Configuration value `{field}` must not be empty.")]
	MissingValue {
		/// Offending configuration key.
		field: &'static str,
	},
	/// A URL value cannot be parsed.
	#[error("Configuration value `{field}` is not a valid URL.")]
	InvalidUrl {
		/// Offending configuration key.
		field: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A URL value parses but cannot serve as an HTTP base.
	#[error("Configuration value `{field}` must be an http(s) URL with a host: {url}.")]
	UnsupportedUrl {
		/// Offending configuration key.
		field: &'static str,
		/// URL that failed validation.
		url: String,
	},
	/// API version cannot be used as a single path segment.
	#[error("API version `{version}` must be a single path segment.")]
	InvalidApiVersion {
		/// Rejected version string.
		version: String,
	},
	/// Token endpoint URL was rejected by the OAuth client.
	#[error("Token endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: oauth2::url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	RequestBody(#[source] serde_json::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the {step} endpoint.")]
	Network {
		/// Step whose request failed.
		step: StepKind,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling an upstream endpoint.")]
	Io(#[from] std::io::Error),
	/// HTTP client failed without a structured error.
	#[error("HTTP client error occurred while calling the {step} endpoint: {message}.")]
	Other {
		/// Step whose request failed.
		step: StepKind,
		/// Client-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(step: StepKind, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { step, source: Box::new(src) }
	}
}

/// Non-success statuses and malformed payloads.
#[derive(Debug, ThisError)]
pub enum ResponseError {
	/// Endpoint answered with a non-2xx status.
	#[error("The {step} endpoint returned HTTP {status}: {body}")]
	Status {
		/// Step whose request failed.
		step: StepKind,
		/// HTTP status code.
		status: u16,
		/// Body preview.
		body: String,
	},
	/// Endpoint answered 2xx with a body that does not match the expected shape.
	#[error("The {step} endpoint returned an unexpected body: {body}")]
	Decode {
		/// Step whose response failed to decode.
		step: StepKind,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// Body preview.
		body: String,
	},
	/// Token endpoint returned an OAuth error or an unexpected response.
	#[error("Token endpoint rejected the {grant} grant: {message}.")]
	TokenEndpoint {
		/// Grant label.
		grant: &'static str,
		/// Server- or client-supplied message summarizing the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint responded with JSON that could not be parsed.
	#[error("Token endpoint returned a malformed {grant} response: {body}")]
	TokenResponseParse {
		/// Grant label.
		grant: &'static str,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Body preview.
		body: String,
	},
	/// The consent grants access to no accounts, so there is nothing to display.
	#[error("No accounts are visible under the authorized consent.")]
	NoAccounts,
	/// Token endpoint returned an `expires_in` outside the supported range.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
}

/// Failure shapes of the sandbox auto-approval redirect chain.
#[derive(Debug, ThisError)]
pub enum AuthorizationError {
	/// A redirect carried no usable `Location` header.
	#[error("Redirect (HTTP {status}) did not carry a Location header.")]
	MissingLocation {
		/// Redirect status code.
		status: u16,
	},
	/// A redirect target did not carry a `code=` parameter.
	#[error("No authorization code in redirect: {location}")]
	MissingCode {
		/// Redirect target that was inspected.
		location: String,
	},
	/// The JSON answer did not contain `redirectUri`.
	#[error("No redirectUri in JSON response: {body}")]
	MissingRedirectUri {
		/// Body preview.
		body: String,
	},
	/// The follow-up answer was 200 but not JSON.
	#[error("Authorization response is not JSON: {body}")]
	NotJson {
		/// Body preview.
		body: String,
	},
	/// Any other status in the chain.
	#[error("Unexpected authorization response status {status}: {body}")]
	UnexpectedStatus {
		/// HTTP status code.
		status: u16,
		/// Body preview.
		body: String,
	},
	/// The redirect target is not a valid URL.
	#[error("Redirect Location `{location}` is not a valid URL.")]
	InvalidLocation {
		/// Raw header value.
		location: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}

/// Steps invoked out of order.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum SessionError {
	/// No access token has been obtained yet.
	#[error("No access token is stored (session stage: {stage}).")]
	MissingAccessToken {
		/// Stage at the time of the call.
		stage: SessionStage,
	},
	/// No consent has been created yet.
	#[error("No consent id is stored (session stage: {stage}).")]
	MissingConsent {
		/// Stage at the time of the call.
		stage: SessionStage,
	},
}

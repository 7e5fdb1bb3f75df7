//! Sandbox credentials and endpoint configuration.
//!
//! Values come from a TOML file (see `config.example.toml`) or are assembled in code with
//! [`AispConfig::new`] plus the `with_*` overrides. Every endpoint URL the client calls is
//! derived here, so the flows never concatenate strings by hand.

// std
use std::{fs, path::Path};
// self
use crate::{
	_prelude::*,
	auth::{AccountId, TokenSecret},
	error::ConfigError,
};

/// Sandbox resource server.
pub const DEFAULT_BASE_URL: &str = "https://ob.sandbox.natwest.com";
/// Sandbox authorization server.
pub const DEFAULT_AUTH_BASE_URL: &str = "https://api.sandbox.natwest.com";
/// Open Banking read/write API version used in resource paths.
pub const DEFAULT_API_VERSION: &str = "v4.0";
/// Default sandbox customer number.
pub const DEFAULT_TEST_USERNAME: &str = "123456789012";
/// Domain appended to the sandbox customer number for auto-approval.
pub const DEFAULT_USERNAME_DOMAIN: &str = "55b21c17-7172-4105-8eff-750fe83efef9.example.org";

/// Validated client configuration.
#[derive(Clone, Debug)]
pub struct AispConfig {
	/// OAuth client identifier.
	pub client_id: String,
	/// OAuth client secret.
	pub client_secret: TokenSecret,
	/// Redirect URI registered for the app, kept verbatim because the token endpoint
	/// compares it byte for byte.
	pub redirect_uri: String,
	/// Sandbox customer number used for auto-approval.
	pub test_username: String,
	/// Domain joined to [`AispConfig::test_username`] in `authorization_username`.
	pub username_domain: String,
	/// Resource and token server base URL.
	pub base_url: Url,
	/// Authorization server base URL.
	pub auth_base_url: Url,
	/// API version path segment (e.g. `v4.0`).
	pub api_version: String,
}
impl AispConfig {
	/// Creates a configuration pointing at the public sandbox.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		redirect_uri: impl Into<String>,
	) -> Result<Self, ConfigError> {
		let config = Self {
			client_id: client_id.into(),
			client_secret: TokenSecret::new(client_secret),
			redirect_uri: redirect_uri.into(),
			test_username: DEFAULT_TEST_USERNAME.into(),
			username_domain: DEFAULT_USERNAME_DOMAIN.into(),
			base_url: parse_url("base_url", DEFAULT_BASE_URL)?,
			auth_base_url: parse_url("auth_base_url", DEFAULT_AUTH_BASE_URL)?,
			api_version: DEFAULT_API_VERSION.into(),
		};

		config.validate()?;

		Ok(config)
	}

	/// Reads and validates a TOML configuration file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let raw = fs::read_to_string(path)
			.map_err(|source| ConfigError::Read { path: path.display().to_string(), source })?;

		Self::parse(&raw, &path.display().to_string())
	}

	/// Parses and validates TOML held in memory.
	pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
		Self::parse(raw, "<inline>")
	}

	fn parse(raw: &str, origin: &str) -> Result<Self, ConfigError> {
		let file: ConfigFile = toml::from_str(raw)
			.map_err(|source| ConfigError::Parse { path: origin.to_owned(), source })?;

		Self::try_from(file)
	}

	/// Overrides the resource and token server.
	pub fn with_base_url(mut self, url: Url) -> Result<Self, ConfigError> {
		validate_base("base_url", &url)?;

		self.base_url = url;

		Ok(self)
	}

	/// Overrides the authorization server.
	pub fn with_auth_base_url(mut self, url: Url) -> Result<Self, ConfigError> {
		validate_base("auth_base_url", &url)?;

		self.auth_base_url = url;

		Ok(self)
	}

	/// Overrides the sandbox customer number.
	pub fn with_test_username(mut self, username: impl Into<String>) -> Result<Self, ConfigError> {
		self.test_username = username.into();

		require_non_empty("test_username", &self.test_username)?;

		Ok(self)
	}

	/// Overrides the API version path segment.
	pub fn with_api_version(mut self, version: impl Into<String>) -> Result<Self, ConfigError> {
		self.api_version = version.into();

		validate_api_version(&self.api_version)?;

		Ok(self)
	}

	/// Full `authorization_username` value for the auto-approval request.
	pub fn authorization_username(&self, username: &str) -> String {
		format!("{username}@{}", self.username_domain)
	}

	/// `{base}/token`.
	pub fn token_url(&self) -> Result<Url, ConfigError> {
		join_segments("base_url", &self.base_url, &["token"])
	}

	/// `{authBase}/authorize`.
	pub fn authorize_url(&self) -> Result<Url, ConfigError> {
		join_segments("auth_base_url", &self.auth_base_url, &["authorize"])
	}

	/// `{base}/open-banking/{version}/aisp/account-access-consents`.
	pub fn consent_url(&self) -> Result<Url, ConfigError> {
		self.aisp_url(&["account-access-consents"])
	}

	/// `{base}/open-banking/{version}/aisp/accounts`.
	pub fn accounts_url(&self) -> Result<Url, ConfigError> {
		self.aisp_url(&["accounts"])
	}

	/// `{base}/open-banking/{version}/aisp/accounts/{id}/balances`.
	pub fn balances_url(&self, account_id: &AccountId) -> Result<Url, ConfigError> {
		self.aisp_url(&["accounts", account_id.as_str(), "balances"])
	}

	/// `{base}/open-banking/{version}/aisp/accounts/{id}/transactions`.
	pub fn transactions_url(&self, account_id: &AccountId) -> Result<Url, ConfigError> {
		self.aisp_url(&["accounts", account_id.as_str(), "transactions"])
	}

	fn aisp_url(&self, tail: &[&str]) -> Result<Url, ConfigError> {
		let mut segments = vec!["open-banking", self.api_version.as_str(), "aisp"];

		segments.extend_from_slice(tail);

		join_segments("base_url", &self.base_url, &segments)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		require_non_empty("client_id", &self.client_id)?;
		require_non_empty("client_secret", self.client_secret.expose())?;
		require_non_empty("test_username", &self.test_username)?;
		require_non_empty("username_domain", &self.username_domain)?;
		validate_base("redirect_uri", &parse_url("redirect_uri", &self.redirect_uri)?)?;
		validate_base("base_url", &self.base_url)?;
		validate_base("auth_base_url", &self.auth_base_url)?;
		validate_api_version(&self.api_version)?;

		Ok(())
	}
}
impl TryFrom<ConfigFile> for AispConfig {
	type Error = ConfigError;

	fn try_from(file: ConfigFile) -> Result<Self, Self::Error> {
		let config = Self {
			client_id: file.client_id,
			client_secret: file.client_secret,
			redirect_uri: file.redirect_uri,
			test_username: file.test_username,
			username_domain: file.username_domain,
			base_url: parse_url("base_url", &file.base_url)?,
			auth_base_url: parse_url("auth_base_url", &file.auth_base_url)?,
			api_version: file.api_version,
		};

		config.validate()?;

		Ok(config)
	}
}

/// On-disk layout of the configuration file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
	/// OAuth client identifier.
	pub client_id: String,
	/// OAuth client secret.
	pub client_secret: TokenSecret,
	/// Redirect URI registered for the app.
	pub redirect_uri: String,
	/// Sandbox customer number.
	#[serde(default = "default_test_username")]
	pub test_username: String,
	/// Domain joined to the customer number.
	#[serde(default = "default_username_domain")]
	pub username_domain: String,
	/// Resource and token server base URL.
	#[serde(default = "default_base_url")]
	pub base_url: String,
	/// Authorization server base URL.
	#[serde(default = "default_auth_base_url")]
	pub auth_base_url: String,
	/// API version path segment.
	#[serde(default = "default_api_version")]
	pub api_version: String,
}

fn default_test_username() -> String {
	DEFAULT_TEST_USERNAME.into()
}

fn default_username_domain() -> String {
	DEFAULT_USERNAME_DOMAIN.into()
}

fn default_base_url() -> String {
	DEFAULT_BASE_URL.into()
}

fn default_auth_base_url() -> String {
	DEFAULT_AUTH_BASE_URL.into()
}

fn default_api_version() -> String {
	DEFAULT_API_VERSION.into()
}

fn parse_url(field: &'static str, raw: &str) -> Result<Url, ConfigError> {
	Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { field, source })
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ConfigError> {
	if value.trim().is_empty() { Err(ConfigError::MissingValue { field }) } else { Ok(()) }
}

fn validate_base(field: &'static str, url: &Url) -> Result<(), ConfigError> {
	let http = matches!(url.scheme(), "http" | "https");

	if !http || url.cannot_be_a_base() || url.host_str().is_none() {
		Err(ConfigError::UnsupportedUrl { field, url: url.to_string() })
	} else {
		Ok(())
	}
}

fn validate_api_version(version: &str) -> Result<(), ConfigError> {
	require_non_empty("api_version", version)?;

	if version.contains('/') {
		Err(ConfigError::InvalidApiVersion { version: version.to_owned() })
	} else {
		Ok(())
	}
}

fn join_segments(field: &'static str, base: &Url, segments: &[&str]) -> Result<Url, ConfigError> {
	let mut url = base.clone();

	url.set_query(None);
	url.set_fragment(None);
	url.path_segments_mut()
		.map_err(|_| ConfigError::UnsupportedUrl { field, url: base.to_string() })?
		.pop_if_empty()
		.extend(segments);

	Ok(url)
}

//! Secret wrappers that redact sensitive material.

// self
use crate::_prelude::*;

const CODE_PREVIEW_LEN: usize = 20;

/// Redacted token secret wrapper keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// One-time authorization code lifted from the sandbox redirect.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthorizationCode(TokenSecret);
impl AuthorizationCode {
	/// Wraps a code value.
	pub fn new(value: impl Into<String>) -> Self {
		Self(TokenSecret::new(value))
	}

	/// Returns the raw code for the token exchange.
	pub fn expose(&self) -> &str {
		self.0.expose()
	}

	/// Leading characters shown on the console.
	pub fn preview(&self) -> &str {
		let raw = self.expose();

		match raw.char_indices().nth(CODE_PREVIEW_LEN) {
			Some((idx, _)) => &raw[..idx],
			None => raw,
		}
	}
}
impl Debug for AuthorizationCode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AuthorizationCode").field(&"<redacted>").finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = TokenSecret::new("super-secret");
		let code = AuthorizationCode::new("abc123");

		assert_eq!(format!("{secret:?}"), "TokenSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
		assert_eq!(format!("{code:?}"), "AuthorizationCode(\"<redacted>\")");
	}

	#[test]
	fn code_preview_keeps_first_twenty_chars() {
		let long = AuthorizationCode::new("0123456789abcdefghijKLMNOP");
		let short = AuthorizationCode::new("abc123");

		assert_eq!(long.preview(), "0123456789abcdefghij");
		assert_eq!(short.preview(), "abc123");
	}
}

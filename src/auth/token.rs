//! Redacted token wrapper that keeps the credential out of logs.

// self
use crate::{_prelude::*, checksum::Checksum};

/// Opaque credential issued by the auth endpoint.
///
/// The content is never validated. `Debug` and `Display` redact it, so the value only leaves the
/// wrapper through [`AuthToken::expose`] or a derived [`Checksum`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthToken(String);
impl AuthToken {
	/// Wraps a raw token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` when the server handed out an empty token.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Derives the request checksum binding this token to `path`.
	pub fn checksum_for(&self, path: &str) -> Checksum {
		Checksum::derive(&self.0, path)
	}
}
impl Debug for AuthToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AuthToken").field(&"<redacted>").finish()
	}
}
impl Display for AuthToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

//! Request checksums binding a token to the path it authorizes.

// crates.io
use sha2::{Digest, Sha256};
// self
use crate::_prelude::*;

/// Lowercase hex SHA-256 digest of `token` immediately followed by `path`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Checksum(String);
impl Checksum {
	/// Number of hex characters in every checksum.
	pub const HEX_LEN: usize = 64;

	/// Hashes the raw bytes of `token` then `path`, with no separator.
	pub fn derive(token: &str, path: &str) -> Self {
		let mut hasher = Sha256::new();

		hasher.update(token.as_bytes());
		hasher.update(path.as_bytes());

		Self(hex::encode(hasher.finalize()))
	}

	/// Returns the hex string.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl From<Checksum> for String {
	fn from(value: Checksum) -> Self {
		value.0
	}
}
impl Debug for Checksum {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Checksum({})", self.0)
	}
}
impl Display for Checksum {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Convenience wrapper returning [`Checksum::derive`] as a plain string.
pub fn derive(token: &str, path: &str) -> String {
	Checksum::derive(token, path).into()
}

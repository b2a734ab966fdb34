//! Client-level error types shared across the auth, resource, and workflow layers.

// self
use crate::{_prelude::*, obs::Operation};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The outgoing request could not be assembled.
	#[error("Failed to build the request for {endpoint}.")]
	RequestBuild {
		/// Endpoint path the request targeted.
		endpoint: String,
		/// Underlying construction failure.
		#[source]
		source: BoxError,
	},
	/// Server answered with a status other than 200.
	#[error("Endpoint {endpoint} returned status {status}.")]
	UnexpectedStatus {
		/// Endpoint path that produced the status.
		endpoint: String,
		/// HTTP status code.
		status: u16,
	},
	/// Headers arrived but the body could not be read.
	#[error("Failed to read the response body from {endpoint}.")]
	BodyRead {
		/// Endpoint path whose body failed.
		endpoint: String,
		/// Underlying read failure.
		#[source]
		source: BoxError,
	},
	/// Every attempt allowed by the retry policy failed.
	#[error("Failed to {} after {attempts} attempts.", operation.description())]
	RetriesExhausted {
		/// Operation that gave up.
		operation: Operation,
		/// Number of attempts made.
		attempts: u32,
		/// Error returned by the final attempt.
		#[source]
		source: Box<Error>,
	},
	/// Final JSON encoding failed.
	#[error("Failed to encode the user list as JSON.")]
	Serialization(#[from] serde_json::Error),
	/// Final output could not be written.
	#[error("Failed to write the user list to the output stream.")]
	Output(#[source] std::io::Error),
}
impl Error {
	/// Returns `true` when a fresh attempt may succeed where this one failed.
	pub fn is_retryable(&self) -> bool {
		matches!(
			self,
			Self::Transport(_)
				| Self::RequestBuild { .. }
				| Self::UnexpectedStatus { .. }
				| Self::BodyRead { .. }
		)
	}

	/// Wraps a request construction failure for `endpoint`.
	pub fn request_build(
		endpoint: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::RequestBuild { endpoint: endpoint.into(), source: Box::new(src) }
	}

	/// Wraps a body read failure for `endpoint`.
	pub fn body_read(
		endpoint: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::BodyRead { endpoint: endpoint.into(), source: Box::new(src) }
	}
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot be parsed or cannot carry paths.
	#[error("Base URL `{value}` is invalid.")]
	InvalidBaseUrl {
		/// Offending value.
		value: String,
		/// Underlying parsing failure, when one exists.
		#[source]
		source: Option<url::ParseError>,
	},
	/// An environment override holds an unusable value.
	#[error("Environment variable {name} has an invalid value `{value}`: {reason}.")]
	InvalidEnv {
		/// Variable name.
		name: &'static str,
		/// Raw value found in the environment.
		value: String,
		/// Why the value was rejected.
		reason: &'static str,
	},
	/// The retry policy allows no attempts at all.
	#[error("Retry policy must allow at least one attempt.")]
	ZeroAttempts,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {endpoint}.")]
	Network {
		/// Endpoint path being called.
		endpoint: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during transport.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error raised while calling `endpoint`.
	pub fn network(
		endpoint: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { endpoint: endpoint.into(), source: Box::new(src) }
	}
}

//! Client configuration: server location, endpoint paths, header names, and retry policy.
//!
//! [`Config::default`] matches the BADSEC server contract (`http://localhost:8888`, three
//! attempts, one second apart). A handful of `NOCLIST_*` environment variables can override the
//! location and timing for tests and non-standard deployments; see [`Config::from_env`].

// std
use std::time::Duration as StdDuration;
// self
use crate::{_prelude::*, error::ConfigError, retry::RetryPolicy};

/// Overrides [`Config::base_url`].
pub const ENV_BASE_URL: &str = "NOCLIST_BASE_URL";
/// Overrides [`RetryPolicy::max_attempts`].
pub const ENV_MAX_ATTEMPTS: &str = "NOCLIST_MAX_ATTEMPTS";
/// Overrides [`RetryPolicy::delay`], in milliseconds.
pub const ENV_RETRY_DELAY_MS: &str = "NOCLIST_RETRY_DELAY_MS";
/// Sets [`Config::request_timeout`], in milliseconds.
pub const ENV_REQUEST_TIMEOUT_MS: &str = "NOCLIST_REQUEST_TIMEOUT_MS";

/// Everything the clients need to reach the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
	/// Scheme, host, and port of the server. Endpoint paths are appended verbatim.
	pub base_url: Url,
	/// Path of the token endpoint.
	pub auth_path: String,
	/// Path of the user list endpoint; also the path fed into the checksum.
	pub users_path: String,
	/// Response header carrying the token.
	pub token_header: String,
	/// Request header carrying the checksum.
	pub checksum_header: String,
	/// Retry policy applied to both remote operations.
	pub retry: RetryPolicy,
	/// Per-request timeout; `None` keeps the transport default.
	pub request_timeout: Option<StdDuration>,
}
impl Config {
	/// Default server location.
	pub const DEFAULT_BASE_URL: &str = "http://localhost:8888";
	/// Default token endpoint path.
	pub const DEFAULT_AUTH_PATH: &str = "/auth";
	/// Default user list endpoint path.
	pub const DEFAULT_USERS_PATH: &str = "/users";
	/// Default token header name.
	pub const DEFAULT_TOKEN_HEADER: &str = "Badsec-Authentication-Token";
	/// Default checksum header name.
	pub const DEFAULT_CHECKSUM_HEADER: &str = "X-Request-Checksum";

	/// Creates a configuration pointing at `base_url` with every other field defaulted.
	pub fn new(base_url: Url) -> Self {
		Self {
			base_url,
			auth_path: Self::DEFAULT_AUTH_PATH.into(),
			users_path: Self::DEFAULT_USERS_PATH.into(),
			token_header: Self::DEFAULT_TOKEN_HEADER.into(),
			checksum_header: Self::DEFAULT_CHECKSUM_HEADER.into(),
			retry: RetryPolicy::default(),
			request_timeout: None,
		}
	}

	/// Parses `raw` as the base URL and defaults every other field.
	pub fn parse(raw: &str) -> Result<Self, ConfigError> {
		let config = Self::new(parse_base_url(raw)?);

		config.validate()?;

		Ok(config)
	}

	/// Builds the default configuration, then applies `NOCLIST_*` environment overrides.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Same as [`Config::from_env`] but reads variables through `lookup`.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let mut config = Self::default();

		if let Some(raw) = lookup(ENV_BASE_URL) {
			config.base_url = parse_base_url(&raw)?;
		}
		if let Some(raw) = lookup(ENV_MAX_ATTEMPTS) {
			config.retry.max_attempts = parse_u64(ENV_MAX_ATTEMPTS, &raw).and_then(|value| {
				u32::try_from(value).map_err(|_| ConfigError::InvalidEnv {
					name: ENV_MAX_ATTEMPTS,
					value: raw.clone(),
					reason: "value is too large",
				})
			})?;
		}
		if let Some(raw) = lookup(ENV_RETRY_DELAY_MS) {
			config.retry.delay = StdDuration::from_millis(parse_u64(ENV_RETRY_DELAY_MS, &raw)?);
		}
		if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_MS) {
			let millis = parse_u64(ENV_REQUEST_TIMEOUT_MS, &raw)?;

			config.request_timeout = (millis > 0).then(|| StdDuration::from_millis(millis));
		}

		config.validate()?;

		Ok(config)
	}

	/// Overrides the retry policy.
	pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
		self.retry = retry;

		self
	}

	/// Sets a per-request timeout.
	pub fn with_request_timeout(mut self, timeout: StdDuration) -> Self {
		self.request_timeout = Some(timeout);

		self
	}

	/// Rejects configurations the clients cannot run with.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.base_url.cannot_be_a_base() {
			return Err(ConfigError::InvalidBaseUrl {
				value: self.base_url.to_string(),
				source: None,
			});
		}
		if self.retry.max_attempts == 0 {
			return Err(ConfigError::ZeroAttempts);
		}

		Ok(())
	}

	/// Appends `path` to the base URL without resolving it, so a base path prefix survives.
	pub fn endpoint_url(&self, path: &str) -> Result<Url, url::ParseError> {
		let base = self.base_url.as_str().trim_end_matches('/');

		Url::parse(&format!("{base}{path}"))
	}
}
impl Default for Config {
	fn default() -> Self {
		let base_url = Url::parse(Self::DEFAULT_BASE_URL)
			.unwrap_or_else(|e| unreachable!("default base URL must parse: {e}"));

		Self::new(base_url)
	}
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
	let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidBaseUrl {
		value: raw.to_owned(),
		source: Some(e),
	})?;

	if url.cannot_be_a_base() {
		return Err(ConfigError::InvalidBaseUrl { value: raw.to_owned(), source: None });
	}

	Ok(url)
}

fn parse_u64(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
	raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
		name,
		value: raw.to_owned(),
		reason: "expected a non-negative integer",
	})
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;

	fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let vars = pairs
			.iter()
			.map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
			.collect::<HashMap<_, _>>();

		move |name| vars.get(name).cloned()
	}

	#[test]
	fn defaults_match_server_contract() {
		let config = Config::default();

		assert_eq!(config.base_url.as_str(), "http://localhost:8888/");
		assert_eq!(config.auth_path, "/auth");
		assert_eq!(config.users_path, "/users");
		assert_eq!(config.token_header, "Badsec-Authentication-Token");
		assert_eq!(config.checksum_header, "X-Request-Checksum");
		assert_eq!(config.retry.max_attempts, 3);
		assert_eq!(config.retry.delay, StdDuration::from_secs(1));
		assert_eq!(config.request_timeout, None);
		assert_eq!(Config::from_lookup(|_| None).expect("Empty env is valid."), config);
	}

	#[test]
	fn endpoint_url_appends_paths_verbatim() {
		let config = Config::default();

		assert_eq!(
			config.endpoint_url("/users").expect("Users URL should parse.").as_str(),
			"http://localhost:8888/users"
		);

		let prefixed = Config::parse("http://example.com/api/").expect("Prefixed URL is valid.");

		assert_eq!(
			prefixed.endpoint_url("/auth").expect("Auth URL should parse.").as_str(),
			"http://example.com/api/auth"
		);
	}

	#[test]
	fn env_overrides_apply() {
		let config = Config::from_lookup(lookup_from(&[
			(ENV_BASE_URL, "http://127.0.0.1:9999"),
			(ENV_MAX_ATTEMPTS, "5"),
			(ENV_RETRY_DELAY_MS, "10"),
			(ENV_REQUEST_TIMEOUT_MS, "2500"),
		]))
		.expect("Overrides should be valid.");

		assert_eq!(config.base_url.as_str(), "http://127.0.0.1:9999/");
		assert_eq!(config.retry, RetryPolicy::new(5, StdDuration::from_millis(10)));
		assert_eq!(config.request_timeout, Some(StdDuration::from_millis(2500)));
	}

	#[test]
	fn invalid_env_values_are_rejected() {
		let err = Config::from_lookup(lookup_from(&[(ENV_RETRY_DELAY_MS, "soon")]))
			.expect_err("Non-numeric delay should be rejected.");

		assert!(matches!(err, ConfigError::InvalidEnv { name: ENV_RETRY_DELAY_MS, .. }));

		let err = Config::from_lookup(lookup_from(&[(ENV_MAX_ATTEMPTS, "0")]))
			.expect_err("Zero attempts should be rejected.");

		assert!(matches!(err, ConfigError::ZeroAttempts));

		let err = Config::from_lookup(lookup_from(&[(ENV_BASE_URL, "not a url")]))
			.expect_err("Garbage base URL should be rejected.");

		assert!(matches!(err, ConfigError::InvalidBaseUrl { source: Some(_), .. }));

		let err = Config::parse("mailto:noc@example.com")
			.expect_err("Opaque URLs cannot carry endpoint paths.");

		assert!(matches!(err, ConfigError::InvalidBaseUrl { source: None, .. }));
	}
}

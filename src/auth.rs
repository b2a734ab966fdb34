//! Token retrieval from the auth endpoint.
//!
//! [`AuthClient::fetch_token`] issues an unauthenticated `GET` to [`Config::auth_path`] and
//! reads the token from [`Config::token_header`] on a `200` response. The body carries nothing
//! of interest and is dropped unread. Transport failures and any other status are retried under
//! [`Config::retry`].

mod token;

pub use token::*;

// self
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;
use crate::{
	_prelude::*,
	config::Config,
	http::{HttpClient, HttpRequest},
	obs::{self, Operation, OperationSpan},
};

/// Fetches tokens from the auth endpoint.
pub struct AuthClient<C>
where
	C: ?Sized + HttpClient,
{
	/// Transport used for every attempt.
	pub http_client: Arc<C>,
	/// Server location, header names, and retry policy.
	pub config: Arc<Config>,
}
impl<C> AuthClient<C>
where
	C: ?Sized + HttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(config: impl Into<Arc<Config>>, http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), config: config.into() }
	}

	/// Retrieves a token, retrying transient failures.
	///
	/// A `200` response without the token header yields an empty token rather than an error.
	pub async fn fetch_token(&self) -> Result<AuthToken> {
		const OPERATION: Operation = Operation::Auth;

		let span = OperationSpan::new(OPERATION, "fetch_token");

		span.instrument(self.config.retry.run(OPERATION, move |_| self.attempt())).await
	}

	async fn attempt(&self) -> Result<AuthToken> {
		let endpoint = self.config.auth_path.as_str();
		let url = self.config.endpoint_url(endpoint).map_err(|e| Error::request_build(endpoint, e))?;
		let request = HttpRequest::get(url, endpoint).headers_only();
		let response = self.http_client.get(request).await?;

		if !response.is_ok() {
			return Err(Error::UnexpectedStatus {
				endpoint: endpoint.to_owned(),
				status: response.status,
			});
		}

		let header = self.config.token_header.as_str();

		match response.header(header) {
			Some(value) => Ok(AuthToken::new(value)),
			None => {
				obs::log_missing_token_header(header);

				Ok(AuthToken::default())
			},
		}
	}
}
#[cfg(feature = "reqwest")]
impl AuthClient<ReqwestHttpClient> {
	/// Creates a client backed by its own reqwest transport.
	pub fn new(config: impl Into<Arc<Config>>) -> Result<Self> {
		let config = config.into();
		let http_client = ReqwestHttpClient::from_config(&config)?;

		Ok(Self::with_http_client(config, http_client))
	}
}
impl<C> Clone for AuthClient<C>
where
	C: ?Sized + HttpClient,
{
	fn clone(&self) -> Self {
		Self { http_client: Arc::clone(&self.http_client), config: Arc::clone(&self.config) }
	}
}
impl<C> Debug for AuthClient<C>
where
	C: ?Sized + HttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthClient").field("config", &self.config).finish()
	}
}

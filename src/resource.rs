//! User list retrieval from the resource endpoint.
//!
//! [`ResourceClient::fetch_records`] derives the request checksum once from the token and
//! [`Config::users_path`], then issues checksum-signed `GET` requests under [`Config::retry`]
//! until one returns `200`. The body is parsed into a [`UserIdList`], one record per line.

// std
use std::ops::Deref;
// self
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;
use crate::{
	_prelude::*,
	auth::AuthToken,
	checksum::Checksum,
	config::Config,
	http::{HttpClient, HttpRequest},
	obs::{Operation, OperationSpan},
};

/// Ordered user identifiers, serialized as a plain JSON array of strings.
///
/// Order follows the server response and duplicates are kept.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserIdList(Vec<String>);
impl UserIdList {
	/// Splits a response body into records.
	///
	/// Surrounding whitespace is trimmed first. A body that is empty after trimming yields an
	/// empty list; otherwise every `\n`-separated line is one record (blank interior lines
	/// included), with a trailing `\r` removed.
	pub fn parse(body: &str) -> Self {
		let trimmed = body.trim();

		if trimmed.is_empty() {
			return Self::default();
		}

		Self(
			trimmed
				.split('\n')
				.map(|line| line.strip_suffix('\r').unwrap_or(line).to_owned())
				.collect(),
		)
	}

	/// Consumes the list and returns the records.
	pub fn into_vec(self) -> Vec<String> {
		self.0
	}

	/// Encodes the list as a compact JSON array.
	pub fn to_json(&self) -> Result<String> {
		Ok(serde_json::to_string(self)?)
	}
}
impl Deref for UserIdList {
	type Target = [String];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Fetches the user list from the resource endpoint.
pub struct ResourceClient<C>
where
	C: ?Sized + HttpClient,
{
	/// Transport used for every attempt.
	pub http_client: Arc<C>,
	/// Server location, header names, and retry policy.
	pub config: Arc<Config>,
}
impl<C> ResourceClient<C>
where
	C: ?Sized + HttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(config: impl Into<Arc<Config>>, http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), config: config.into() }
	}

	/// Retrieves the user list authorized by `token`, retrying transient failures.
	pub async fn fetch_records(&self, token: &AuthToken) -> Result<UserIdList> {
		const OPERATION: Operation = Operation::Users;

		let span = OperationSpan::new(OPERATION, "fetch_records");
		let checksum = token.checksum_for(&self.config.users_path);
		let checksum = &checksum;

		span.instrument(self.config.retry.run(OPERATION, move |_| self.attempt(checksum))).await
	}

	async fn attempt(&self, checksum: &Checksum) -> Result<UserIdList> {
		let endpoint = self.config.users_path.as_str();
		let url = self.config.endpoint_url(endpoint).map_err(|e| Error::request_build(endpoint, e))?;
		let request = HttpRequest::get(url, endpoint)
			.with_header(self.config.checksum_header.as_str(), checksum.as_str());
		let response = self.http_client.get(request).await?;

		if !response.is_ok() {
			return Err(Error::UnexpectedStatus {
				endpoint: endpoint.to_owned(),
				status: response.status,
			});
		}

		Ok(UserIdList::parse(&response.body))
	}
}
#[cfg(feature = "reqwest")]
impl ResourceClient<ReqwestHttpClient> {
	/// Creates a client backed by its own reqwest transport.
	pub fn new(config: impl Into<Arc<Config>>) -> Result<Self> {
		let config = config.into();
		let http_client = ReqwestHttpClient::from_config(&config)?;

		Ok(Self::with_http_client(config, http_client))
	}
}
impl<C> Clone for ResourceClient<C>
where
	C: ?Sized + HttpClient,
{
	fn clone(&self) -> Self {
		Self { http_client: Arc::clone(&self.http_client), config: Arc::clone(&self.config) }
	}
}
impl<C> Debug for ResourceClient<C>
where
	C: ?Sized + HttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ResourceClient").field("config", &self.config).finish()
	}
}

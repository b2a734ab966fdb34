//! End-to-end workflow: token, checksum-signed user list, JSON output.
//!
//! The steps run strictly in sequence. Neither client terminates the process; the binary maps
//! any returned [`Error`] to exit status 1.

// std
use std::io::Write;
// self
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;
use crate::{
	_prelude::*,
	auth::AuthClient,
	config::Config,
	http::HttpClient,
	resource::{ResourceClient, UserIdList},
};

/// Runs the auth and resource clients back to back over one shared transport.
pub struct Workflow<C>
where
	C: ?Sized + HttpClient,
{
	/// Token step.
	pub auth: AuthClient<C>,
	/// User list step.
	pub resource: ResourceClient<C>,
}
impl<C> Workflow<C>
where
	C: ?Sized + HttpClient,
{
	/// Builds both clients around the caller-provided transport.
	pub fn with_http_client(config: impl Into<Arc<Config>>, http_client: impl Into<Arc<C>>) -> Self {
		let config = config.into();
		let http_client = http_client.into();

		Self {
			auth: AuthClient::with_http_client(Arc::clone(&config), Arc::clone(&http_client)),
			resource: ResourceClient::with_http_client(config, http_client),
		}
	}

	/// Fetches a token, then the user list it authorizes.
	pub async fn run(&self) -> Result<UserIdList> {
		let token = self.auth.fetch_token().await?;

		self.resource.fetch_records(&token).await
	}
}
#[cfg(feature = "reqwest")]
impl Workflow<ReqwestHttpClient> {
	/// Builds both clients around a fresh reqwest transport.
	pub fn new(config: impl Into<Arc<Config>>) -> Result<Self> {
		let config = config.into();
		let http_client = ReqwestHttpClient::from_config(&config)?;

		Ok(Self::with_http_client(config, http_client))
	}
}
impl<C> Debug for Workflow<C>
where
	C: ?Sized + HttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Workflow").field("config", &self.auth.config).finish()
	}
}

/// Runs the whole workflow once against the reqwest transport.
#[cfg(feature = "reqwest")]
pub async fn run(config: Config) -> Result<UserIdList> {
	Workflow::new(config)?.run().await
}

/// Writes `users` as a single-line JSON array followed by a newline.
pub fn write_json<W>(users: &UserIdList, mut writer: W) -> Result<()>
where
	W: Write,
{
	let json = users.to_json()?;

	writeln!(writer, "{json}").map_err(Error::Output)?;
	writer.flush().map_err(Error::Output)
}

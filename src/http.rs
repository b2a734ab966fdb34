//! Transport primitives for the auth and user list endpoints.
//!
//! The module exposes [`HttpClient`] alongside the plain [`HttpRequest`] and [`HttpResponse`]
//! values so tests and downstream crates can swap the transport without touching the retry or
//! checksum logic. Implementations read the whole body before resolving, or drop it unread for
//! [`HttpRequest::headers_only`] requests, so the response is released inside the attempt that
//! opened it.

// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")]
use crate::{
	config::Config,
	error::{ConfigError, TransportError},
};

/// Boxed future returned by [`HttpClient::get`].
pub type HttpFuture<'a> = Pin<Box<dyn Future<Output = Result<HttpResponse>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of issuing a single `GET`.
///
/// Implementations must be `Send + Sync + 'static` so they can sit behind an `Arc` shared by the
/// auth and resource clients. Failures map onto the crate taxonomy:
///
/// - connection, DNS, and timeout failures become [`Error::Transport`];
/// - headers that cannot be encoded become [`Error::RequestBuild`];
/// - a body that cannot be read after the headers arrived becomes [`Error::BodyRead`]; requests
///   with [`HttpRequest::read_body`] unset never read it and never fail this way.
///
/// Non-200 statuses are not errors at this layer; callers inspect [`HttpResponse::status`].
pub trait HttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and resolves once the response is complete.
	fn get(&self, request: HttpRequest) -> HttpFuture<'_>;
}

/// Outgoing `GET` request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
	/// Absolute target URL.
	pub url: Url,
	/// Endpoint path used in diagnostics.
	pub endpoint: String,
	/// Extra request headers, in insertion order.
	pub headers: Vec<(String, String)>,
	/// Whether the body is read into [`HttpResponse::body`]; otherwise it is dropped unread.
	pub read_body: bool,
}
impl HttpRequest {
	/// Creates a header-less request for `url`.
	pub fn get(url: Url, endpoint: impl Into<String>) -> Self {
		Self { url, endpoint: endpoint.into(), headers: Vec::new(), read_body: true }
	}

	/// Resolves as soon as status and headers arrive, leaving [`HttpResponse::body`] empty.
	pub fn headers_only(mut self) -> Self {
		self.read_body = false;

		self
	}

	/// Appends a request header.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}

	/// Returns the first value for `name`, compared case-insensitively.
	pub fn header(&self, name: &str) -> Option<&str> {
		find_header(&self.headers, name)
	}
}

/// Fully-read response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response headers. Values that are not valid UTF-8 are decoded lossily.
	pub headers: Vec<(String, String)>,
	/// Response body decoded as text.
	pub body: String,
}
impl HttpResponse {
	/// Status code the servers use for success.
	pub const OK: u16 = 200;

	/// Creates an empty response carrying `status`.
	pub fn new(status: u16) -> Self {
		Self { status, ..Default::default() }
	}

	/// Appends a response header.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}

	/// Replaces the body.
	pub fn with_body(mut self, body: impl Into<String>) -> Self {
		self.body = body.into();

		self
	}

	/// Returns `true` for exactly `200 OK`; other 2xx codes are treated as failures.
	pub fn is_ok(&self) -> bool {
		self.status == Self::OK
	}

	/// Returns the first value for `name`, compared case-insensitively.
	pub fn header(&self, name: &str) -> Option<&str> {
		find_header(&self.headers, name)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client honoring the configured request timeout.
	pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
		let mut builder = ReqwestClient::builder();

		if let Some(timeout) = config.request_timeout {
			builder = builder.timeout(timeout);
		}

		Ok(Self(builder.build()?))
	}
}
#[cfg(feature = "reqwest")]
impl HttpClient for ReqwestHttpClient {
	fn get(&self, request: HttpRequest) -> HttpFuture<'_> {
		Box::pin(async move {
			let HttpRequest { url, endpoint, headers, read_body } = request;
			let headers = encode_headers(&endpoint, headers)?;
			let response = self
				.0
				.get(url)
				.headers(headers)
				.send()
				.await
				.map_err(|e| TransportError::network(&endpoint, e))?;
			let status = response.status().as_u16();
			let headers = response
				.headers()
				.iter()
				.map(|(name, value)| {
					(name.as_str().to_owned(), String::from_utf8_lossy(value.as_bytes()).into_owned())
				})
				.collect();
			let body = if read_body {
				response.text().await.map_err(|e| Error::body_read(&endpoint, e))?
			} else {
				String::new()
			};

			Ok(HttpResponse { status, headers, body })
		})
	}
}

#[cfg(feature = "reqwest")]
fn encode_headers(endpoint: &str, headers: Vec<(String, String)>) -> Result<HeaderMap> {
	let mut map = HeaderMap::with_capacity(headers.len());

	for (name, value) in headers {
		let name =
			HeaderName::from_bytes(name.as_bytes()).map_err(|e| Error::request_build(endpoint, e))?;
		let value = HeaderValue::from_str(&value).map_err(|e| Error::request_build(endpoint, e))?;

		map.append(name, value);
	}

	Ok(map)
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
	headers
		.iter()
		.find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
		.map(|(_, value)| value.as_str())
}

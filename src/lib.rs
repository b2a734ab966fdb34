//! Fetch the NOC user list from the BADSEC server: grab a token, sign the request with a
//! SHA-256 checksum, retry on a fixed schedule, and hand back the identifiers in order.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod checksum;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod resource;
pub mod retry;
pub mod workflow;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::Serialize;
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, parking_lot as _};

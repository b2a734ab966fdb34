//! Prints the NOC user list as a JSON array on stdout.
//!
//! Diagnostics go to stderr. Exit status is 0 on success and 1 on any failure.

// std
use std::{io, process::ExitCode};
// self
use noclist::{config::Config, error::Result, obs, workflow};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
	obs::init_subscriber();

	match run().await {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			obs::log_fatal(&e);

			ExitCode::FAILURE
		},
	}
}

async fn run() -> Result<()> {
	let config = Config::from_env()?;
	let users = workflow::run(config).await?;

	workflow::write_json(&users, io::stdout().lock())
}

//! Optional observability helpers for client operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `noclist.operation` with the `operation` and
//!   `stage` fields, per-attempt retry events, and to install a stderr subscriber via
//!   [`init_subscriber`].
//! - Enable `metrics` to increment the `noclist_attempt_total` counter for every
//!   attempt/success/retry/failure, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use self::metrics::*;
pub use self::tracing::*;

// self
use crate::_prelude::*;

/// Remote operations performed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Token retrieval from the auth endpoint.
	Auth,
	/// User list retrieval from the resource endpoint.
	Users,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::Auth => "auth",
			Operation::Users => "users",
		}
	}

	/// Human-readable phrase used in diagnostics.
	pub const fn description(self) -> &'static str {
		match self {
			Operation::Auth => "fetch auth token",
			Operation::Users => "fetch user IDs",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttemptOutcome {
	/// An attempt was started.
	Attempt,
	/// The attempt produced a value.
	Success,
	/// The attempt failed and another one will follow.
	Retry,
	/// The operation gave up.
	Failure,
}
impl AttemptOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			AttemptOutcome::Attempt => "attempt",
			AttemptOutcome::Success => "success",
			AttemptOutcome::Retry => "retry",
			AttemptOutcome::Failure => "failure",
		}
	}
}
impl Display for AttemptOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

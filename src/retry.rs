//! Fixed-count, fixed-delay retry loop shared by the remote operations.
//!
//! Every attempt is counted and logged through [`obs`](crate::obs). Every retryable failure (see
//! [`Error::is_retryable`]) is followed by a [`RetryPolicy::delay`] sleep, the last one
//! included; once [`RetryPolicy::max_attempts`] is spent the last error is wrapped in
//! [`Error::RetriesExhausted`]. There is no backoff growth and no jitter.

// std
use std::time::Duration as StdDuration;
// self
use crate::{
	_prelude::*,
	obs::{self, AttemptOutcome, Operation},
};

/// Attempt budget and post-failure delay for one remote operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
	/// Maximum number of attempts, including the first one.
	pub max_attempts: u32,
	/// Pause after every failed attempt.
	pub delay: StdDuration,
}
impl RetryPolicy {
	/// Attempts allowed when nothing else is configured.
	pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
	/// Delay used when nothing else is configured.
	pub const DEFAULT_DELAY: StdDuration = StdDuration::from_secs(1);

	/// Creates a policy with an explicit budget and delay.
	pub const fn new(max_attempts: u32, delay: StdDuration) -> Self {
		Self { max_attempts, delay }
	}

	/// Drives `attempt` until it succeeds, fails terminally, or the budget runs out.
	///
	/// `attempt` receives the 1-based attempt number. A budget of zero still makes one attempt.
	pub async fn run<T, F, Fut>(&self, operation: Operation, mut attempt: F) -> Result<T>
	where
		F: FnMut(u32) -> Fut,
		Fut: Future<Output = Result<T>>,
	{
		let max_attempts = self.max_attempts.max(1);
		let mut current = 1;

		loop {
			obs::record_attempt_outcome(operation, AttemptOutcome::Attempt);

			let err = match attempt(current).await {
				Ok(value) => {
					obs::record_attempt_outcome(operation, AttemptOutcome::Success);
					obs::log_success(operation, current);

					return Ok(value);
				},
				Err(err) => err,
			};

			if !err.is_retryable() {
				obs::record_attempt_outcome(operation, AttemptOutcome::Failure);

				return Err(err);
			}

			let exhausted = current >= max_attempts;

			if exhausted {
				obs::record_attempt_outcome(operation, AttemptOutcome::Failure);
			} else {
				obs::record_attempt_outcome(operation, AttemptOutcome::Retry);
				obs::log_retry(operation, current, max_attempts, &err);
			}

			tokio::time::sleep(self.delay).await;

			if exhausted {
				obs::log_exhausted(operation, current, &err);

				return Err(Error::RetriesExhausted {
					operation,
					attempts: current,
					source: Box::new(err),
				});
			}

			current += 1;
		}
	}
}
impl Default for RetryPolicy {
	fn default() -> Self {
		Self::new(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_DELAY)
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicU32, Ordering};
	// self
	use super::*;
	use crate::error::ConfigError;

	fn unavailable() -> Error {
		Error::UnexpectedStatus { endpoint: "/auth".into(), status: 503 }
	}

	#[tokio::test(start_paused = true)]
	async fn retries_with_fixed_delay_until_success() {
		let policy = RetryPolicy::default();
		let calls = AtomicU32::new(0);
		let started = tokio::time::Instant::now();
		let value = policy
			.run(Operation::Auth, |attempt| {
				calls.fetch_add(1, Ordering::Relaxed);

				async move { if attempt < 3 { Err(unavailable()) } else { Ok(attempt) } }
			})
			.await
			.expect("Third attempt should succeed.");

		assert_eq!(value, 3);
		assert_eq!(calls.load(Ordering::Relaxed), 3);

		let elapsed = started.elapsed();

		assert!(elapsed >= StdDuration::from_secs(2) && elapsed < StdDuration::from_secs(3));
	}

	#[tokio::test(start_paused = true)]
	async fn exhaustion_waits_out_the_final_delay() {
		let policy = RetryPolicy::default();
		let started = tokio::time::Instant::now();
		let err = policy
			.run(Operation::Users, |_| async { Err::<(), _>(unavailable()) })
			.await
			.expect_err("Every attempt fails.");

		match err {
			Error::RetriesExhausted { operation, attempts, source } => {
				assert_eq!(operation, Operation::Users);
				assert_eq!(attempts, 3);
				assert!(matches!(*source, Error::UnexpectedStatus { status: 503, .. }));
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}

		let elapsed = started.elapsed();

		assert!(elapsed >= StdDuration::from_secs(3) && elapsed < StdDuration::from_secs(4));
	}

	#[tokio::test]
	async fn terminal_errors_skip_the_retry_loop() {
		let calls = AtomicU32::new(0);
		let err = RetryPolicy::default()
			.run(Operation::Auth, |_| {
				calls.fetch_add(1, Ordering::Relaxed);

				async { Err::<(), _>(ConfigError::ZeroAttempts.into()) }
			})
			.await
			.expect_err("Config errors are terminal.");

		assert!(matches!(err, Error::Config(ConfigError::ZeroAttempts)));
		assert_eq!(calls.load(Ordering::Relaxed), 1);
	}

	#[tokio::test]
	async fn zero_budget_still_attempts_once() {
		let policy = RetryPolicy::new(0, StdDuration::ZERO);
		let err = policy
			.run(Operation::Auth, |_| async { Err::<(), _>(unavailable()) })
			.await
			.expect_err("The single attempt fails.");

		assert!(matches!(err, Error::RetriesExhausted { attempts: 1, .. }));
	}
}

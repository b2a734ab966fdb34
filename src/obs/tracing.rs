// self
use crate::{_prelude::*, obs::Operation};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// A span builder used by client operations.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Creates a new span tagged with the provided operation + stage.
	pub fn new(operation: Operation, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("noclist.operation", operation = operation.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (operation, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Installs a formatting subscriber that writes to standard error.
///
/// The filter comes from `RUST_LOG` and falls back to `info`. Calling this more than once is
/// harmless; later calls leave the first subscriber in place.
pub fn init_subscriber() {
	#[cfg(feature = "tracing")]
	{
		use tracing_subscriber::EnvFilter;

		let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
		let _ = tracing_subscriber::fmt()
			.with_env_filter(filter)
			.with_writer(std::io::stderr)
			.with_target(false)
			.try_init();
	}
}

/// Logs a failed attempt that will be retried.
pub fn log_retry(operation: Operation, attempt: u32, max_attempts: u32, err: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			operation = operation.as_str(),
			attempt,
			max_attempts,
			error = %ErrorChain(err),
			"Attempt to {} failed. Retrying...",
			operation.description()
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (operation, attempt, max_attempts, err);
	}
}

/// Logs the last failed attempt of an operation.
pub fn log_exhausted(operation: Operation, attempts: u32, err: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::error!(
			operation = operation.as_str(),
			attempts,
			error = %ErrorChain(err),
			"Failed to {} after retries.",
			operation.description()
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (operation, attempts, err);
	}
}

/// Logs a successful attempt.
pub fn log_success(operation: Operation, attempt: u32) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(operation = operation.as_str(), attempt, "Operation succeeded.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (operation, attempt);
	}
}

/// Logs a 200 auth response that did not carry the token header.
pub fn log_missing_token_header(header: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(header, "Auth response is missing the token header; using an empty token.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = header;
	}
}

/// Logs the error that ends the process.
pub fn log_fatal(err: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::error!(error = %ErrorChain(err), "Exiting.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = err;
	}
}

/// Renders an error followed by its `source` chain, separated by spaces.
pub struct ErrorChain<'a>(pub &'a dyn StdError);
impl Display for ErrorChain<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}", self.0)?;

		let mut cause = self.0.source();

		while let Some(inner) = cause {
			write!(f, " {inner}")?;

			cause = inner.source();
		}

		Ok(())
	}
}

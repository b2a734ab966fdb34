// self
use crate::obs::{AttemptOutcome, Operation};

/// Records an attempt outcome via the global metrics recorder (when enabled).
pub fn record_attempt_outcome(operation: Operation, outcome: AttemptOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"noclist_attempt_total",
			"operation" => operation.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_attempt_outcome_noop_without_recorder() {
		record_attempt_outcome(Operation::Users, AttemptOutcome::Retry);
	}
}

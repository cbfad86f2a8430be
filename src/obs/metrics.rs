// self
use crate::obs::{FlowKind, FlowOutcome};

/// Increments `oauth2_authenticator_flow_total{flow, outcome}` when `metrics` is enabled.
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!(
		"oauth2_authenticator_flow_total",
		"flow" => kind.as_str(),
		"outcome" => outcome.as_str()
	)
	.increment(1);
	#[cfg(not(feature = "metrics"))]
	let _ = (kind, outcome);
}

/// Records the terminal outcome of `result` for `kind`.
pub fn record_flow_result<T, E>(kind: FlowKind, result: &Result<T, E>) {
	let outcome = if result.is_ok() { FlowOutcome::Success } else { FlowOutcome::Failure };

	record_flow_outcome(kind, outcome);
}

/// Increments `oauth2_authenticator_unauthorized_total` each time a `401` forces a refresh.
pub fn record_unauthorized_retry() {
	#[cfg(feature = "metrics")]
	metrics::counter!("oauth2_authenticator_unauthorized_total").increment(1);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recording_without_a_recorder_is_a_noop() {
		record_flow_outcome(FlowKind::Refresh, FlowOutcome::Attempt);
		record_flow_result::<(), ()>(FlowKind::Request, &Err(()));
		record_unauthorized_retry();
	}
}

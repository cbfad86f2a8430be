// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::{auth::GrantType, obs::FlowOutcome};

/// Point-in-time counts for one grant type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExchangeCounts {
	/// Exchanges started.
	pub attempts: u64,
	/// Exchanges that stored a new credential pair.
	pub successes: u64,
	/// Exchanges that returned an error.
	pub failures: u64,
}

/// Per-transport token exchange counters.
///
/// Unlike the optional `metrics` feature these are always on and scoped to a single
/// [`AuthenticatingTransport`](crate::transport::AuthenticatingTransport).
#[derive(Debug, Default)]
pub struct ExchangeMetrics {
	acquisition: Counters,
	refresh: Counters,
	unauthorized: AtomicU64,
}
impl ExchangeMetrics {
	/// Authorization-code exchanges.
	pub fn acquisition(&self) -> ExchangeCounts {
		self.acquisition.load()
	}

	/// Refresh-token exchanges.
	pub fn refresh(&self) -> ExchangeCounts {
		self.refresh.load()
	}

	/// `401` answers that triggered a refresh.
	pub fn unauthorized(&self) -> u64 {
		self.unauthorized.load(Ordering::Relaxed)
	}

	pub(crate) fn record(&self, grant: GrantType, outcome: FlowOutcome) {
		match grant {
			GrantType::AuthorizationCode => self.acquisition.record(outcome),
			GrantType::RefreshToken => self.refresh.record(outcome),
		}
	}

	pub(crate) fn record_unauthorized(&self) {
		self.unauthorized.fetch_add(1, Ordering::Relaxed);
	}
}

#[derive(Debug, Default)]
struct Counters {
	attempts: AtomicU64,
	successes: AtomicU64,
	failures: AtomicU64,
}
impl Counters {
	fn record(&self, outcome: FlowOutcome) {
		let counter = match outcome {
			FlowOutcome::Attempt => &self.attempts,
			FlowOutcome::Success => &self.successes,
			FlowOutcome::Failure => &self.failures,
		};

		counter.fetch_add(1, Ordering::Relaxed);
	}

	fn load(&self) -> ExchangeCounts {
		ExchangeCounts {
			attempts: self.attempts.load(Ordering::Relaxed),
			successes: self.successes.load(Ordering::Relaxed),
			failures: self.failures.load(Ordering::Relaxed),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn counts_are_kept_per_grant() {
		let metrics = ExchangeMetrics::default();

		metrics.record(GrantType::AuthorizationCode, FlowOutcome::Attempt);
		metrics.record(GrantType::AuthorizationCode, FlowOutcome::Success);
		metrics.record(GrantType::RefreshToken, FlowOutcome::Attempt);
		metrics.record(GrantType::RefreshToken, FlowOutcome::Failure);
		metrics.record_unauthorized();

		assert_eq!(
			metrics.acquisition(),
			ExchangeCounts { attempts: 1, successes: 1, failures: 0 }
		);
		assert_eq!(metrics.refresh(), ExchangeCounts { attempts: 1, successes: 0, failures: 1 });
		assert_eq!(metrics.unauthorized(), 1);
	}
}

use std::time::Duration;

use raiden_primitives::types::{
	RevealTimeout,
	U64,
};
use raiden_state_machine::constants::DEFAULT_REVEAL_TIMEOUT;

/// Default upper bound for reading one channel from chain.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Reconciler configuration.
#[derive(Clone, Debug)]
pub struct ReconcilerConfig {
	/// Reveal timeout applied to every reconciled channel.
	pub reveal_timeout: RevealTimeout,
	/// Upper bound for the chain queries of a single channel.
	pub query_timeout: Duration,
}

impl Default for ReconcilerConfig {
	fn default() -> Self {
		Self {
			reveal_timeout: U64::from(DEFAULT_REVEAL_TIMEOUT),
			query_timeout: DEFAULT_QUERY_TIMEOUT,
		}
	}
}

use raiden_primitives::types::{
	RawBlockNumber,
	SettleTimeout,
	U256,
	U64,
};

use super::ProxyError;

pub type Result<T> = std::result::Result<T, ProxyError>;

/// Convert a block number returned by a contract call.
pub(crate) fn to_raw_block_number(value: U256) -> Result<RawBlockNumber> {
	if value > U256::from(RawBlockNumber::MAX as u64) {
		return Err(ProxyError::BrokenPrecondition(format!(
			"Block number {} does not fit a block height",
			value
		)))
	}
	Ok(value.low_u64() as RawBlockNumber)
}

/// Convert a settle timeout returned by a contract call.
pub(crate) fn to_settle_timeout(value: U256) -> Result<SettleTimeout> {
	if value > U256::from(u64::MAX) {
		return Err(ProxyError::BrokenPrecondition(format!(
			"Settle timeout {} does not fit a block count",
			value
		)))
	}
	Ok(U64::from(value.low_u64()))
}

mod state;
mod state_change;

pub use raiden_primitives::types::*;
use serde::{
	Deserialize,
	Serialize,
};

pub use self::{
	state::*,
	state_change::*,
};
use crate::errors::StateTransitionError;

#[derive(Serialize, Deserialize, Copy, Clone, Debug, Eq, PartialEq)]
pub enum TransactionResult {
	Success,
	Failure,
}

/// Record of a confirmed on-chain transaction.
///
/// The submitter is unknown when the transaction was discovered through a chain event or query
/// rather than sent by this node.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct TransactionExecutionStatus {
	submitter: Option<Address>,
	block_number: BlockNumber,
	result: TransactionResult,
}

impl TransactionExecutionStatus {
	pub fn new(
		submitter: Option<Address>,
		block_number: BlockNumber,
		result: TransactionResult,
	) -> Result<Self, StateTransitionError> {
		if block_number.is_zero() {
			return Err(StateTransitionError::InvalidBlockNumber(block_number))
		}
		Ok(Self { submitter, block_number, result })
	}

	pub fn success(
		submitter: Option<Address>,
		block_number: BlockNumber,
	) -> Result<Self, StateTransitionError> {
		Self::new(submitter, block_number, TransactionResult::Success)
	}

	pub fn submitter(&self) -> Option<Address> {
		self.submitter
	}

	pub fn block_number(&self) -> BlockNumber {
		self.block_number
	}

	pub fn result(&self) -> TransactionResult {
		self.result
	}

	pub fn is_success(&self) -> bool {
		self.result == TransactionResult::Success
	}
}

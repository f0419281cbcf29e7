#![warn(clippy::missing_docs_in_private_items)]

use raiden_primitives::types::{
	Address,
	BlockNumber,
	CanonicalIdentifier,
	TokenAmount,
};
use thiserror::Error;

use crate::types::ChannelStatus;

/// The state transition error type.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum StateTransitionError {
	/// The balance proof does not advance the stored transferred amount.
	#[error("Stale balance proof: received transferred amount {received}, current is {current}")]
	StaleBalanceProof { current: TokenAmount, received: TokenAmount },
	/// A lifecycle transition was applied to a channel in the wrong status.
	#[error("Cannot {transition} a channel which is {status}")]
	InvalidTransition { transition: &'static str, status: ChannelStatus },
	/// A transaction that did not succeed cannot drive a lifecycle transition.
	#[error("Cannot {0} a channel with an unsuccessful transaction")]
	UnsuccessfulTransaction(&'static str),
	/// Block numbers of confirmed transactions are strictly positive.
	#[error("Invalid block number {0}")]
	InvalidBlockNumber(BlockNumber),
	/// The end state cannot cover the requested amount.
	#[error("Insufficient balance: required {required}, available {available}")]
	InsufficientBalance { required: TokenAmount, available: TokenAmount },
	/// Too many locks are pending on the end state.
	#[error("Too many pending locks: {0}")]
	TooManyPendingLocks(usize),
	/// The address is neither of the channel's participants.
	#[error("Address {0:?} is not a participant of the channel")]
	UnknownParticipant(Address),
	/// The balance proof belongs to a different channel.
	#[error("Balance proof for {received:?} applied to channel {expected:?}")]
	ChannelMismatch { expected: CanonicalIdentifier, received: CanonicalIdentifier },
}

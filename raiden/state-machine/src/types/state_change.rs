#![warn(clippy::missing_docs_in_private_items)]

use raiden_macros::IntoStateChange;
use raiden_primitives::types::{
	Address,
	BlockHash,
	BlockNumber,
	CanonicalIdentifier,
	TokenAmount,
	TokenNetworkAddress,
	TransactionHash,
};
use serde::{
	Deserialize,
	Serialize,
};

use crate::types::{
	state::{
		BalanceProofState,
		TransactionChannelDeposit,
	},
	ChannelState,
};

/// An enum containing all possible state change variants.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "type")]
#[allow(clippy::large_enum_variant)]
pub enum StateChange {
	ContractReceiveChannelOpened(ContractReceiveChannelOpened),
	ContractReceiveChannelClosed(ContractReceiveChannelClosed),
	ContractReceiveChannelSettled(ContractReceiveChannelSettled),
	ContractReceiveChannelDeposit(ContractReceiveChannelDeposit),
	ContractReceiveChannelWithdraw(ContractReceiveChannelWithdraw),
	ReceiveBalanceProof(ReceiveBalanceProof),
}

impl StateChange {
	/// Returns a string of the inner state change's type name.
	pub fn type_name(&self) -> &'static str {
		match self {
			StateChange::ContractReceiveChannelOpened(_) => "ContractReceiveChannelOpened",
			StateChange::ContractReceiveChannelClosed(_) => "ContractReceiveChannelClosed",
			StateChange::ContractReceiveChannelSettled(_) => "ContractReceiveChannelSettled",
			StateChange::ContractReceiveChannelDeposit(_) => "ContractReceiveChannelDeposit",
			StateChange::ContractReceiveChannelWithdraw(_) => "ContractReceiveChannelWithdraw",
			StateChange::ReceiveBalanceProof(_) => "ReceiveBalanceProof",
		}
	}

	/// Returns the canonical identifier of the channel the state change targets.
	pub fn canonical_identifier(&self) -> &CanonicalIdentifier {
		match self {
			StateChange::ContractReceiveChannelOpened(inner) =>
				inner.channel_state.canonical_identifier(),
			StateChange::ContractReceiveChannelClosed(inner) => &inner.canonical_identifier,
			StateChange::ContractReceiveChannelSettled(inner) => &inner.canonical_identifier,
			StateChange::ContractReceiveChannelDeposit(inner) => &inner.canonical_identifier,
			StateChange::ContractReceiveChannelWithdraw(inner) => &inner.canonical_identifier,
			StateChange::ReceiveBalanceProof(inner) => &inner.balance_proof.canonical_identifier,
		}
	}

	/// Returns the address of the token network the state change targets.
	pub fn token_network_address(&self) -> TokenNetworkAddress {
		self.canonical_identifier().token_network_address
	}
}

/// A channel to which this node IS a participant was opened.
#[derive(Serialize, Deserialize, Clone, Debug, IntoStateChange)]
pub struct ContractReceiveChannelOpened {
	pub transaction_hash: Option<TransactionHash>,
	pub block_number: BlockNumber,
	pub block_hash: BlockHash,
	pub channel_state: ChannelState,
}

/// A channel to which this node IS a participant was closed.
#[derive(Serialize, Deserialize, Clone, Debug, IntoStateChange)]
pub struct ContractReceiveChannelClosed {
	pub transaction_hash: Option<TransactionHash>,
	pub block_number: BlockNumber,
	pub block_hash: BlockHash,
	pub transaction_from: Option<Address>,
	pub canonical_identifier: CanonicalIdentifier,
}

/// A channel to which this node IS a participant was settled.
#[derive(Serialize, Deserialize, Clone, Debug, IntoStateChange)]
pub struct ContractReceiveChannelSettled {
	pub transaction_hash: Option<TransactionHash>,
	pub block_number: BlockNumber,
	pub block_hash: BlockHash,
	pub canonical_identifier: CanonicalIdentifier,
}

/// A channel to which this node IS a participant had a deposit.
#[derive(Serialize, Deserialize, Clone, Debug, IntoStateChange)]
pub struct ContractReceiveChannelDeposit {
	pub transaction_hash: Option<TransactionHash>,
	pub block_number: BlockNumber,
	pub block_hash: BlockHash,
	pub canonical_identifier: CanonicalIdentifier,
	pub deposit_transaction: TransactionChannelDeposit,
}

/// A channel to which this node IS a participant had a withdraw.
#[derive(Serialize, Deserialize, Clone, Debug, IntoStateChange)]
pub struct ContractReceiveChannelWithdraw {
	pub transaction_hash: Option<TransactionHash>,
	pub block_number: BlockNumber,
	pub block_hash: BlockHash,
	pub canonical_identifier: CanonicalIdentifier,
	pub participant: Address,
	pub total_withdraw: TokenAmount,
}

/// A balance proof was received from a channel participant.
#[derive(Serialize, Deserialize, Clone, Debug, IntoStateChange)]
pub struct ReceiveBalanceProof {
	pub sender: Address,
	pub balance_proof: BalanceProofState,
}

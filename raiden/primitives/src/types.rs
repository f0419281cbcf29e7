use serde::{
	Deserialize,
	Serialize,
};
pub use web3::types::{
	Address,
	Bytes,
	H256,
	U256,
};

mod numeric;
pub use numeric::*;

/// Block number as reported by a chain query, before validation.
///
/// Zero and negative values are sentinels meaning "event not present".
pub type RawBlockNumber = i64;

pub type BalanceHash = H256;

pub type BlockExpiration = U64;

pub type BlockNumber = U64;

pub type BlockHash = H256;

pub type ChannelIdentifier = U256;

pub type EncodedLock = Bytes;

pub type LockedAmount = U256;

pub type Locksroot = H256;

pub type MessageHash = H256;

pub type Nonce = U256;

pub type RevealTimeout = U64;

pub type SecretHash = H256;

pub type Signature = Bytes;

pub type SettleTimeout = U64;

pub type TokenAddress = Address;

pub type TokenNetworkAddress = Address;

pub type TokenAmount = U256;

pub type TransactionHash = H256;

/// Identifies a channel uniquely across token networks.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct CanonicalIdentifier {
	pub token_network_address: TokenNetworkAddress,
	pub channel_identifier: ChannelIdentifier,
}

use async_trait::async_trait;
use raiden_primitives::types::{
	Address,
	ChannelIdentifier,
	RawBlockNumber,
	SettleTimeout,
	TokenAmount,
};

mod channel;
mod common;
mod error;

pub use channel::*;
pub use common::*;
pub use error::*;

/// Both participants of a channel as reported by its contract, ordered from our point of view.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChannelDetails {
	pub our_address: Address,
	pub our_deposit: TokenAmount,
	pub partner_address: Address,
	pub partner_deposit: TokenAmount,
}

/// Read access to the settlement contract of a single channel.
///
/// Implementations must allow concurrent calls, reconciliation of different channels shares the
/// same underlying connection.
#[async_trait]
pub trait PaymentChannelProxy: Send + Sync {
	fn channel_identifier(&self) -> ChannelIdentifier;

	async fn detail(&self) -> Result<ChannelDetails>;

	async fn settle_timeout(&self) -> Result<SettleTimeout>;

	/// Block in which the channel was opened, zero or negative if it is not open.
	async fn opened(&self) -> Result<RawBlockNumber>;

	/// Block in which the channel was closed, zero if it is still open.
	async fn closed(&self) -> Result<RawBlockNumber>;
}

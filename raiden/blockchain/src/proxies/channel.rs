use async_trait::async_trait;
use raiden_primitives::types::{
	Address,
	ChannelIdentifier,
	RawBlockNumber,
	SettleTimeout,
	TokenAmount,
	U256,
};
use web3::{
	contract::{
		Contract,
		Options,
	},
	Transport,
	Web3,
};

use super::{
	common::{
		to_raw_block_number,
		to_settle_timeout,
		Result,
	},
	ChannelDetails,
	PaymentChannelProxy,
	ProxyError,
};
use crate::{
	contracts,
	errors::ContractDefError,
};

/// Proxy to a deployed netting channel contract.
#[derive(Clone)]
pub struct ChannelProxy<T: Transport> {
	contract: Contract<T>,
	channel_identifier: ChannelIdentifier,
	our_address: Address,
}

impl<T> ChannelProxy<T>
where
	T: Transport + Send + Sync,
	T::Out: Send,
{
	pub fn new(
		web3: Web3<T>,
		address: Address,
		channel_identifier: ChannelIdentifier,
		our_address: Address,
	) -> std::result::Result<Self, ContractDefError> {
		let abi = contracts::netting_channel_abi()?;
		let contract = Contract::new(web3.eth(), address, abi);
		Ok(Self { contract, channel_identifier, our_address })
	}

	pub fn address(&self) -> Address {
		self.contract.address()
	}

	async fn query_block_number(&self, function: &str) -> Result<RawBlockNumber> {
		let block_number: U256 =
			self.contract.query(function, (), None, Options::default(), None).await?;
		to_raw_block_number(block_number)
	}
}

#[async_trait]
impl<T> PaymentChannelProxy for ChannelProxy<T>
where
	T: Transport + Send + Sync,
	T::Out: Send,
{
	fn channel_identifier(&self) -> ChannelIdentifier {
		self.channel_identifier
	}

	async fn detail(&self) -> Result<ChannelDetails> {
		let participants: (Address, TokenAmount, Address, TokenAmount) = self
			.contract
			.query("addressAndBalance", (), None, Options::default(), None)
			.await?;

		order_participants(self.our_address, participants)
	}

	async fn settle_timeout(&self) -> Result<SettleTimeout> {
		let settle_timeout: U256 = self
			.contract
			.query("settleTimeout", (), None, Options::default(), None)
			.await?;
		to_settle_timeout(settle_timeout)
	}

	async fn opened(&self) -> Result<RawBlockNumber> {
		self.query_block_number("opened").await
	}

	async fn closed(&self) -> Result<RawBlockNumber> {
		self.query_block_number("closed").await
	}
}

/// The contract stores participants in opening order, put our side first.
pub(crate) fn order_participants(
	our_address: Address,
	participants: (Address, TokenAmount, Address, TokenAmount),
) -> Result<ChannelDetails> {
	let (participant1, balance1, participant2, balance2) = participants;

	if participant1 == our_address {
		Ok(ChannelDetails {
			our_address: participant1,
			our_deposit: balance1,
			partner_address: participant2,
			partner_deposit: balance2,
		})
	} else if participant2 == our_address {
		Ok(ChannelDetails {
			our_address: participant2,
			our_deposit: balance2,
			partner_address: participant1,
			partner_deposit: balance1,
		})
	} else {
		Err(ProxyError::BrokenPrecondition(format!(
			"{:?} is not a participant of the channel",
			our_address
		)))
	}
}

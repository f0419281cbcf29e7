use raiden_primitives::types::{
	CanonicalIdentifier,
	RawBlockNumber,
	RevealTimeout,
	TokenAddress,
	TokenNetworkAddress,
	U64,
};
use raiden_state_machine::{
	errors::StateTransitionError,
	types::{
		ChannelEndState,
		ChannelState,
		TransactionExecutionStatus,
	},
};
use tracing::{
	debug,
	warn,
};

use crate::proxies::{
	PaymentChannelProxy,
	ProxyError,
	Result,
};

/// Why chain data did not yield a channel.
///
/// Absence is routine, the same channel is expected to be reconciled again on a later block.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AbsentChannel {
	/// The contract does not report a positive open block yet.
	NotOpened { opened: RawBlockNumber },
	/// The contract reports a negative close block.
	InvalidCloseBlock { closed: RawBlockNumber },
}

/// Outcome of reconciling one channel.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Reconciliation {
	Channel(ChannelState),
	Absent(AbsentChannel),
}

impl Reconciliation {
	pub fn channel(self) -> Option<ChannelState> {
		match self {
			Reconciliation::Channel(channel_state) => Some(channel_state),
			Reconciliation::Absent(_) => None,
		}
	}

	pub fn is_absent(&self) -> bool {
		matches!(self, Reconciliation::Absent(_))
	}
}

/// Build the channel a settlement contract describes.
///
/// Only reads from the proxy. Settlement is never derived here since the contract cannot be
/// queried once it is settled.
pub async fn reconcile<P>(
	token_address: TokenAddress,
	token_network_address: TokenNetworkAddress,
	reveal_timeout: RevealTimeout,
	proxy: &P,
) -> Result<Reconciliation>
where
	P: PaymentChannelProxy + ?Sized,
{
	let channel_details = proxy.detail().await?;
	let channel_identifier = proxy.channel_identifier();
	let settle_timeout = proxy.settle_timeout().await?;
	let opened = proxy.opened().await?;
	let closed = proxy.closed().await?;

	let open_block_number = match U64::from_raw(opened) {
		Some(block_number) => block_number,
		None => {
			debug!(
				message = "Channel not opened yet",
				channel_identifier = channel_identifier.to_string(),
				opened,
			);
			return Ok(Reconciliation::Absent(AbsentChannel::NotOpened { opened }))
		},
	};

	if closed < 0 {
		warn!(
			message = "Ignoring channel with negative close block",
			channel_identifier = channel_identifier.to_string(),
			closed,
		);
		return Ok(Reconciliation::Absent(AbsentChannel::InvalidCloseBlock { closed }))
	}

	let our_state =
		ChannelEndState::with_deposit(channel_details.our_address, channel_details.our_deposit);
	let partner_state = ChannelEndState::with_deposit(
		channel_details.partner_address,
		channel_details.partner_deposit,
	);

	let open_transaction =
		TransactionExecutionStatus::success(None, open_block_number).map_err(invalid_chain_data)?;

	let mut channel_state = ChannelState::new(
		CanonicalIdentifier { token_network_address, channel_identifier },
		token_address,
		reveal_timeout,
		settle_timeout,
		our_state,
		partner_state,
		open_transaction,
	)
	.map_err(invalid_chain_data)?;

	if let Some(close_block_number) = U64::from_raw(closed) {
		channel_state.mark_closed(None, close_block_number).map_err(invalid_chain_data)?;
	}

	if !channel_state.has_valid_timeouts() {
		warn!(
			message = "Settle timeout is lower than the reveal timeout",
			channel_identifier = channel_identifier.to_string(),
			settle_timeout = settle_timeout.to_string(),
			reveal_timeout = reveal_timeout.to_string(),
		);
	}

	debug!(
		message = "Reconciled channel",
		channel_identifier = channel_identifier.to_string(),
		status = channel_state.status().to_string(),
	);

	Ok(Reconciliation::Channel(channel_state))
}

fn invalid_chain_data(error: StateTransitionError) -> ProxyError {
	ProxyError::BrokenPrecondition(error.to_string())
}

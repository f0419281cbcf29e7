use futures::future::join_all;
use raiden_primitives::types::{
	BlockHash,
	BlockNumber,
	ChannelIdentifier,
	TokenAddress,
	TokenNetworkAddress,
};
use raiden_state_machine::types::{
	ChannelState,
	ContractReceiveChannelClosed,
	ContractReceiveChannelDeposit,
	ContractReceiveChannelOpened,
	StateChange,
	TransactionChannelDeposit,
};
use tracing::{
	info,
	warn,
};

use crate::{
	config::ReconcilerConfig,
	proxies::{
		PaymentChannelProxy,
		ProxyError,
		Result,
	},
	state::{
		self,
		Reconciliation,
	},
};

/// Reconciles the channels of a token network against their contracts.
pub struct ChannelReconciler {
	config: ReconcilerConfig,
}

impl ChannelReconciler {
	pub fn new(config: ReconcilerConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &ReconcilerConfig {
		&self.config
	}

	/// Reconcile a single channel, giving up after the configured query timeout.
	pub async fn reconcile<P>(
		&self,
		token_address: TokenAddress,
		token_network_address: TokenNetworkAddress,
		proxy: &P,
	) -> Result<Reconciliation>
	where
		P: PaymentChannelProxy + ?Sized,
	{
		let reconciliation = state::reconcile(
			token_address,
			token_network_address,
			self.config.reveal_timeout,
			proxy,
		);
		match tokio::time::timeout(self.config.query_timeout, reconciliation).await {
			Ok(result) => result,
			Err(_) => Err(ProxyError::Timeout(self.config.query_timeout)),
		}
	}

	/// Reconcile every channel concurrently.
	///
	/// Results are returned in the order of `proxies`. A failing channel does not affect the
	/// others.
	pub async fn reconcile_all<P>(
		&self,
		token_address: TokenAddress,
		token_network_address: TokenNetworkAddress,
		proxies: &[P],
	) -> Vec<(ChannelIdentifier, Result<Reconciliation>)>
	where
		P: PaymentChannelProxy,
	{
		let tasks = proxies.iter().map(|proxy| async move {
			let result = self.reconcile(token_address, token_network_address, proxy).await;
			(proxy.channel_identifier(), result)
		});
		join_all(tasks).await
	}

	/// Reconcile every channel and turn the present ones into state changes for the registry.
	///
	/// `block_number` and `block_hash` name the block the proxies read from. Channels that could
	/// not be read are logged and skipped, they are picked up again on the next poll.
	pub async fn poll<P>(
		&self,
		token_address: TokenAddress,
		token_network_address: TokenNetworkAddress,
		proxies: &[P],
		block_number: BlockNumber,
		block_hash: BlockHash,
	) -> Vec<StateChange>
	where
		P: PaymentChannelProxy,
	{
		let results = self.reconcile_all(token_address, token_network_address, proxies).await;

		let mut state_changes = vec![];
		for (channel_identifier, result) in results {
			match result {
				Ok(Reconciliation::Channel(channel_state)) =>
					state_changes.extend(channel_state_changes(
						channel_state,
						block_number,
						block_hash,
					)),
				Ok(Reconciliation::Absent(_)) => {},
				Err(e) => {
					warn!(
						message = "Could not reconcile channel",
						channel_identifier = channel_identifier.to_string(),
						error = format!("{}", e),
					);
				},
			}
		}

		info!(
			message = "Reconciled channels",
			token_network_address = format!("{:?}", token_network_address),
			queried = proxies.len(),
			state_changes = state_changes.len(),
		);
		state_changes
	}
}

/// State changes which bring the registry in line with a reconciled channel.
///
/// The opened state change installs the channel if it is unknown. The deposits of an open
/// channel are reported on every call, an unchanged deposit is a no-op for a tracked channel. A
/// close is reported separately so that a channel already tracked as open gets closed.
pub fn channel_state_changes(
	channel_state: ChannelState,
	block_number: BlockNumber,
	block_hash: BlockHash,
) -> Vec<StateChange> {
	let canonical_identifier = channel_state.canonical_identifier().clone();

	let deposits: Vec<StateChange> = if channel_state.is_open() {
		[channel_state.our_state(), channel_state.partner_state()]
			.into_iter()
			.map(|end_state| {
				ContractReceiveChannelDeposit {
					transaction_hash: None,
					block_number,
					block_hash,
					canonical_identifier: canonical_identifier.clone(),
					deposit_transaction: TransactionChannelDeposit {
						participant_address: end_state.address,
						contract_balance: end_state.total_deposit(),
						deposit_block_number: block_number,
					},
				}
				.into()
			})
			.collect()
	} else {
		vec![]
	};

	let closed = channel_state.close_transaction().map(|close_transaction| {
		ContractReceiveChannelClosed {
			transaction_hash: None,
			block_number: close_transaction.block_number(),
			block_hash,
			transaction_from: close_transaction.submitter(),
			canonical_identifier: canonical_identifier.clone(),
		}
	});
	let opened = ContractReceiveChannelOpened {
		transaction_hash: None,
		block_number: channel_state.open_transaction().block_number(),
		block_hash,
		channel_state,
	};

	let mut state_changes = vec![opened.into()];
	state_changes.extend(deposits);
	if let Some(closed) = closed {
		state_changes.push(closed.into());
	}
	state_changes
}

use crate::{
	errors::StateTransitionError,
	types::{
		ChannelState,
		ContractReceiveChannelClosed,
		ContractReceiveChannelDeposit,
		ContractReceiveChannelSettled,
		ContractReceiveChannelWithdraw,
		ReceiveBalanceProof,
		StateChange,
	},
};

type TransitionResult = std::result::Result<ChannelTransition, StateTransitionError>;

/// The result of a channel transition.
///
/// `new_state` is `None` once the channel can be dropped from its token network.
#[derive(Debug)]
pub struct ChannelTransition {
	pub new_state: Option<ChannelState>,
}

fn handle_channel_closed(
	mut channel_state: ChannelState,
	state_change: ContractReceiveChannelClosed,
) -> TransitionResult {
	// A repeated close event for an already closed channel is a no-op.
	let just_closed = &state_change.canonical_identifier == channel_state.canonical_identifier() &&
		channel_state.is_open();

	if just_closed {
		channel_state.mark_closed(state_change.transaction_from, state_change.block_number)?;
	}

	Ok(ChannelTransition { new_state: Some(channel_state) })
}

fn handle_channel_settled(
	mut channel_state: ChannelState,
	state_change: ContractReceiveChannelSettled,
) -> TransitionResult {
	if &state_change.canonical_identifier != channel_state.canonical_identifier() {
		return Ok(ChannelTransition { new_state: Some(channel_state) })
	}

	channel_state.mark_settled(state_change.block_number)?;

	// Pending locks still have to be unlocked on-chain, keep tracking them.
	let should_clear_channel = channel_state.our_state().count_pending_transfers() == 0 &&
		channel_state.partner_state().count_pending_transfers() == 0;
	if should_clear_channel {
		return Ok(ChannelTransition { new_state: None })
	}

	Ok(ChannelTransition { new_state: Some(channel_state) })
}

fn handle_channel_deposit(
	mut channel_state: ChannelState,
	state_change: ContractReceiveChannelDeposit,
) -> TransitionResult {
	let participant_address = state_change.deposit_transaction.participant_address;
	let contract_balance = state_change.deposit_transaction.contract_balance;

	if channel_state.is_participant(participant_address) {
		channel_state.update_contract_balance(participant_address, contract_balance)?;
	}

	Ok(ChannelTransition { new_state: Some(channel_state) })
}

fn handle_channel_withdraw(
	mut channel_state: ChannelState,
	state_change: ContractReceiveChannelWithdraw,
) -> TransitionResult {
	if channel_state.is_participant(state_change.participant) {
		channel_state.update_total_withdraw(state_change.participant, state_change.total_withdraw)?;
	}

	Ok(ChannelTransition { new_state: Some(channel_state) })
}

fn handle_receive_balance_proof(
	mut channel_state: ChannelState,
	state_change: ReceiveBalanceProof,
) -> TransitionResult {
	channel_state.apply_balance_proof(state_change.sender, state_change.balance_proof)?;
	Ok(ChannelTransition { new_state: Some(channel_state) })
}

pub fn state_transition(
	channel_state: ChannelState,
	state_change: StateChange,
) -> TransitionResult {
	match state_change {
		StateChange::ContractReceiveChannelClosed(inner) =>
			handle_channel_closed(channel_state, inner),
		StateChange::ContractReceiveChannelSettled(inner) =>
			handle_channel_settled(channel_state, inner),
		StateChange::ContractReceiveChannelDeposit(inner) =>
			handle_channel_deposit(channel_state, inner),
		StateChange::ContractReceiveChannelWithdraw(inner) =>
			handle_channel_withdraw(channel_state, inner),
		StateChange::ReceiveBalanceProof(inner) =>
			handle_receive_balance_proof(channel_state, inner),
		StateChange::ContractReceiveChannelOpened(_) =>
			Ok(ChannelTransition { new_state: Some(channel_state) }),
	}
}

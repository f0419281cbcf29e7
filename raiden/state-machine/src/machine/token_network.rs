use raiden_primitives::types::ChannelIdentifier;

use super::channel;
use crate::{
	errors::StateTransitionError,
	types::{
		ContractReceiveChannelOpened,
		StateChange,
		TokenNetworkState,
	},
};

type TransitionResult = std::result::Result<(), StateTransitionError>;

/// Run the channel transition on a copy of the channel and commit it only on success.
fn subdispatch_to_channel_by_id(
	token_network_state: &mut TokenNetworkState,
	channel_identifier: ChannelIdentifier,
	state_change: StateChange,
) -> TransitionResult {
	let channel_state =
		match token_network_state.channelidentifiers_to_channels.get(&channel_identifier) {
			Some(channel_state) => channel_state.clone(),
			None => return Ok(()),
		};
	let partner_address = channel_state.partner_state().address;

	let result = channel::state_transition(channel_state, state_change)?;
	match result.new_state {
		Some(channel_state) => {
			token_network_state
				.channelidentifiers_to_channels
				.insert(channel_identifier, channel_state);
		},
		None => {
			token_network_state.channelidentifiers_to_channels.remove(&channel_identifier);

			if let Some(channel_identifiers) =
				token_network_state.partneraddresses_to_channelidentifiers.get_mut(&partner_address)
			{
				channel_identifiers.retain(|identifier| *identifier != channel_identifier);
				if channel_identifiers.is_empty() {
					token_network_state
						.partneraddresses_to_channelidentifiers
						.remove(&partner_address);
				}
			}
		},
	}

	Ok(())
}

fn handle_contract_receive_channel_opened(
	token_network_state: &mut TokenNetworkState,
	state_change: ContractReceiveChannelOpened,
) -> TransitionResult {
	let channel_state = state_change.channel_state;
	let channel_identifier = channel_state.channel_identifier();

	// The channel is already known, later chain events keep it up to date.
	if token_network_state.channelidentifiers_to_channels.contains_key(&channel_identifier) {
		return Ok(())
	}

	token_network_state
		.partneraddresses_to_channelidentifiers
		.entry(channel_state.partner_state().address)
		.or_insert_with(Vec::new)
		.push(channel_identifier);

	token_network_state
		.channelidentifiers_to_channels
		.insert(channel_identifier, channel_state);

	Ok(())
}

/// Apply a state change to a token network.
///
/// The token network is left untouched when the transition fails.
pub fn state_transition(
	token_network_state: &mut TokenNetworkState,
	state_change: StateChange,
) -> TransitionResult {
	match state_change {
		StateChange::ContractReceiveChannelOpened(inner) =>
			handle_contract_receive_channel_opened(token_network_state, inner),
		_ => {
			let channel_identifier = state_change.canonical_identifier().channel_identifier;
			subdispatch_to_channel_by_id(token_network_state, channel_identifier, state_change)
		},
	}
}

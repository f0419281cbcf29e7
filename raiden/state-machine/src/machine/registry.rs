use super::token_network;
use crate::{
	errors::StateTransitionError,
	types::{
		ChannelRegistry,
		StateChange,
		TokenNetworkState,
	},
};

type TransitionResult = std::result::Result<(), StateTransitionError>;

/// Dispatch a state change to the token network it targets.
///
/// A newly opened channel creates its token network on first sight. State changes for unknown
/// token networks are ignored. Only the targeted channel is copied, the registry is left
/// untouched when the transition fails.
pub fn state_transition(
	registry: &mut ChannelRegistry,
	state_change: StateChange,
) -> TransitionResult {
	let token_network_address = state_change.token_network_address();

	if let Some(token_network_state) =
		registry.tokennetworkaddresses_to_tokennetworks.get_mut(&token_network_address)
	{
		return token_network::state_transition(token_network_state, state_change)
	}

	let mut token_network_state = match &state_change {
		StateChange::ContractReceiveChannelOpened(inner) =>
			TokenNetworkState::new(token_network_address, inner.channel_state.token_address()),
		_ => return Ok(()),
	};
	token_network::state_transition(&mut token_network_state, state_change)?;
	registry.add_token_network(token_network_state);

	Ok(())
}

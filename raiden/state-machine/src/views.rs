#![warn(clippy::missing_docs_in_private_items)]

use raiden_primitives::types::{
	Address,
	CanonicalIdentifier,
	TokenAddress,
	TokenNetworkAddress,
};

use crate::types::{
	ChannelRegistry,
	ChannelState,
	ChannelStatus,
	TokenNetworkState,
};

/// Returns token network by address if found.
pub fn get_token_network(
	registry: &ChannelRegistry,
	token_network_address: TokenNetworkAddress,
) -> Option<&TokenNetworkState> {
	registry.tokennetworkaddresses_to_tokennetworks.get(&token_network_address)
}

/// Returns token network by token address if found.
pub fn get_token_network_by_token_address(
	registry: &ChannelRegistry,
	token_address: TokenAddress,
) -> Option<&TokenNetworkState> {
	let token_network_address =
		registry.tokenaddresses_to_tokennetworkaddresses.get(&token_address)?;
	get_token_network(registry, *token_network_address)
}

/// Returns all channel states.
pub fn get_channels(registry: &ChannelRegistry) -> Vec<&ChannelState> {
	registry
		.tokennetworkaddresses_to_tokennetworks
		.values()
		.flat_map(|token_network| token_network.channelidentifiers_to_channels.values())
		.collect()
}

/// Returns channel state by canonical identifier if found.
pub fn get_channel_by_canonical_identifier<'a>(
	registry: &'a ChannelRegistry,
	canonical_identifier: &CanonicalIdentifier,
) -> Option<&'a ChannelState> {
	get_token_network(registry, canonical_identifier.token_network_address)?
		.channelidentifiers_to_channels
		.get(&canonical_identifier.channel_identifier)
}

/// Returns the most recent channel with a partner in a token network if found.
pub fn get_channel_by_partner(
	registry: &ChannelRegistry,
	token_network_address: TokenNetworkAddress,
	partner_address: Address,
) -> Option<&ChannelState> {
	let token_network = get_token_network(registry, token_network_address)?;
	token_network
		.partneraddresses_to_channelidentifiers
		.get(&partner_address)?
		.iter()
		.rev()
		.find_map(|channel_identifier| {
			token_network.channelidentifiers_to_channels.get(channel_identifier)
		})
}

/// Returns the channels of a token network whose partner matches, if any.
pub fn filter_channels_by_partner<'a>(
	registry: &'a ChannelRegistry,
	token_address: TokenAddress,
	partner_addresses: &[Address],
) -> Vec<&'a ChannelState> {
	get_channelstate_filter(registry, token_address, |channel_state| {
		partner_addresses.contains(&channel_state.partner_state().address)
	})
}

/// Returns the channels of a token network which match the filter.
pub fn get_channelstate_filter<F>(
	registry: &ChannelRegistry,
	token_address: TokenAddress,
	filter_fn: F,
) -> Vec<&ChannelState>
where
	F: Fn(&ChannelState) -> bool,
{
	let token_network = match get_token_network_by_token_address(registry, token_address) {
		Some(token_network) => token_network,
		None => return vec![],
	};

	token_network
		.channelidentifiers_to_channels
		.values()
		.filter(|channel_state| filter_fn(*channel_state))
		.collect()
}

/// Returns the open channels of a token network.
pub fn get_channelstate_open(
	registry: &ChannelRegistry,
	token_address: TokenAddress,
) -> Vec<&ChannelState> {
	get_channelstate_filter(registry, token_address, |channel_state| {
		channel_state.status() == ChannelStatus::Opened
	})
}

/// Returns the closed channels of a token network.
pub fn get_channelstate_closed(
	registry: &ChannelRegistry,
	token_address: TokenAddress,
) -> Vec<&ChannelState> {
	get_channelstate_filter(registry, token_address, |channel_state| {
		channel_state.status() == ChannelStatus::Closed
	})
}

/// Returns the settled channels still tracked for a token network.
pub fn get_channelstate_settled(
	registry: &ChannelRegistry,
	token_address: TokenAddress,
) -> Vec<&ChannelState> {
	get_channelstate_filter(registry, token_address, |channel_state| {
		channel_state.status() == ChannelStatus::Settled
	})
}

/// Returns the number of channels in a token network.
pub fn total_token_network_channels(
	registry: &ChannelRegistry,
	token_network_address: TokenNetworkAddress,
) -> usize {
	get_token_network(registry, token_network_address)
		.map(|token_network| token_network.channelidentifiers_to_channels.len())
		.unwrap_or(0)
}

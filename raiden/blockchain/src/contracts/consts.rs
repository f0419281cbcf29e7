pub(crate) const NETTING_CHANNEL: &str =
	include_str!("../../../../resources/contracts/netting_channel.json");

pub(crate) const NETTING_CHANNEL_IDENTIFIER: &str = "NettingChannel";

use std::time::Duration;

use raiden_primitives::types::{
	Address,
	ChannelIdentifier,
	TokenAmount,
	H256,
	U64,
};
use raiden_state_machine::{
	types::{
		ChannelRegistry,
		ChannelStatus,
		StateChange,
	},
	views,
};

use super::factories::MockChannelProxy;
use crate::{
	config::ReconcilerConfig,
	proxies::ProxyError,
	reconciler::{
		channel_state_changes,
		ChannelReconciler,
	},
	state::{
		AbsentChannel,
		Reconciliation,
	},
};

fn reconciler() -> ChannelReconciler {
	ChannelReconciler::new(ReconcilerConfig::default())
}

#[test]
fn test_default_config() {
	let config = ReconcilerConfig::default();
	assert_eq!(config.reveal_timeout, U64::from(50u64));
	assert_eq!(config.query_timeout, Duration::from_secs(30));
}

#[tokio::test]
async fn test_reconcile_times_out() {
	let reconciler = ChannelReconciler::new(ReconcilerConfig {
		query_timeout: Duration::from_millis(10),
		..ReconcilerConfig::default()
	});
	let mut proxy = MockChannelProxy::new(100, 0);
	proxy.delay = Some(Duration::from_secs(5));

	let result = reconciler.reconcile(Address::random(), Address::random(), &proxy).await;
	assert!(matches!(
		result,
		Err(ProxyError::Timeout(timeout)) if timeout == Duration::from_millis(10)
	));
}

#[tokio::test]
async fn test_reconcile_all_keeps_order_and_isolates_failures() {
	let mut unavailable = MockChannelProxy::new(100, 0).with_identifier(2);
	unavailable.unavailable = true;
	let proxies = vec![
		MockChannelProxy::new(100, 0).with_identifier(1),
		unavailable,
		MockChannelProxy::new(0, 0).with_identifier(3),
		MockChannelProxy::new(100, 150).with_identifier(4),
	];

	let results = reconciler().reconcile_all(Address::random(), Address::random(), &proxies).await;

	let identifiers: Vec<ChannelIdentifier> =
		results.iter().map(|(channel_identifier, _)| *channel_identifier).collect();
	assert_eq!(
		identifiers,
		vec![1u64, 2, 3, 4].into_iter().map(ChannelIdentifier::from).collect::<Vec<_>>()
	);

	assert!(matches!(
		&results[0].1,
		Ok(Reconciliation::Channel(channel_state)) if channel_state.is_open()
	));
	assert!(matches!(&results[1].1, Err(ProxyError::BrokenPrecondition(_))));
	assert!(matches!(
		&results[2].1,
		Ok(Reconciliation::Absent(AbsentChannel::NotOpened { opened: 0 }))
	));
	assert!(matches!(
		&results[3].1,
		Ok(Reconciliation::Channel(channel_state)) if channel_state.is_closed()
	));
}

#[tokio::test]
async fn test_channel_state_changes() {
	let proxy = MockChannelProxy::new(100, 150);
	let channel_state = reconciler()
		.reconcile(Address::random(), Address::random(), &proxy)
		.await
		.expect("Reconcile should succeed")
		.channel()
		.expect("Channel should be present");

	let block_hash = H256::random();
	let state_changes =
		channel_state_changes(channel_state.clone(), U64::from(200u64), block_hash);
	assert_eq!(state_changes.len(), 2);

	match &state_changes[0] {
		StateChange::ContractReceiveChannelOpened(inner) => {
			assert_eq!(inner.block_number, U64::from(100u64));
			assert_eq!(inner.block_hash, block_hash);
			assert_eq!(inner.channel_state, channel_state);
		},
		other => panic!("Unexpected state change {}", other.type_name()),
	}
	match &state_changes[1] {
		StateChange::ContractReceiveChannelClosed(inner) => {
			assert_eq!(inner.block_number, U64::from(150u64));
			assert_eq!(&inner.canonical_identifier, channel_state.canonical_identifier());
		},
		other => panic!("Unexpected state change {}", other.type_name()),
	}
}

#[tokio::test]
async fn test_poll_updates_registry() {
	let token_address = Address::random();
	let token_network_address = Address::random();
	let reconciler = reconciler();

	let open = MockChannelProxy::new(100, 0).with_identifier(1);
	let mut not_opened = MockChannelProxy::new(0, 0).with_identifier(2);
	not_opened.details.our_address = open.details.our_address;
	let mut proxies = vec![open, not_opened];

	let mut registry = ChannelRegistry::default();
	let state_changes = reconciler
		.poll(token_address, token_network_address, &proxies, U64::from(110u64), H256::random())
		.await;
	// Opened plus one deposit per participant.
	assert_eq!(state_changes.len(), 3);
	for state_change in state_changes {
		registry.transition(state_change).expect("Transition should succeed");
	}
	assert_eq!(views::get_channelstate_open(&registry, token_address).len(), 1);

	// The first channel gets closed and the second one opened on a later block.
	proxies[0].closed = 150;
	proxies[1].opened = 120;
	let state_changes = reconciler
		.poll(token_address, token_network_address, &proxies, U64::from(160u64), H256::random())
		.await;
	for state_change in state_changes {
		registry.transition(state_change).expect("Transition should succeed");
	}

	let channels = views::get_channels(&registry);
	assert_eq!(channels.len(), 2);
	let closed = views::get_channelstate_closed(&registry, token_address);
	assert_eq!(closed.len(), 1);
	assert_eq!(closed[0].channel_identifier(), ChannelIdentifier::from(1u64));
	assert_eq!(closed[0].status(), ChannelStatus::Closed);
	assert_eq!(views::get_channelstate_open(&registry, token_address).len(), 1);
}

#[tokio::test]
async fn test_poll_skips_failed_channels() {
	let mut proxy = MockChannelProxy::new(100, 0);
	proxy.unavailable = true;

	let state_changes = reconciler()
		.poll(Address::random(), Address::random(), &[proxy], U64::from(110u64), H256::random())
		.await;
	assert!(state_changes.is_empty());
}

#[tokio::test]
async fn test_channel_state_changes_report_deposits_of_open_channel() {
	let proxy = MockChannelProxy::new(100, 0);
	let channel_state = reconciler()
		.reconcile(Address::random(), Address::random(), &proxy)
		.await
		.expect("Reconcile should succeed")
		.channel()
		.expect("Channel should be present");

	let state_changes = channel_state_changes(channel_state, U64::from(120u64), H256::random());
	let deposits: Vec<_> = state_changes
		.iter()
		.filter_map(|state_change| match state_change {
			StateChange::ContractReceiveChannelDeposit(inner) => Some(inner),
			_ => None,
		})
		.collect();

	assert_eq!(deposits.len(), 2);
	assert_eq!(deposits[0].deposit_transaction.participant_address, proxy.details.our_address);
	assert_eq!(deposits[0].deposit_transaction.contract_balance, TokenAmount::from(50u64));
	assert_eq!(deposits[1].deposit_transaction.participant_address, proxy.details.partner_address);
	assert_eq!(deposits[1].deposit_transaction.contract_balance, TokenAmount::from(30u64));
	assert_eq!(deposits[1].block_number, U64::from(120u64));
}

#[tokio::test]
async fn test_poll_follows_deposit_changes() {
	let token_address = Address::random();
	let token_network_address = Address::random();
	let reconciler = reconciler();
	let mut proxies = vec![MockChannelProxy::new(100, 0)];
	let partner_address = proxies[0].details.partner_address;

	let mut registry = ChannelRegistry::default();
	for block_number in [110u64, 120u64] {
		let state_changes = reconciler
			.poll(
				token_address,
				token_network_address,
				&proxies,
				U64::from(block_number),
				H256::random(),
			)
			.await;
		for state_change in state_changes {
			registry.transition(state_change).expect("Transition should succeed");
		}
		proxies[0].details.partner_deposit = TokenAmount::from(80u64);
	}

	let channel_state =
		views::get_channel_by_partner(&registry, token_network_address, partner_address)
			.expect("Channel should be tracked");
	assert_eq!(channel_state.partner_total_deposit(), TokenAmount::from(80u64));
	assert_eq!(channel_state.our_total_deposit(), TokenAmount::from(50u64));
}

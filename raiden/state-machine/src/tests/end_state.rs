use crate::{
	constants::MAXIMUM_PENDING_TRANSFERS,
	errors::StateTransitionError,
	tests::factories::{
		balance_proof,
		lock,
		open_channel_state,
	},
	types::{
		Address,
		ChannelEndState,
		Nonce,
		SecretHash,
		TokenAmount,
	},
};

#[test]
fn test_apply_balance_proof_requires_increasing_transferred_amount() {
	let channel_state = open_channel_state();
	let mut end_state = channel_state.partner_state().clone();

	end_state
		.apply_balance_proof(balance_proof(&channel_state, 1, 10))
		.expect("First balance proof should be accepted");
	assert_eq!(end_state.transferred_amount(), TokenAmount::from(10));
	assert_eq!(end_state.nonce(), Nonce::from(1));

	let before = end_state.clone();
	for transferred_amount in [0u64, 5, 10] {
		let result =
			end_state.apply_balance_proof(balance_proof(&channel_state, 2, transferred_amount));
		assert!(matches!(result, Err(StateTransitionError::StaleBalanceProof { .. })));
		assert_eq!(end_state, before);
	}

	end_state
		.apply_balance_proof(balance_proof(&channel_state, 2, 11))
		.expect("Newer balance proof should be accepted");
	assert_eq!(end_state.transferred_amount(), TokenAmount::from(11));
	assert_eq!(end_state.next_nonce(), Nonce::from(3));
}

#[test]
fn test_apply_balance_proof_is_decided_by_transferred_amount() {
	let channel_state = open_channel_state();
	let mut end_state = channel_state.partner_state().clone();

	end_state
		.apply_balance_proof(balance_proof(&channel_state, 5, 10))
		.expect("First balance proof should be accepted");

	end_state
		.apply_balance_proof(balance_proof(&channel_state, 5, 20))
		.expect("Higher transferred amount should be accepted");
	assert_eq!(end_state.transferred_amount(), TokenAmount::from(20));

	end_state
		.apply_balance_proof(balance_proof(&channel_state, 4, 30))
		.expect("Higher transferred amount should be accepted");
	assert_eq!(end_state.transferred_amount(), TokenAmount::from(30));
	assert_eq!(end_state.nonce(), Nonce::from(4));

	let before = end_state.clone();
	let result = end_state.apply_balance_proof(balance_proof(&channel_state, 9, 30));
	assert_eq!(
		result,
		Err(StateTransitionError::StaleBalanceProof {
			current: TokenAmount::from(30),
			received: TokenAmount::from(30),
		})
	);
	assert_eq!(end_state, before);
}

#[test]
fn test_first_balance_proof_must_transfer() {
	let channel_state = open_channel_state();
	let mut end_state = channel_state.partner_state().clone();
	assert_eq!(end_state.transferred_amount(), TokenAmount::zero());

	let result = end_state.apply_balance_proof(balance_proof(&channel_state, 1, 0));
	assert_eq!(
		result,
		Err(StateTransitionError::StaleBalanceProof {
			current: TokenAmount::zero(),
			received: TokenAmount::zero(),
		})
	);
	assert!(end_state.balance_proof().is_none());

	end_state
		.apply_balance_proof(balance_proof(&channel_state, 1, 1))
		.expect("Proof advancing the counter should be accepted");
	assert_eq!(end_state.transferred_amount(), TokenAmount::from(1));
}

#[test]
fn test_balance_proof_locked_amount_bounded_by_balance() {
	let channel_state = open_channel_state();
	let mut end_state = channel_state.partner_state().clone();
	let mut proof = balance_proof(&channel_state, 1, 1);
	proof.locked_amount = end_state.balance() + 1;

	let result = end_state.apply_balance_proof(proof);
	assert!(matches!(result, Err(StateTransitionError::InsufficientBalance { .. })));
	assert!(end_state.balance_proof().is_none());
}

#[test]
fn test_contract_balance_only_grows() {
	let mut end_state = ChannelEndState::with_deposit(Address::random(), TokenAmount::from(50));

	end_state.update_contract_balance(TokenAmount::from(40));
	assert_eq!(end_state.total_deposit(), TokenAmount::from(50));

	end_state.update_contract_balance(TokenAmount::from(70));
	assert_eq!(end_state.total_deposit(), TokenAmount::from(70));
}

#[test]
fn test_total_withdraw_bounded_by_deposit() {
	let mut end_state = ChannelEndState::with_deposit(Address::random(), TokenAmount::from(50));

	end_state.update_total_withdraw(TokenAmount::from(20)).expect("Withdraw should be valid");
	assert_eq!(end_state.total_withdraw(), TokenAmount::from(20));
	assert_eq!(end_state.balance(), TokenAmount::from(30));

	end_state.update_total_withdraw(TokenAmount::from(10)).expect("Older withdraw is ignored");
	assert_eq!(end_state.total_withdraw(), TokenAmount::from(20));

	let result = end_state.update_total_withdraw(TokenAmount::from(51));
	assert!(matches!(result, Err(StateTransitionError::InsufficientBalance { .. })));
	assert_eq!(end_state.total_withdraw(), TokenAmount::from(20));
}

#[test]
fn test_locks_bounded_by_balance() {
	let mut end_state = ChannelEndState::with_deposit(Address::random(), TokenAmount::from(50));

	let first = lock(30, b"first");
	let first_secrethash = first.secrethash;
	end_state.register_lock(first).expect("Lock should fit");
	assert_eq!(end_state.locked_amount(), TokenAmount::from(30));
	assert_eq!(end_state.count_pending_transfers(), 1);
	assert!(end_state.pending_lock(&first_secrethash).is_some());

	let result = end_state.register_lock(lock(21, b"second"));
	assert_eq!(
		result,
		Err(StateTransitionError::InsufficientBalance {
			required: TokenAmount::from(51),
			available: TokenAmount::from(50),
		})
	);

	end_state.register_lock(lock(20, b"second")).expect("Lock should fit");
	assert_eq!(end_state.locked_amount(), TokenAmount::from(50));

	let released = end_state.release_lock(first_secrethash).expect("Lock should be pending");
	assert_eq!(released.amount, TokenAmount::from(30));
	assert_eq!(end_state.locked_amount(), TokenAmount::from(20));
	assert!(end_state.release_lock(SecretHash::random()).is_none());
}

#[test]
fn test_pending_locks_are_capped() {
	let mut end_state = ChannelEndState::with_deposit(
		Address::random(),
		TokenAmount::from(MAXIMUM_PENDING_TRANSFERS as u64 + 1),
	);

	for i in 0..MAXIMUM_PENDING_TRANSFERS {
		end_state
			.register_lock(lock(1, &(i as u64).to_be_bytes()))
			.expect("Lock should fit");
	}

	let result = end_state.register_lock(lock(1, b"one too many"));
	assert_eq!(result, Err(StateTransitionError::TooManyPendingLocks(MAXIMUM_PENDING_TRANSFERS)));
}

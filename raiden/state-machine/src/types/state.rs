use std::{
	cmp::max,
	collections::HashMap,
};

use derive_more::Display;
use raiden_primitives::{
	constants::LOCKSROOT_OF_NO_LOCKS,
	hashing::hash_balance_data,
	traits::ToBytes,
	types::{
		Address,
		BalanceHash,
		BlockExpiration,
		BlockNumber,
		Bytes,
		CanonicalIdentifier,
		ChannelIdentifier,
		EncodedLock,
		LockedAmount,
		Locksroot,
		MessageHash,
		Nonce,
		RevealTimeout,
		SecretHash,
		SettleTimeout,
		Signature,
		TokenAddress,
		TokenAmount,
		TokenNetworkAddress,
	},
};
use serde::{
	Deserialize,
	Serialize,
};

use crate::{
	constants::MAXIMUM_PENDING_TRANSFERS,
	errors::StateTransitionError,
	machine::registry,
	types::{
		StateChange,
		TransactionExecutionStatus,
	},
};

#[derive(Copy, Clone, Display, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelStatus {
	#[display(fmt = "opened")]
	Opened,
	#[display(fmt = "closed")]
	Closed,
	#[display(fmt = "settled")]
	Settled,
}

/// Holds the channels of every known token network.
#[derive(Default, Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct ChannelRegistry {
	pub tokennetworkaddresses_to_tokennetworks: HashMap<TokenNetworkAddress, TokenNetworkState>,
	pub tokenaddresses_to_tokennetworkaddresses: HashMap<TokenAddress, TokenNetworkAddress>,
}

impl ChannelRegistry {
	pub fn new(token_network_list: Vec<TokenNetworkState>) -> ChannelRegistry {
		let mut registry = ChannelRegistry::default();
		for token_network in token_network_list {
			registry.add_token_network(token_network);
		}
		registry
	}

	pub fn add_token_network(&mut self, token_network: TokenNetworkState) {
		self.tokenaddresses_to_tokennetworkaddresses
			.insert(token_network.token_address, token_network.address);
		self.tokennetworkaddresses_to_tokennetworks
			.insert(token_network.address, token_network);
	}

	/// Apply a state change, leaving the registry untouched if the transition fails.
	pub fn transition(&mut self, state_change: StateChange) -> Result<(), StateTransitionError> {
		registry::state_transition(self, state_change)
	}
}

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct TokenNetworkState {
	pub address: TokenNetworkAddress,
	pub token_address: TokenAddress,
	pub channelidentifiers_to_channels: HashMap<ChannelIdentifier, ChannelState>,
	pub partneraddresses_to_channelidentifiers: HashMap<Address, Vec<ChannelIdentifier>>,
}

impl TokenNetworkState {
	pub fn new(address: TokenNetworkAddress, token_address: TokenAddress) -> TokenNetworkState {
		TokenNetworkState {
			address,
			token_address,
			channelidentifiers_to_channels: HashMap::new(),
			partneraddresses_to_channelidentifiers: HashMap::new(),
		}
	}
}

/// A bilateral channel as derived from the settlement contract.
///
/// A channel only exists once its open transaction is confirmed, so `open_transaction` is always
/// set and successful. `close_transaction` is set exactly when the channel has been closed.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct ChannelState {
	canonical_identifier: CanonicalIdentifier,
	token_address: TokenAddress,
	reveal_timeout: RevealTimeout,
	settle_timeout: SettleTimeout,
	our_state: ChannelEndState,
	partner_state: ChannelEndState,
	open_transaction: TransactionExecutionStatus,
	close_transaction: Option<TransactionExecutionStatus>,
	settle_transaction: Option<TransactionExecutionStatus>,
}

impl ChannelState {
	pub fn new(
		canonical_identifier: CanonicalIdentifier,
		token_address: TokenAddress,
		reveal_timeout: RevealTimeout,
		settle_timeout: SettleTimeout,
		our_state: ChannelEndState,
		partner_state: ChannelEndState,
		open_transaction: TransactionExecutionStatus,
	) -> Result<ChannelState, StateTransitionError> {
		if !open_transaction.is_success() {
			return Err(StateTransitionError::UnsuccessfulTransaction("open"))
		}

		Ok(ChannelState {
			canonical_identifier,
			token_address,
			reveal_timeout,
			settle_timeout,
			our_state,
			partner_state,
			open_transaction,
			close_transaction: None,
			settle_transaction: None,
		})
	}

	pub fn canonical_identifier(&self) -> &CanonicalIdentifier {
		&self.canonical_identifier
	}

	pub fn channel_identifier(&self) -> ChannelIdentifier {
		self.canonical_identifier.channel_identifier
	}

	pub fn token_network_address(&self) -> TokenNetworkAddress {
		self.canonical_identifier.token_network_address
	}

	pub fn token_address(&self) -> TokenAddress {
		self.token_address
	}

	pub fn reveal_timeout(&self) -> RevealTimeout {
		self.reveal_timeout
	}

	pub fn settle_timeout(&self) -> SettleTimeout {
		self.settle_timeout
	}

	pub fn our_state(&self) -> &ChannelEndState {
		&self.our_state
	}

	pub fn partner_state(&self) -> &ChannelEndState {
		&self.partner_state
	}

	pub fn open_transaction(&self) -> &TransactionExecutionStatus {
		&self.open_transaction
	}

	pub fn close_transaction(&self) -> Option<&TransactionExecutionStatus> {
		self.close_transaction.as_ref()
	}

	pub fn settle_transaction(&self) -> Option<&TransactionExecutionStatus> {
		self.settle_transaction.as_ref()
	}

	pub fn status(&self) -> ChannelStatus {
		if self.settle_transaction.is_some() {
			ChannelStatus::Settled
		} else if self.close_transaction.is_some() {
			ChannelStatus::Closed
		} else {
			ChannelStatus::Opened
		}
	}

	pub fn is_open(&self) -> bool {
		self.status() == ChannelStatus::Opened
	}

	pub fn is_closed(&self) -> bool {
		self.status() == ChannelStatus::Closed
	}

	pub fn is_settled(&self) -> bool {
		self.status() == ChannelStatus::Settled
	}

	/// The settle timeout must leave room for a secret reveal.
	///
	/// Not enforced on construction, the caller decides how to treat a violating channel.
	pub fn has_valid_timeouts(&self) -> bool {
		self.settle_timeout >= self.reveal_timeout
	}

	pub fn end_state(&self, address: Address) -> Option<&ChannelEndState> {
		if address == self.our_state.address {
			Some(&self.our_state)
		} else if address == self.partner_state.address {
			Some(&self.partner_state)
		} else {
			None
		}
	}

	pub fn is_participant(&self, address: Address) -> bool {
		self.end_state(address).is_some()
	}

	pub fn our_total_deposit(&self) -> TokenAmount {
		self.our_state.total_deposit()
	}

	pub fn partner_total_deposit(&self) -> TokenAmount {
		self.partner_state.total_deposit()
	}

	pub fn capacity(&self) -> TokenAmount {
		self.our_state.balance().saturating_add(self.partner_state.balance())
	}

	/// Amount we can still send through this channel.
	pub fn distributable(&self) -> TokenAmount {
		self.our_state
			.balance()
			.saturating_add(self.partner_state.transferred_amount())
			.saturating_sub(self.our_state.transferred_amount())
			.saturating_sub(self.our_state.locked_amount())
	}

	pub fn is_usable_for_new_transfer(&self, amount: TokenAmount) -> bool {
		self.is_open() &&
			self.has_valid_timeouts() &&
			self.our_state.count_pending_transfers() < MAXIMUM_PENDING_TRANSFERS &&
			amount <= self.distributable()
	}

	/// Open → Closed.
	pub fn set_closed(
		&mut self,
		close_transaction: TransactionExecutionStatus,
	) -> Result<(), StateTransitionError> {
		if !self.is_open() {
			return Err(StateTransitionError::InvalidTransition {
				transition: "close",
				status: self.status(),
			})
		}
		if !close_transaction.is_success() {
			return Err(StateTransitionError::UnsuccessfulTransaction("close"))
		}
		self.close_transaction = Some(close_transaction);
		Ok(())
	}

	pub fn mark_closed(
		&mut self,
		submitter: Option<Address>,
		block_number: BlockNumber,
	) -> Result<(), StateTransitionError> {
		let close_transaction = TransactionExecutionStatus::success(submitter, block_number)?;
		self.set_closed(close_transaction)
	}

	/// Closed → Settled.
	pub fn mark_settled(&mut self, block_number: BlockNumber) -> Result<(), StateTransitionError> {
		if !self.is_closed() {
			return Err(StateTransitionError::InvalidTransition {
				transition: "settle",
				status: self.status(),
			})
		}
		self.settle_transaction = Some(TransactionExecutionStatus::success(None, block_number)?);
		Ok(())
	}

	pub fn apply_balance_proof(
		&mut self,
		sender: Address,
		balance_proof: BalanceProofState,
	) -> Result<(), StateTransitionError> {
		if balance_proof.canonical_identifier != self.canonical_identifier {
			return Err(StateTransitionError::ChannelMismatch {
				expected: self.canonical_identifier.clone(),
				received: balance_proof.canonical_identifier,
			})
		}
		self.open_end_state_mut(sender, "apply a balance proof to")?
			.apply_balance_proof(balance_proof)
	}

	pub fn register_lock(
		&mut self,
		sender: Address,
		lock: HashTimeLockState,
	) -> Result<(), StateTransitionError> {
		self.open_end_state_mut(sender, "lock funds in")?.register_lock(lock)
	}

	pub fn release_lock(
		&mut self,
		sender: Address,
		secrethash: SecretHash,
	) -> Result<Option<HashTimeLockState>, StateTransitionError> {
		Ok(self.open_end_state_mut(sender, "unlock funds in")?.release_lock(secrethash))
	}

	pub fn update_contract_balance(
		&mut self,
		participant: Address,
		contract_balance: TokenAmount,
	) -> Result<(), StateTransitionError> {
		self.open_end_state_mut(participant, "deposit to")?
			.update_contract_balance(contract_balance);
		Ok(())
	}

	pub fn update_total_withdraw(
		&mut self,
		participant: Address,
		total_withdraw: TokenAmount,
	) -> Result<(), StateTransitionError> {
		self.open_end_state_mut(participant, "withdraw from")?
			.update_total_withdraw(total_withdraw)
	}

	/// End states are frozen once the channel is no longer open.
	fn open_end_state_mut(
		&mut self,
		address: Address,
		transition: &'static str,
	) -> Result<&mut ChannelEndState, StateTransitionError> {
		let status = self.status();
		if status != ChannelStatus::Opened {
			return Err(StateTransitionError::InvalidTransition { transition, status })
		}
		if address == self.our_state.address {
			Ok(&mut self.our_state)
		} else if address == self.partner_state.address {
			Ok(&mut self.partner_state)
		} else {
			Err(StateTransitionError::UnknownParticipant(address))
		}
	}
}

/// One participant's side of a channel.
#[derive(Default, Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct ChannelEndState {
	pub address: Address,
	contract_balance: TokenAmount,
	onchain_total_withdraw: TokenAmount,
	secrethashes_to_lockedlocks: HashMap<SecretHash, HashTimeLockState>,
	balance_proof: Option<BalanceProofState>,
}

impl ChannelEndState {
	pub fn new(address: Address) -> Self {
		Self {
			address,
			contract_balance: TokenAmount::zero(),
			onchain_total_withdraw: TokenAmount::zero(),
			secrethashes_to_lockedlocks: HashMap::new(),
			balance_proof: None,
		}
	}

	pub fn with_deposit(address: Address, contract_balance: TokenAmount) -> Self {
		Self { contract_balance, ..Self::new(address) }
	}

	pub fn total_deposit(&self) -> TokenAmount {
		self.contract_balance
	}

	pub fn total_withdraw(&self) -> TokenAmount {
		self.onchain_total_withdraw
	}

	/// Deposit minus withdrawn amount.
	pub fn balance(&self) -> TokenAmount {
		self.contract_balance.saturating_sub(self.onchain_total_withdraw)
	}

	pub fn balance_proof(&self) -> Option<&BalanceProofState> {
		self.balance_proof.as_ref()
	}

	pub fn transferred_amount(&self) -> TokenAmount {
		self.balance_proof.as_ref().map(|bp| bp.transferred_amount).unwrap_or_default()
	}

	pub fn nonce(&self) -> Nonce {
		self.balance_proof.as_ref().map(|bp| bp.nonce).unwrap_or_default()
	}

	pub fn next_nonce(&self) -> Nonce {
		self.nonce() + 1
	}

	pub fn count_pending_transfers(&self) -> usize {
		self.secrethashes_to_lockedlocks.len()
	}

	pub fn pending_lock(&self, secrethash: &SecretHash) -> Option<&HashTimeLockState> {
		self.secrethashes_to_lockedlocks.get(secrethash)
	}

	pub fn locked_amount(&self) -> LockedAmount {
		self.secrethashes_to_lockedlocks
			.values()
			.map(|lock| lock.amount)
			.fold(LockedAmount::zero(), |acc, x| acc.saturating_add(x))
	}

	/// Deposits only grow, a lower value is an older event and is ignored.
	pub fn update_contract_balance(&mut self, contract_balance: TokenAmount) {
		if contract_balance > self.contract_balance {
			self.contract_balance = contract_balance;
		}
	}

	pub fn update_total_withdraw(
		&mut self,
		total_withdraw: TokenAmount,
	) -> Result<(), StateTransitionError> {
		if total_withdraw > self.contract_balance {
			return Err(StateTransitionError::InsufficientBalance {
				required: total_withdraw,
				available: self.contract_balance,
			})
		}
		self.onchain_total_withdraw = max(self.onchain_total_withdraw, total_withdraw);
		Ok(())
	}

	pub fn register_lock(&mut self, lock: HashTimeLockState) -> Result<(), StateTransitionError> {
		if self.count_pending_transfers() >= MAXIMUM_PENDING_TRANSFERS {
			return Err(StateTransitionError::TooManyPendingLocks(self.count_pending_transfers()))
		}

		let locked_amount = self.locked_amount().saturating_add(lock.amount);
		if locked_amount > self.balance() {
			return Err(StateTransitionError::InsufficientBalance {
				required: locked_amount,
				available: self.balance(),
			})
		}

		self.secrethashes_to_lockedlocks.insert(lock.secrethash, lock);
		Ok(())
	}

	pub fn release_lock(&mut self, secrethash: SecretHash) -> Option<HashTimeLockState> {
		self.secrethashes_to_lockedlocks.remove(&secrethash)
	}

	/// Replace the latest balance proof.
	///
	/// The transferred amount is the monotonic counter, a newer proof must strictly exceed the
	/// stored one. Without a stored proof the counter starts at zero.
	pub fn apply_balance_proof(
		&mut self,
		balance_proof: BalanceProofState,
	) -> Result<(), StateTransitionError> {
		if balance_proof.transferred_amount <= self.transferred_amount() {
			return Err(StateTransitionError::StaleBalanceProof {
				current: self.transferred_amount(),
				received: balance_proof.transferred_amount,
			})
		}

		if balance_proof.locked_amount > self.balance() {
			return Err(StateTransitionError::InsufficientBalance {
				required: balance_proof.locked_amount,
				available: self.balance(),
			})
		}

		self.balance_proof = Some(balance_proof);
		Ok(())
	}
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BalanceProofState {
	pub nonce: Nonce,
	pub transferred_amount: TokenAmount,
	pub locked_amount: LockedAmount,
	pub locksroot: Locksroot,
	pub canonical_identifier: CanonicalIdentifier,
	pub balance_hash: BalanceHash,
	pub message_hash: Option<MessageHash>,
	pub signature: Option<Signature>,
	pub sender: Option<Address>,
}

impl BalanceProofState {
	pub fn new(
		nonce: Nonce,
		transferred_amount: TokenAmount,
		locked_amount: LockedAmount,
		locksroot: Locksroot,
		canonical_identifier: CanonicalIdentifier,
	) -> Self {
		let balance_hash = hash_balance_data(transferred_amount, locked_amount, &locksroot);
		Self {
			nonce,
			transferred_amount,
			locked_amount,
			locksroot,
			canonical_identifier,
			balance_hash,
			message_hash: None,
			signature: None,
			sender: None,
		}
	}

	/// A proof without any pending locks.
	pub fn without_locks(
		nonce: Nonce,
		transferred_amount: TokenAmount,
		canonical_identifier: CanonicalIdentifier,
	) -> Self {
		Self::new(
			nonce,
			transferred_amount,
			LockedAmount::zero(),
			*LOCKSROOT_OF_NO_LOCKS,
			canonical_identifier,
		)
	}
}

#[derive(Default, Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct HashTimeLockState {
	pub amount: TokenAmount,
	pub expiration: BlockExpiration,
	pub secrethash: SecretHash,
	pub encoded: EncodedLock,
}

impl HashTimeLockState {
	pub fn create(
		amount: TokenAmount,
		expiration: BlockExpiration,
		secrethash: SecretHash,
	) -> Self {
		let mut data = expiration.to_bytes();
		data.extend_from_slice(&amount.to_bytes());
		data.extend_from_slice(secrethash.as_bytes());
		Self { amount, expiration, secrethash, encoded: Bytes(data) }
	}
}

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct TransactionChannelDeposit {
	pub participant_address: Address,
	pub contract_balance: TokenAmount,
	pub deposit_block_number: BlockNumber,
}

use web3::signing::keccak256;

use crate::{
	constants::LOCKSROOT_OF_NO_LOCKS,
	traits::ToBytes,
	types::{
		BalanceHash,
		LockedAmount,
		Locksroot,
		TokenAmount,
	},
};

/// Hash of the balance data a balance proof commits to.
///
/// An empty balance proof (nothing transferred, nothing locked) hashes to zero, matching the
/// value the settlement contract stores for a participant that never sent a proof.
pub fn hash_balance_data(
	transferred_amount: TokenAmount,
	locked_amount: LockedAmount,
	locksroot: &Locksroot,
) -> BalanceHash {
	if transferred_amount.is_zero() &&
		locked_amount.is_zero() &&
		locksroot == &*LOCKSROOT_OF_NO_LOCKS
	{
		return BalanceHash::zero()
	}

	let hash = keccak256(
		&[&transferred_amount.to_bytes()[..], &locked_amount.to_bytes()[..], locksroot.as_bytes()]
			.concat(),
	);
	BalanceHash::from_slice(&hash)
}

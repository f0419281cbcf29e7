#![warn(clippy::missing_docs_in_private_items)]

use derive_more::Display;
use serde::{
	Deserialize,
	Serialize,
};
use web3::types::U64 as PrimitiveU64;

use super::RawBlockNumber;

/// A wrapper around web3's U64 types for consistency.
#[derive(
	Default,
	Copy,
	Clone,
	Display,
	Debug,
	derive_more::Deref,
	Eq,
	Ord,
	PartialEq,
	PartialOrd,
	Hash,
	Serialize,
	Deserialize,
)]
pub struct U64(PrimitiveU64);

impl U64 {
	/// Return zero value.
	pub fn zero() -> Self {
		Self(PrimitiveU64::zero())
	}

	/// Convert a raw chain-reported block number.
	///
	/// Returns `None` for zero and negative values.
	pub fn from_raw(raw: RawBlockNumber) -> Option<Self> {
		if raw <= 0 {
			return None
		}
		Some(Self::from(raw as u64))
	}

	/// Convert to bytes.
	pub fn as_bytes(&self) -> Vec<u8> {
		let mut bytes: [u8; 8] = [0; 8];
		self.0.to_big_endian(&mut bytes);
		bytes.to_vec()
	}

	/// Convert to big endian bytes, left padded to 32 bytes.
	pub fn to_be_bytes(&self) -> Vec<u8> {
		let bytes = self.as_bytes();
		let mut padded_bytes: [u8; 32] = [0; 32];
		padded_bytes[24..].copy_from_slice(&bytes);
		padded_bytes.to_vec()
	}
}

impl From<u64> for U64 {
	fn from(n: u64) -> Self {
		Self(n.into())
	}
}

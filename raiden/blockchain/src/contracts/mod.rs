use serde_json::Value;

use crate::errors::ContractDefError;

mod consts;

pub type Result<T> = std::result::Result<T, ContractDefError>;

/// Load the ABI of the netting channel contract.
pub fn netting_channel_abi() -> Result<ethabi::Contract> {
	let specs: Value = serde_json::from_str(consts::NETTING_CHANNEL)?;
	let abi = specs
		.get("contracts")
		.and_then(|contracts| contracts.get(consts::NETTING_CHANNEL_IDENTIFIER))
		.and_then(|contract| contract.get("abi"))
		.ok_or(ContractDefError::SpecNotFound(consts::NETTING_CHANNEL_IDENTIFIER))?;

	let abi = serde_json::to_vec(abi)?;
	ethabi::Contract::load(abi.as_slice()).map_err(ContractDefError::ABI)
}

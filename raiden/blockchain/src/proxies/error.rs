use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
	#[error("Broken precondition: `{0}`")]
	BrokenPrecondition(String),
	#[error(transparent)]
	Web3(#[from] web3::Error),
	#[error(transparent)]
	ChainError(#[from] web3::contract::Error),
	#[error("Chain query timed out after {0:?}")]
	Timeout(Duration),
}

//! Derives channel state from the settlement contracts on chain.
#![warn(clippy::missing_docs_in_private_items)]

/// Reconciler configuration.
pub mod config;
/// Contract ABI definitions.
pub mod contracts;
/// Contract definition errors.
pub mod errors;
/// Settlement contract proxies.
pub mod proxies;
/// Reconciliation of many channels.
pub mod reconciler;
/// Reconciliation of a single channel from chain data.
pub mod state;

#[cfg(test)]
mod tests;

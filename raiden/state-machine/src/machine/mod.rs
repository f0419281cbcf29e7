#![warn(clippy::missing_docs_in_private_items)]

/// Channel transitions.
pub mod channel;
/// Channel registry transitions.
pub mod registry;
/// Token network transitions.
pub mod token_network;

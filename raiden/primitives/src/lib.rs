#![warn(clippy::missing_docs_in_private_items)]

/// Base constants.
pub mod constants;
/// Base hashing functions.
pub mod hashing;
/// Base traits.
pub mod traits;
/// Base types.
pub mod types;

/// Default number of blocks a secret must be revealed before a lock expires.
pub const DEFAULT_REVEAL_TIMEOUT: u64 = 50;
/// Default number of blocks between close and settle.
pub const DEFAULT_SETTLE_TIMEOUT: u64 = 500;
/// Upper bound on pending locks per end state.
pub const MAXIMUM_PENDING_TRANSFERS: usize = 160;

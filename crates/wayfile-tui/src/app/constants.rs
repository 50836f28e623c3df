//! Application constants.

/// Number of items to move when pressing Page Up/Down.
pub const PAGE_SIZE: usize = 10;

/// Event loop tick interval in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 50;

/// How long a transient message stays in the footer.
pub const MESSAGE_TIMEOUT_MS: u64 = 4000;

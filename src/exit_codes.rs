//! Exit code constants for the formlock CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid state)
//! - 2: Configuration failure (invalid config file, bad plugin registration)
//! - 3: Network failure (no response or server error from the lock API)
//! - 4: Lock conflict (the record is leased to another user)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid state.
pub const USER_ERROR: i32 = 1;

/// Configuration failure: unreadable/invalid config or plugin registration.
pub const CONFIG_FAILURE: i32 = 2;

/// Network failure: the lock API could not be reached or answered with 5xx.
pub const NETWORK_FAILURE: i32 = 3;

/// Lock conflict: another user holds the lease.
pub const LOCK_FAILURE: i32 = 4;

//! formlock: lease-based advisory locking for editing forms.
//!
//! A client holds a record by periodically renewing a time-bounded lease with
//! the lock server. While someone else holds it, the form is read-only and
//! explains who holds it, with an option to take the lease over.
//!
//! - [`api`]: the lock endpoint client and its transports
//! - [`form`]: the lease state machine driving a form
//! - [`plugins`]: custom enable/disable rules for special widgets
//! - [`cookies`]: the cookie store carrying the takeover handoff
//! - [`indicator`]: lock status for a listing of records

pub mod api;
pub mod config;
pub mod cookies;
pub mod error;
pub mod exit_codes;
pub mod form;
pub mod fs;
pub mod indicator;
pub mod logging;
pub mod plugins;

#[cfg(test)]
mod test_support;

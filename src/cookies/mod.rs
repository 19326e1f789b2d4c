//! Cookie store and the takeover handoff.
//!
//! Cookies are used for one thing only: telling the next editing session that
//! the user asked to take a lease over before it started. The listing records
//! the intent; the next `LockingForm` for the same model consumes it.
//!
//! # Takeover intent
//!
//! - name: `<app_label><model_name>unlock`
//! - value: `"1"`
//! - lifetime: 60 seconds

mod jar;
mod store;

#[cfg(test)]
mod tests;

pub use jar::FileCookieJar;
pub use store::{Cookie, CookieStore, MemoryCookieStore};

use crate::api::ModelKey;
use crate::error::Result;
use std::time::Duration;

/// How long a takeover intent stays valid.
pub const TAKEOVER_COOKIE_TTL: Duration = Duration::from_secs(60);

const TAKEOVER_VALUE: &str = "1";

/// The cross-session "take this lease over" signal for one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TakeoverIntent {
    cookie_name: String,
}

impl TakeoverIntent {
    pub fn for_model(model: &ModelKey) -> Self {
        Self {
            cookie_name: format!("{}{}unlock", model.app_label, model.model_name),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Record the intent ahead of opening an edit session.
    pub fn record(&self, store: &mut dyn CookieStore) -> Result<()> {
        store.set(&self.cookie_name, TAKEOVER_VALUE, TAKEOVER_COOKIE_TTL)
    }

    /// Consume the intent. Any cookie present is deleted; returns whether it
    /// asked for a takeover.
    pub fn consume(&self, store: &mut dyn CookieStore) -> Result<bool> {
        match store.get(&self.cookie_name) {
            Some(value) => {
                store.del(&self.cookie_name)?;
                Ok(value == TAKEOVER_VALUE)
            }
            None => Ok(false),
        }
    }
}

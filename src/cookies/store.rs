//! The cookie store contract and its in-memory implementation.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Scoped storage for small, time-limited flags.
pub trait CookieStore {
    /// Store `value` under `name` for `ttl`. A zero TTL deletes the cookie.
    fn set(&mut self, name: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Read a live cookie. Expired cookies read as `None`.
    fn get(&self, name: &str) -> Option<String>;

    /// Remove a cookie. Removing a missing cookie is not an error.
    fn del(&mut self, name: &str) -> Result<()>;
}

/// A stored cookie value and its expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl Cookie {
    pub(crate) fn new(value: &str, ttl: Duration) -> Self {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        Self {
            value: value.to_string(),
            expires_at: Utc::now().checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Cookie store that lives as long as the process.
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    cookies: BTreeMap<String, Cookie>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CookieStore for MemoryCookieStore {
    fn set(&mut self, name: &str, value: &str, ttl: Duration) -> Result<()> {
        if ttl.is_zero() {
            self.cookies.remove(name);
        } else {
            self.cookies.insert(name.to_string(), Cookie::new(value, ttl));
        }
        Ok(())
    }

    fn get(&self, name: &str) -> Option<String> {
        self.cookies
            .get(name)
            .filter(|c| !c.is_expired())
            .map(|c| c.value.clone())
    }

    fn del(&mut self, name: &str) -> Result<()> {
        self.set(name, "", Duration::ZERO)
    }
}

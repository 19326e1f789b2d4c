//! File-backed cookie jar.
//!
//! The jar survives process restarts, which is what carries a takeover intent
//! from `formlock status --take` into the next `formlock hold`.

use super::store::{Cookie, CookieStore};
use crate::error::{LockingError, Result};
use crate::fs::atomic_write_file;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Cookie store persisted as JSON at a fixed path.
///
/// The file is the only state: every operation reads it afresh, so several
/// handles (or processes) on one path see each other's writes.
#[derive(Debug)]
pub struct FileCookieJar {
    path: PathBuf,
}

impl FileCookieJar {
    /// Open the jar at `path`. A missing file is an empty jar.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        load(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn load(path: &Path) -> Result<BTreeMap<String, Cookie>> {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).map_err(|e| {
            LockingError::UserError(format!(
                "failed to parse cookie jar '{}': {}",
                path.display(),
                e
            ))
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(e) => Err(LockingError::UserError(format!(
            "failed to read cookie jar '{}': {}",
            path.display(),
            e
        ))),
    }
}

fn persist(path: &Path, cookies: &mut BTreeMap<String, Cookie>) -> Result<()> {
    cookies.retain(|_, c| !c.is_expired());
    let json = serde_json::to_string_pretty(cookies)
        .map_err(|e| LockingError::UserError(format!("failed to serialize cookie jar: {}", e)))?;
    atomic_write_file(path, &json)
}

impl CookieStore for FileCookieJar {
    fn set(&mut self, name: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut cookies = load(&self.path)?;
        if ttl.is_zero() {
            cookies.remove(name);
        } else {
            cookies.insert(name.to_string(), Cookie::new(value, ttl));
        }
        persist(&self.path, &mut cookies)
    }

    fn get(&self, name: &str) -> Option<String> {
        let cookies = match load(&self.path) {
            Ok(cookies) => cookies,
            Err(e) => {
                tracing::warn!("{}", e);
                return None;
            }
        };
        cookies
            .get(name)
            .filter(|c| !c.is_expired())
            .map(|c| c.value.clone())
    }

    fn del(&mut self, name: &str) -> Result<()> {
        self.set(name, "", Duration::ZERO)
    }
}

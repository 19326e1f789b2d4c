//! Lock API payloads and reply classification.

use super::transport::Outcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The user a lease belongs to, as reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockHolder {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl LockHolder {
    /// "First Last" when both names are on file, otherwise the username.
    pub fn display_name(&self) -> String {
        let first = self.first_name.trim();
        let last = self.last_name.trim();
        if first.is_empty() || last.is_empty() {
            self.username.clone()
        } else {
            format!("{} {}", first, last)
        }
    }
}

impl fmt::Display for LockHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.email.is_empty() {
            write!(f, "{}", self.display_name())
        } else {
            write!(f, "{} ({})", self.display_name(), self.email)
        }
    }
}

/// One entry of a model's lock listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRecord {
    #[serde(deserialize_with = "object_id_as_string")]
    pub object_id: String,

    pub locked_by: LockHolder,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_expires: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct ConflictEntry {
    locked_by: LockHolder,
}

fn object_id_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "object_id must be a string or number, got {}",
            other
        ))),
    }
}

/// Parse the body of a lock listing (`GET` on a model endpoint).
pub fn parse_lock_records(body: &str) -> serde_json::Result<Vec<LockRecord>> {
    serde_json::from_str(body)
}

/// What a reply to `acquire` or `force_takeover` means for the lease.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockResponse {
    /// 2xx: the lease is ours.
    Granted,
    /// 401/409: someone else holds the lease. The holder is `None` when the
    /// body could not be read.
    Conflict(Option<LockHolder>),
    /// No response or 5xx. Possibly transient.
    Degraded(String),
    /// Any other status. Carries no information about the lease.
    Unexpected(u16),
}

impl LockResponse {
    pub fn classify(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Failed { reason } => LockResponse::Degraded(reason.clone()),
            Outcome::Response { status: 0, .. } => {
                LockResponse::Degraded("no response".to_string())
            }
            Outcome::Response { status, .. } if *status >= 500 => {
                LockResponse::Degraded(format!("server error {}", status))
            }
            Outcome::Response { status, .. } if (200..300).contains(status) => {
                LockResponse::Granted
            }
            Outcome::Response {
                status: 401 | 409,
                body,
            } => LockResponse::Conflict(parse_conflict_holder(body)),
            Outcome::Response { status, .. } => LockResponse::Unexpected(*status),
        }
    }
}

/// Read the holder out of a conflict body: `[{"locked_by": {...}}]`.
fn parse_conflict_holder(body: &str) -> Option<LockHolder> {
    serde_json::from_str::<Vec<ConflictEntry>>(body)
        .ok()?
        .into_iter()
        .next()
        .map(|entry| entry.locked_by)
}

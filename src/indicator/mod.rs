//! Lock indicator for a listing of records.
//!
//! Polls the model's lock listing and annotates rows by object id: unlocked,
//! being edited by the current user, or locked by someone else. Picking a row
//! locked by someone else records a takeover intent for the next editing
//! session. The indicator never acquires or releases a lease.


use crate::api::{
    EndpointConfig, LockApi, LockHolder, LockRecord, Method, ModelKey, Outcome, RequestOptions,
    Transport, parse_lock_records,
};
use crate::config::Messages;
use crate::cookies::{CookieStore, TakeoverIntent};
use crate::error::{LockingError, Result};
use std::sync::Arc;

/// Lock status of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStatus {
    Unlocked,
    LockedByMe { title: String },
    LockedByOther { title: String, holder: LockHolder },
}

impl RowStatus {
    /// CSS class of the row's status element.
    pub fn css_class(&self) -> &'static str {
        match self {
            RowStatus::Unlocked => "",
            RowStatus::LockedByMe { .. } => "editing",
            RowStatus::LockedByOther { .. } => "locked",
        }
    }

    /// Tooltip, absent for unlocked rows.
    pub fn title(&self) -> Option<&str> {
        match self {
            RowStatus::Unlocked => None,
            RowStatus::LockedByMe { title } | RowStatus::LockedByOther { title, .. } => {
                Some(title)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAnnotation {
    pub object_id: String,
    pub status: RowStatus,
}

/// Read-only lock status for every record of one model.
#[derive(Debug)]
pub struct ListIndicator {
    api: LockApi,
    intent: TakeoverIntent,
    current_user: String,
    messages: Messages,
}

impl ListIndicator {
    pub fn new(
        model: &ModelKey,
        endpoint: &EndpointConfig,
        transport: Arc<dyn Transport>,
        current_user: impl Into<String>,
        messages: Messages,
    ) -> Self {
        Self {
            api: LockApi::for_model(model, endpoint, transport),
            intent: TakeoverIntent::for_model(model),
            current_user: current_user.into(),
            messages,
        }
    }

    pub fn endpoint(&self) -> &str {
        self.api.endpoint()
    }

    /// Fetch the current lock listing.
    pub fn refresh(&self) -> Result<Vec<LockRecord>> {
        let reply = self.api.request_sync(RequestOptions::new(Method::Get))?;

        match reply.outcome {
            Outcome::Response { status, body } if (200..300).contains(&status) => {
                let records = parse_lock_records(&body).map_err(|e| {
                    LockingError::TransportError(format!(
                        "invalid lock listing from {}: {}",
                        self.api.endpoint(),
                        e
                    ))
                })?;
                tracing::debug!(
                    endpoint = self.api.endpoint(),
                    locked = records.len(),
                    "lock listing refreshed"
                );
                Ok(records)
            }
            Outcome::Response { status, .. } => Err(LockingError::TransportError(format!(
                "GET {} returned status {}",
                self.api.endpoint(),
                status
            ))),
            Outcome::Failed { reason } => Err(LockingError::TransportError(format!(
                "GET {} failed: {}",
                self.api.endpoint(),
                reason
            ))),
        }
    }

    /// Status of a row given the current listing.
    pub fn status_of(&self, records: &[LockRecord], object_id: &str) -> RowStatus {
        match records.iter().find(|r| r.object_id == object_id) {
            None => RowStatus::Unlocked,
            Some(record) if record.locked_by.username == self.current_user => {
                RowStatus::LockedByMe {
                    title: self.messages.locked_by_me.clone(),
                }
            }
            Some(record) => RowStatus::LockedByOther {
                title: format!("{} {}", self.messages.locked_by_user, record.locked_by),
                holder: record.locked_by.clone(),
            },
        }
    }

    /// One annotation per id, in the order given.
    pub fn annotate<I, S>(&self, records: &[LockRecord], object_ids: I) -> Vec<RowAnnotation>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        object_ids
            .into_iter()
            .map(|id| RowAnnotation {
                object_id: id.as_ref().to_string(),
                status: self.status_of(records, id.as_ref()),
            })
            .collect()
    }

    /// Record a takeover intent for the next editing session of this model.
    pub fn take_over(&self, store: &mut dyn CookieStore) -> Result<()> {
        tracing::info!(cookie = self.intent.cookie_name(), "recorded takeover intent");
        self.intent.record(store)
    }
}

//! Test doubles shared by the unit test modules.

use crate::api::{ApiRequest, Completer, Delivery, Method, Outcome, Transport};
use crate::form::{FormEvent, Host};
use std::sync::{Arc, Mutex, MutexGuard};

/// Transport that records every request and completes async ones on demand.
///
/// Sync requests complete immediately with the configured sync outcome.
#[derive(Clone)]
pub(crate) struct RecordingTransport {
    inner: Arc<Mutex<TransportLog>>,
}

struct TransportLog {
    sent: Vec<ApiRequest>,
    waiting: Vec<(u64, Completer)>,
    sync_outcome: Outcome,
}

impl RecordingTransport {
    pub(crate) fn new() -> Self {
        Self::with_sync_outcome(Outcome::response(204, ""))
    }

    pub(crate) fn with_sync_outcome(outcome: Outcome) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TransportLog {
                sent: Vec::new(),
                waiting: Vec::new(),
                sync_outcome: outcome,
            })),
        }
    }

    fn log(&self) -> MutexGuard<'_, TransportLog> {
        self.inner.lock().unwrap_or_else(|poison| poison.into_inner())
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.log().sent.clone()
    }

    pub(crate) fn methods(&self) -> Vec<Method> {
        self.log().sent.iter().map(|r| r.method).collect()
    }

    pub(crate) fn last_request(&self) -> ApiRequest {
        self.log().sent.last().cloned().expect("no request was sent")
    }

    pub(crate) fn waiting(&self) -> usize {
        self.log().waiting.len()
    }

    /// Complete the async request with sequence number `seq`.
    pub(crate) fn respond(&self, seq: u64, outcome: Outcome) {
        let completer = {
            let mut log = self.log();
            let index = log
                .waiting
                .iter()
                .position(|(s, _)| *s == seq)
                .unwrap_or_else(|| panic!("no waiting request with seq {}", seq));
            log.waiting.remove(index).1
        };
        completer(outcome);
    }

    /// Complete the oldest waiting async request; returns its sequence number.
    pub(crate) fn respond_next(&self, outcome: Outcome) -> u64 {
        let (seq, completer) = {
            let mut log = self.log();
            assert!(!log.waiting.is_empty(), "no waiting request");
            log.waiting.remove(0)
        };
        completer(outcome);
        seq
    }

    /// Drop every waiting completion without calling it.
    pub(crate) fn discard_waiting(&self) {
        let waiting = std::mem::take(&mut self.log().waiting);
        drop(waiting);
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: ApiRequest, on_complete: Completer) {
        let mut log = self.log();
        log.sent.push(request.clone());
        match request.delivery {
            Delivery::Sync => {
                let outcome = log.sync_outcome.clone();
                drop(log);
                on_complete(outcome);
            }
            Delivery::Async => log.waiting.push((request.seq, on_complete)),
        }
    }
}

/// Host that records alerts, prompts, reloads and notifications.
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub(crate) alerts: Vec<String>,
    pub(crate) prompts: Vec<String>,
    pub(crate) events: Vec<FormEvent>,
    pub(crate) reloads: usize,
    pub(crate) decline: bool,
}

impl RecordingHost {
    pub(crate) fn declining() -> Self {
        Self {
            decline: true,
            ..Self::default()
        }
    }

    pub(crate) fn count(&self, event: FormEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }
}

impl Host for RecordingHost {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.prompts.push(message.to_string());
        !self.decline
    }

    fn reload(&mut self) {
        self.reloads += 1;
    }

    fn notify(&mut self, event: FormEvent) {
        self.events.push(event);
    }
}

/// Conflict body the lock server sends on 401/409.
pub(crate) fn conflict_body(username: &str, email: &str) -> String {
    serde_json::json!([{
        "locked_by": {
            "username": username,
            "first_name": "",
            "last_name": "",
            "email": email,
        }
    }])
    .to_string()
}

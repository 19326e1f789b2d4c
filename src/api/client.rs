//! The lock API client.

use super::identity::{EndpointConfig, ModelKey, ResourceIdentity};
use super::transport::{ApiRequest, Completer, Delivery, Method, Reply, ReplyHandler, Transport};
use crate::config::ReleaseMode;
use crate::error::{LockingError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::mpsc;

static PENDING: AtomicUsize = AtomicUsize::new(0);

/// Number of lock API requests currently in flight, across all clients.
pub fn pending_requests() -> usize {
    PENDING.load(Ordering::SeqCst)
}

/// Whether any lock API request is in flight.
pub fn has_pending() -> bool {
    pending_requests() > 0
}

/// Counts one in-flight request for as long as it lives.
///
/// Dropped after the caller's handler has run, or when a transport discards
/// the completion without ever calling it.
#[derive(Debug)]
struct PendingGuard;

impl PendingGuard {
    fn start() -> Self {
        PENDING.fetch_add(1, Ordering::SeqCst);
        PendingGuard
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        PENDING.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Options for the raw [`LockApi::request`] escape hatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: Method,
    pub delivery: Delivery,
    /// Appended to the endpoint, e.g. `delete-beacon/`.
    pub path_suffix: Option<String>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            delivery: Delivery::Async,
            path_suffix: None,
        }
    }

    pub fn sync(mut self) -> Self {
        self.delivery = Delivery::Sync;
        self
    }

    pub fn delivery(mut self, delivery: Delivery) -> Self {
        self.delivery = delivery;
        self
    }

    pub fn path_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.path_suffix = Some(suffix.into());
        self
    }
}

/// Stateless wrapper around the lock endpoint of one record or model.
pub struct LockApi {
    endpoint: String,
    release_mode: ReleaseMode,
    transport: Arc<dyn Transport>,
    next_seq: AtomicU64,
}

impl std::fmt::Debug for LockApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockApi")
            .field("endpoint", &self.endpoint)
            .field("release_mode", &self.release_mode)
            .finish_non_exhaustive()
    }
}

impl LockApi {
    /// Client for a single record's lease.
    pub fn for_resource(
        identity: &ResourceIdentity,
        endpoint: &EndpointConfig,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self::with_endpoint(
            endpoint.resource_url(identity),
            endpoint.release_mode,
            transport,
        )
    }

    /// Client for a model's lock listing.
    pub fn for_model(
        model: &ModelKey,
        endpoint: &EndpointConfig,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self::with_endpoint(endpoint.model_url(model), endpoint.release_mode, transport)
    }

    fn with_endpoint(
        endpoint: String,
        release_mode: ReleaseMode,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            endpoint,
            release_mode,
            transport,
            next_seq: AtomicU64::new(1),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Create or renew the lease (`POST`).
    pub fn acquire(&self, on_reply: ReplyHandler) -> u64 {
        self.request(RequestOptions::new(Method::Post), on_reply)
    }

    /// Give the lease back (`DELETE`, or `POST delete-beacon/` in beacon mode).
    pub fn release(&self, delivery: Delivery, on_reply: ReplyHandler) -> u64 {
        self.request(self.release_options().delivery(delivery), on_reply)
    }

    /// Give the lease back and wait for the server's answer.
    pub fn release_sync(&self) -> Result<Reply> {
        self.request_sync(self.release_options())
    }

    fn release_options(&self) -> RequestOptions {
        match self.release_mode {
            ReleaseMode::Delete => RequestOptions::new(Method::Delete),
            ReleaseMode::Beacon => RequestOptions::new(Method::Post).path_suffix("delete-beacon/"),
        }
    }

    /// Take the lease regardless of its current holder (`PUT`).
    pub fn force_takeover(&self, on_reply: ReplyHandler) -> u64 {
        self.request(RequestOptions::new(Method::Put), on_reply)
    }

    /// Issue a raw request and return its sequence number.
    ///
    /// The pending counter is raised before dispatch and lowered after
    /// `on_reply` has run, whatever the outcome.
    pub fn request(&self, options: RequestOptions, on_reply: ReplyHandler) -> u64 {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let url = match &options.path_suffix {
            Some(suffix) => format!("{}{}", self.endpoint, suffix.trim_start_matches('/')),
            None => self.endpoint.clone(),
        };
        let request = ApiRequest {
            method: options.method,
            url,
            delivery: options.delivery,
            seq,
        };

        tracing::debug!(
            seq,
            method = %request.method,
            url = %request.url,
            delivery = ?request.delivery,
            "dispatching lock request"
        );

        let guard = PendingGuard::start();
        let completer: Completer = Box::new(move |outcome| {
            on_reply(Reply { seq, outcome });
            drop(guard);
        });
        self.transport.send(request, completer);
        seq
    }

    /// Issue a synchronous request and return its reply.
    pub fn request_sync(&self, options: RequestOptions) -> Result<Reply> {
        let (tx, rx) = mpsc::channel();
        let method = options.method;
        self.request(
            options.sync(),
            Box::new(move |reply| {
                let _ = tx.send(reply);
            }),
        );
        rx.try_recv().map_err(|_| {
            LockingError::TransportError(format!(
                "{} {} completed without a synchronous reply",
                method, self.endpoint
            ))
        })
    }
}

//! Lock API client.
//!
//! Wraps the per-record lock endpoint of the lock server:
//! - `POST`   acquire or renew the lease
//! - `DELETE` release the lease (or `POST delete-beacon/` in beacon mode)
//! - `PUT`    force a takeover
//! - `GET`    list the leases of a whole model
//!
//! # Endpoints
//!
//! The endpoint is built by joining the non-empty segments
//! `{host_url, api_base_url, app_label, model_name, object_id}` with a
//! trailing slash, e.g. `/locking/api/lock/blog/post/42/`.
//!
//! # Replies
//!
//! The client never interprets status codes. Every request is stamped with a
//! monotonic sequence number and its raw [`Outcome`] is handed back as a
//! [`Reply`]; [`LockResponse::classify`] turns that into lease semantics.
//!
//! # Pending requests
//!
//! A process-wide counter tracks requests in flight. It is raised before
//! dispatch and lowered after the caller's handler has run.

mod client;
mod http;
mod identity;
mod response;
mod transport;


// Re-export public API
pub use client::{LockApi, RequestOptions, has_pending, pending_requests};
pub use http::HttpTransport;
pub use identity::{EndpointConfig, ModelKey, ResourceIdentity, join_segments};
pub use response::{LockHolder, LockRecord, LockResponse, parse_lock_records};
pub use transport::{
    ApiRequest, Completer, Delivery, Method, Outcome, Reply, ReplyHandler, Transport,
};

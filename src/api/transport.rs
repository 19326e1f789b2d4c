//! Transport abstraction between the lock API client and the network.

use std::fmt;

/// HTTP verbs used by the lock API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Whether the caller waits for the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delivery {
    /// The completion runs later, from whatever thread the transport uses.
    #[default]
    Async,
    /// The completion runs before [`Transport::send`] returns.
    Sync,
}

/// A fully resolved request handed to a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub delivery: Delivery,
    /// Monotonic per-client sequence number, stamped at dispatch.
    pub seq: u64,
}

/// Raw result of a request. Status codes are not interpreted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The server answered, with any status.
    Response { status: u16, body: String },
    /// No response: connection refused, timeout, DNS failure and the like.
    Failed { reason: String },
}

impl Outcome {
    pub fn response(status: u16, body: impl Into<String>) -> Self {
        Outcome::Response {
            status,
            body: body.into(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Outcome::Failed {
            reason: reason.into(),
        }
    }

    /// HTTP status, or `None` when nothing came back.
    pub fn status(&self) -> Option<u16> {
        match self {
            Outcome::Response { status, .. } => Some(*status),
            Outcome::Failed { .. } => None,
        }
    }
}

/// An outcome paired with the sequence number of the request it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub seq: u64,
    pub outcome: Outcome,
}

/// Transport-level completion callback.
pub type Completer = Box<dyn FnOnce(Outcome) + Send + 'static>;

/// Caller-level completion callback; receives the sequence-stamped reply.
pub type ReplyHandler = Box<dyn FnOnce(Reply) + Send + 'static>;

/// Carries requests to the lock server.
///
/// Implementations must call `on_complete` exactly once. For
/// [`Delivery::Sync`] requests it must be called before `send` returns.
pub trait Transport: Send + Sync {
    fn send(&self, request: ApiRequest, on_complete: Completer);
}

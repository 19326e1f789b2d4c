//! HTTP transport backed by `reqwest`'s blocking client.
//!
//! Async requests run on a short-lived thread each; their completion runs on
//! that thread, so handlers must only hand results back to the owning thread.

use super::transport::{ApiRequest, Completer, Delivery, Method, Outcome, Transport};
use crate::error::{LockingError, Result};
use reqwest::blocking::Client;
use reqwest::header::{CACHE_CONTROL, COOKIE, HeaderMap, HeaderValue, PRAGMA};
use std::thread;
use std::time::Duration;

/// Sends lock requests over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport with caching disabled and an optional session cookie.
    pub fn new(timeout: Duration, session_cookie: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        if let Some(cookie) = session_cookie {
            let value = HeaderValue::from_str(cookie).map_err(|e| {
                LockingError::ConfigError(format!("invalid session_cookie: {}", e))
            })?;
            headers.insert(COOKIE, value);
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| LockingError::TransportError(format!("failed to build client: {}", e)))?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: ApiRequest, on_complete: Completer) {
        match request.delivery {
            Delivery::Sync => on_complete(execute(&self.client, &request)),
            Delivery::Async => {
                let client = self.client.clone();
                let spawned = thread::Builder::new()
                    .name(format!("formlock-req-{}", request.seq))
                    .spawn(move || on_complete(execute(&client, &request)));
                // The completer was moved into the closure; if the spawn failed
                // it has been dropped, which also settles the pending counter.
                if let Err(e) = spawned {
                    tracing::error!("failed to spawn request thread: {}", e);
                }
            }
        }
    }
}

fn execute(client: &Client, request: &ApiRequest) -> Outcome {
    let method = match request.method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    };

    let response = match client.request(method, &request.url).send() {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!(seq = request.seq, "lock request failed: {}", e);
            return Outcome::failed(e.to_string());
        }
    };

    let status = response.status().as_u16();
    let body = response.text().unwrap_or_default();
    tracing::debug!(seq = request.seq, status, "lock request completed");
    Outcome::response(status, body)
}

//! Implementation of the `formlock release` command.

use super::{http_transport, resource_identity};
use crate::cli::RecordArgs;
use formlock::api::{LockApi, LockResponse};
use formlock::config::Config;
use formlock::error::{LockingError, Result};

/// Release a record's lease with one synchronous request.
pub fn cmd_release(config: &Config, args: RecordArgs) -> Result<()> {
    let identity = resource_identity(&args);
    let api = LockApi::for_resource(&identity, &config.endpoint(), http_transport(config)?);

    let reply = api.release_sync()?;
    match LockResponse::classify(&reply.outcome) {
        LockResponse::Granted => {
            println!("Released {}", identity);
            Ok(())
        }
        LockResponse::Conflict(holder) => Err(LockingError::LockConflict(match holder {
            Some(holder) => format!("{} ({})", identity, holder),
            None => identity.to_string(),
        })),
        LockResponse::Degraded(reason) => Err(LockingError::TransportError(format!(
            "release of {} failed: {}",
            identity, reason
        ))),
        LockResponse::Unexpected(status) => Err(LockingError::TransportError(format!(
            "release of {} returned status {}",
            identity, status
        ))),
    }
}

//! Command implementations for formlock.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the setup they share: config loading, the HTTP
//! transport, and the cookie jar.

mod hold;
mod release;
mod status;
mod take_over;

use crate::cli::{Cli, Command, ModelArgs, RecordArgs};
use formlock::api::{HttpTransport, ModelKey, ResourceIdentity, Transport};
use formlock::config::Config;
use formlock::cookies::FileCookieJar;
use formlock::error::Result;
use std::path::Path;
use std::sync::Arc;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = load_config(&cli.config)?;

    match cli.command {
        Command::Hold(args) => hold::cmd_hold(&config, args),
        Command::Status(args) => status::cmd_status(&config, args),
        Command::TakeOver(args) => take_over::cmd_take_over(&config, args),
        Command::Release(args) => release::cmd_release(&config, args),
    }
}

/// Load the config file, falling back to defaults when it does not exist.
fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::load(path)
    } else {
        tracing::debug!(path = %path.display(), "config file not found; using defaults");
        Ok(Config::default())
    }
}

fn http_transport(config: &Config) -> Result<Arc<dyn Transport>> {
    let transport = HttpTransport::new(config.request_timeout(), config.session_cookie.as_deref())?;
    Ok(Arc::new(transport))
}

fn open_cookie_jar(config: &Config) -> Result<FileCookieJar> {
    FileCookieJar::open(&config.cookie_jar)
}

fn model_key(args: &ModelArgs) -> ModelKey {
    ModelKey::new(&args.app, &args.model)
}

fn resource_identity(args: &RecordArgs) -> ResourceIdentity {
    ResourceIdentity::new(&args.model.app, &args.model.model, &args.id)
}

//! Implementation of the `formlock hold` command.
//!
//! `hold` runs a headless editing session for one record:
//! - the lease is acquired at start and renewed every `ping_seconds`
//! - while someone else holds it the form is read-only and `save` is refused
//! - `take` forces a takeover after confirmation
//! - `save` submits and releases; `continue` submits and keeps the lease
//!
//! A reload requested by the state machine, or a `continue`, starts a fresh
//! session for the same record, the way a browser renders a fresh form.

use super::{http_transport, open_cookie_jar, resource_identity};
use crate::cli::HoldArgs;
use formlock::api::{LockApi, ResourceIdentity, has_pending, pending_requests};
use formlock::config::Config;
use formlock::error::{LockingError, Result};
use formlock::form::{
    AdminForm, FormEvent, FormModel, FormSetup, FormStrategy, Host, LockState, LockingForm,
    PlainForm,
};
use formlock::plugins::PluginRegistry;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// How long to wait for input before checking replies and the ping timer.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How often to check for in-flight requests while exiting.
const SETTLE_INTERVAL: Duration = Duration::from_millis(50);

const HELP: &str = "commands: take, save, continue, status, quit";

enum Input {
    Line(String),
    Closed,
}

enum SessionEnd {
    Quit,
    Reload,
}

/// Terminal-backed host: alerts go to stderr, confirmations read stdin.
struct TerminalHost {
    input: Receiver<String>,
    assume_yes: bool,
}

impl TerminalHost {
    fn spawn(assume_yes: bool) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("formlock-stdin".to_string())
            .spawn(move || {
                for line in io::stdin().lock().lines() {
                    let Ok(line) = line else { break };
                    if tx.send(line).is_err() {
                        break;
                    }
                }
            })
            .map_err(|e| LockingError::UserError(format!("failed to read stdin: {}", e)))?;

        Ok(Self {
            input: rx,
            assume_yes,
        })
    }

    fn next_input(&mut self, timeout: Duration) -> Option<Input> {
        match self.input.recv_timeout(timeout) {
            Ok(line) => Some(Input::Line(line)),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Input::Closed),
        }
    }
}

impl Host for TerminalHost {
    fn alert(&mut self, message: &str) {
        eprintln!("! {}", message);
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            println!("{} [y/N] y", message);
            return true;
        }
        print!("{} [y/N] ", message);
        let _ = io::stdout().flush();
        match self.input.recv() {
            Ok(answer) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }

    fn reload(&mut self) {
        println!("The lock is free again; reloading the form.");
    }

    fn notify(&mut self, event: FormEvent) {
        tracing::debug!(%event, "form event");
    }
}

type Session = LockingForm<FormModel, TerminalHost>;

pub fn cmd_hold(config: &Config, args: HoldArgs) -> Result<()> {
    let identity = resource_identity(&args.record);
    let transport = http_transport(config)?;
    let mut jar = open_cookie_jar(config)?;
    let mut host = TerminalHost::spawn(args.yes)?;

    eprintln!("formlock hold started");
    eprintln!("  record:   {}", identity);
    eprintln!("  user:     {}", config.current_user);
    eprintln!("  ping:     {}s", config.ping_seconds);
    eprintln!("  {}", HELP);
    eprintln!();

    loop {
        let setup = FormSetup {
            form: headless_form(config, &identity),
            host,
            api: LockApi::for_resource(&identity, &config.endpoint(), Arc::clone(&transport)),
            model: identity.model.clone(),
            plugins: Rc::new(PluginRegistry::new()),
            strategy: strategy(config),
            messages: config.messages.clone(),
            ping: config.ping_interval(),
        };
        let mut session = LockingForm::start(setup, &mut jar)?;
        let end = run_session(&mut session);

        let (_, returned) = session.into_parts();
        host = returned;

        match end {
            SessionEnd::Quit => {
                settle_pending(config.request_timeout());
                return Ok(());
            }
            SessionEnd::Reload => tracing::info!(record = %identity, "starting a fresh session"),
        }
    }
}

/// Give in-flight renewals up to `timeout` to finish before the process exits.
fn settle_pending(timeout: Duration) {
    let deadline = Instant::now() + timeout;
    while has_pending() && Instant::now() < deadline {
        thread::sleep(SETTLE_INTERVAL);
    }
    if has_pending() {
        tracing::warn!(pending = pending_requests(), "exiting with requests in flight");
    }
}

fn headless_form(config: &Config, identity: &ResourceIdentity) -> FormModel {
    FormModel::with_controls(
        format!("{}_form", identity.model.model_name),
        config.controls.iter().cloned(),
    )
}

fn strategy(config: &Config) -> Box<dyn FormStrategy> {
    if config.admin_notice {
        Box::new(AdminForm::new(config.messages.clone()))
    } else {
        Box::new(PlainForm)
    }
}

fn run_session(session: &mut Session) -> SessionEnd {
    let mut next_ping = Instant::now() + session.ping_interval();
    let mut shown: Option<(LockState, Option<String>)> = None;

    loop {
        session.pump();
        report_changes(session, &mut shown);
        if session.reload_requested() {
            return SessionEnd::Reload;
        }

        if Instant::now() >= next_ping {
            session.tick();
            next_ping = Instant::now() + session.ping_interval();
        }

        match session.host_mut().next_input(POLL_INTERVAL) {
            None => {}
            Some(Input::Closed) => {
                session.unload();
                return SessionEnd::Quit;
            }
            Some(Input::Line(line)) => {
                if let Some(end) = run_command(session, line.trim()) {
                    return end;
                }
            }
        }
    }
}

fn run_command(session: &mut Session, command: &str) -> Option<SessionEnd> {
    match command {
        "" => None,
        "take" => {
            if session.state() == LockState::Held {
                println!("You already hold the lock.");
            } else if session.take_over() {
                println!("Taking over the lock...");
            }
            None
        }
        "save" => {
            if !session.form().try_submit() {
                println!("The form is locked; nothing was saved.");
                return None;
            }
            println!("Saved.");
            session.unload();
            Some(SessionEnd::Quit)
        }
        "continue" => {
            if !session.form().try_submit() {
                println!("The form is locked; nothing was saved.");
                return None;
            }
            println!("Saved; continuing to edit.");
            session.keep_lock_on_unload();
            session.unload();
            Some(SessionEnd::Reload)
        }
        "status" => {
            print_status(session);
            None
        }
        "quit" | "exit" => {
            session.unload();
            Some(SessionEnd::Quit)
        }
        other => {
            println!("unknown command '{}'; {}", other, HELP);
            None
        }
    }
}

fn report_changes(session: &Session, shown: &mut Option<(LockState, Option<String>)>) {
    let current = (
        session.state(),
        session.form().notice().map(str::to_string),
    );
    if shown.as_ref() == Some(&current) {
        return;
    }

    match (&current.0, &current.1) {
        (LockState::Held, _) => println!("Lock held; the form is editable."),
        (LockState::LostToOther, Some(notice)) => println!("{}", notice),
        (LockState::LostToOther, None) => println!(
            "The form is read-only: locked by {}.",
            session
                .holder()
                .map_or_else(|| "another user".to_string(), |h| h.to_string())
        ),
        (LockState::Unlocked, _) => {}
    }
    *shown = Some(current);
}

fn print_status(session: &Session) {
    println!("state:     {}", session.state());
    if let Some(holder) = session.holder() {
        println!("holder:    {}", holder);
    }
    println!(
        "form:      {}",
        if session.is_form_disabled() {
            "read-only"
        } else {
            "editable"
        }
    );
    println!(
        "read-only controls: {}",
        session.form().disabled_controls().join(", ")
    );
    println!("failures:  {}", session.consecutive_failures());
    println!("pending:   {}", pending_requests());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_returns_at_once_when_nothing_is_in_flight() {
        assert!(!has_pending());

        let started = Instant::now();
        settle_pending(Duration::from_secs(5));

        assert!(started.elapsed() < Duration::from_secs(1));
    }
}

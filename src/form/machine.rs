//! The lock-lease state machine.

use super::host::{FormEvent, Host};
use super::model::{ControlId, Form};
use super::strategy::FormStrategy;
use crate::api::{Delivery, LockApi, LockHolder, LockResponse, ModelKey, Reply};
use crate::config::Messages;
use crate::cookies::{CookieStore, TakeoverIntent};
use crate::error::Result;
use crate::plugins::PluginRegistry;
use std::fmt;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

/// What the client believes about its lease.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Unlocked,
    Held,
    LostToOther,
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockState::Unlocked => write!(f, "unlocked"),
            LockState::Held => write!(f, "held"),
            LockState::LostToOther => write!(f, "lost to other"),
        }
    }
}

/// Which request a completion answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOp {
    Acquire,
    Takeover,
}

/// A reply waiting in the form's inbox.
#[derive(Debug, Clone)]
pub struct Completion {
    pub op: LockOp,
    pub reply: Reply,
}

/// Everything a [`LockingForm`] is built from.
pub struct FormSetup<F, H> {
    pub form: F,
    pub host: H,
    pub api: LockApi,
    pub model: ModelKey,
    pub plugins: Rc<PluginRegistry>,
    pub strategy: Box<dyn FormStrategy>,
    pub messages: Messages,
    pub ping: Duration,
}

/// Owns one record's lease and the read-only state of its form.
///
/// Replies from the transport land in an inbox; they are applied only when
/// the owner calls [`LockingForm::pump`] or [`LockingForm::wait`], so every
/// state change happens on the owning thread.
pub struct LockingForm<F: Form, H: Host> {
    form: F,
    host: H,
    api: LockApi,
    plugins: Rc<PluginRegistry>,
    strategy: Box<dyn FormStrategy>,
    messages: Messages,
    ping: Duration,

    state: LockState,
    has_had_lock: bool,
    form_disabled: bool,
    disabled_inputs: Vec<ControlId>,
    holder: Option<LockHolder>,

    network_warned: bool,
    consecutive_failures: u32,
    latest_seq: Option<u64>,

    release_on_unload: bool,
    unloaded: bool,
    reload_requested: bool,

    outbox: Sender<Completion>,
    inbox: Receiver<Completion>,
}

impl<F: Form, H: Host> LockingForm<F, H> {
    /// Build the state machine and send its first request.
    ///
    /// A pending takeover intent for the model is consumed here. Once the
    /// host confirms it, the first request is a forced takeover instead of a
    /// plain acquire.
    pub fn start(setup: FormSetup<F, H>, cookies: &mut dyn CookieStore) -> Result<Self> {
        let FormSetup {
            form,
            host,
            api,
            model,
            plugins,
            strategy,
            messages,
            ping,
        } = setup;
        let (outbox, inbox) = mpsc::channel();

        let mut machine = Self {
            form,
            host,
            api,
            plugins,
            strategy,
            messages,
            ping,
            state: LockState::Unlocked,
            has_had_lock: false,
            form_disabled: false,
            disabled_inputs: Vec::new(),
            holder: None,
            network_warned: false,
            consecutive_failures: 0,
            latest_seq: None,
            release_on_unload: true,
            unloaded: false,
            reload_requested: false,
            outbox,
            inbox,
        };

        let resume = TakeoverIntent::for_model(&model).consume(cookies)?;
        if resume && machine.confirm_takeover() {
            tracing::info!(endpoint = machine.api.endpoint(), "resuming takeover intent");
            machine.has_had_lock = true;
            machine.send(LockOp::Takeover);
        } else {
            machine.send(LockOp::Acquire);
        }

        Ok(machine)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> LockState {
        self.state
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn ping_interval(&self) -> Duration {
        self.ping
    }

    /// Holder reported by the last conflict, cleared by the next success.
    pub fn holder(&self) -> Option<&LockHolder> {
        self.holder.as_ref()
    }

    pub fn is_form_disabled(&self) -> bool {
        self.form_disabled
    }

    /// Controls the last disable transition turned off.
    pub fn disabled_inputs(&self) -> &[ControlId] {
        &self.disabled_inputs
    }

    pub fn has_had_lock(&self) -> bool {
        self.has_had_lock
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn reload_requested(&self) -> bool {
        self.reload_requested
    }

    pub fn is_unloaded(&self) -> bool {
        self.unloaded
    }

    /// Tear the machine down, handing back the form and the host.
    pub fn into_parts(self) -> (F, H) {
        (self.form, self.host)
    }

    fn is_active(&self) -> bool {
        !self.unloaded && !self.reload_requested
    }

    // =========================================================================
    // Requests
    // =========================================================================

    fn send(&mut self, op: LockOp) -> u64 {
        let outbox = self.outbox.clone();
        let on_reply = Box::new(move |reply: Reply| {
            // The receiver lives as long as the form; a failed send means the
            // form is gone and the reply has nobody to inform.
            let _ = outbox.send(Completion { op, reply });
        });
        match op {
            LockOp::Acquire => self.api.acquire(on_reply),
            LockOp::Takeover => self.api.force_takeover(on_reply),
        }
    }

    /// Renew the lease. Called by the driver every ping interval.
    ///
    /// Returns the request's sequence number, or `None` once the page is
    /// going away.
    pub fn tick(&mut self) -> Option<u64> {
        if !self.is_active() {
            return None;
        }
        Some(self.send(LockOp::Acquire))
    }

    /// User-initiated takeover. Returns whether a request was sent.
    pub fn take_over(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        if !self.confirm_takeover() {
            return false;
        }
        self.send(LockOp::Takeover);
        true
    }

    fn confirm_takeover(&mut self) -> bool {
        if !self.host.confirm(&self.messages.confirm_take_lock) {
            tracing::debug!("takeover declined");
            return false;
        }
        self.strategy.on_takeover();
        true
    }

    /// Keep the lease when the page goes away (e.g. "save and continue").
    pub fn keep_lock_on_unload(&mut self) {
        self.release_on_unload = false;
    }

    /// The page is going away. Releases the lease synchronously if held.
    ///
    /// Runs at most once; returns whether a release was sent.
    pub fn unload(&mut self) -> bool {
        if self.unloaded {
            return false;
        }
        self.unloaded = true;

        if self.state != LockState::Held || !self.release_on_unload {
            return false;
        }

        let endpoint = self.api.endpoint().to_string();
        self.api.release(
            Delivery::Sync,
            Box::new(move |reply: Reply| match reply.outcome.status() {
                Some(status) if (200..300).contains(&status) => {
                    tracing::info!(endpoint = %endpoint, "lease released");
                }
                _ => tracing::warn!(
                    endpoint = %endpoint,
                    outcome = ?reply.outcome,
                    "lease release was not acknowledged"
                ),
            }),
        );
        self.state = LockState::Unlocked;
        true
    }

    // =========================================================================
    // Replies
    // =========================================================================

    /// Apply every reply already in the inbox. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.inbox.try_recv() {
            self.handle(completion);
            applied += 1;
        }
        applied
    }

    /// Block up to `timeout` for a reply, then drain the inbox.
    pub fn wait(&mut self, timeout: Duration) -> usize {
        match self.inbox.recv_timeout(timeout) {
            Ok(completion) => {
                self.handle(completion);
                1 + self.pump()
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => 0,
        }
    }

    /// Apply one reply.
    pub fn handle(&mut self, completion: Completion) {
        let Completion { op, reply } = completion;

        if !self.is_active() {
            tracing::debug!(seq = reply.seq, "ignoring reply after unload");
            return;
        }
        if let Some(latest) = self.latest_seq
            && reply.seq < latest
        {
            tracing::debug!(seq = reply.seq, latest, "discarding stale reply");
            return;
        }
        self.latest_seq = Some(reply.seq);

        match LockResponse::classify(&reply.outcome) {
            LockResponse::Granted => {
                self.consecutive_failures = 0;
                self.on_granted(op);
            }
            LockResponse::Conflict(holder) => {
                self.consecutive_failures = 0;
                self.on_conflict(holder);
            }
            LockResponse::Degraded(reason) => self.on_degraded(&reason),
            LockResponse::Unexpected(status) => {
                tracing::warn!(seq = reply.seq, status, "unexpected lock API status");
            }
        }
    }

    fn on_granted(&mut self, op: LockOp) {
        if op == LockOp::Acquire && self.state == LockState::LostToOther && !self.has_had_lock {
            // The form was rendered while someone else held the record and
            // may show stale data; only a fresh page is safe to edit.
            tracing::info!("lease granted after conflict; reloading");
            self.reload_requested = true;
            self.host.reload();
            return;
        }

        if self.state != LockState::Held {
            tracing::info!(from = %self.state, "lease held");
        }
        self.state = LockState::Held;
        self.has_had_lock = true;
        self.holder = None;
        self.enable_form();
    }

    fn on_conflict(&mut self, holder: Option<LockHolder>) {
        if self.state == LockState::Held {
            tracing::warn!(
                holder = ?holder.as_ref().map(|h| h.username.as_str()),
                "lease taken by another user"
            );
            self.host.alert(&self.messages.lock_was_taken);
        }
        self.holder = holder;
        self.disable_form();
        self.state = LockState::LostToOther;
    }

    fn on_degraded(&mut self, reason: &str) {
        self.consecutive_failures += 1;
        tracing::warn!(
            failures = self.consecutive_failures,
            "lock API unreachable: {}",
            reason
        );
        if !self.network_warned {
            self.network_warned = true;
            self.host.alert(&self.messages.network_warning);
        }
    }

    // =========================================================================
    // Enable / disable sequences
    // =========================================================================

    /// Make the form read-only. No-op when already disabled.
    pub fn disable_form(&mut self) {
        if self.form_disabled {
            return;
        }

        // Controls disabled independently of locking stay untouched; the set
        // is recomputed every time because other code may have changed it.
        let already_disabled: Vec<ControlId> = self
            .form
            .controls()
            .into_iter()
            .filter(|c| self.form.is_disabled(c))
            .collect();

        self.form.set_submit_blocked(true);
        let managed = self.plugins.for_each_disable(&mut self.form);

        let to_disable: Vec<ControlId> = self
            .form
            .controls()
            .into_iter()
            .filter(|c| !already_disabled.contains(c) && !managed.contains(c))
            .collect();
        for control in &to_disable {
            self.form.set_disabled(control, true);
        }
        self.disabled_inputs = to_disable;

        self.strategy.on_disable(&mut self.form, self.holder.as_ref());
        self.form_disabled = true;
        self.host.notify(FormEvent::Disabled);
    }

    /// Reverse the last disable. No-op when not disabled.
    pub fn enable_form(&mut self) {
        if !self.form_disabled {
            return;
        }

        self.form.set_submit_blocked(false);
        for control in std::mem::take(&mut self.disabled_inputs) {
            self.form.set_disabled(&control, false);
        }
        self.plugins.for_each_enable(&mut self.form);

        self.strategy.on_enable(&mut self.form);
        self.form_disabled = false;
        self.host.notify(FormEvent::Enabled);
    }
}

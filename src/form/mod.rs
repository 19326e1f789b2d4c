//! The locking form: a lease-driven state machine over an editable form.
//!
//! # States
//!
//! ```text
//!             2xx                     401/409
//! Unlocked ─────────► Held ◄────────────────────► LostToOther
//!     │                 ▲      2xx (takeover, or          │
//!     │ 401/409         │      renewal after holding)     │
//!     └─────────────────┼──────────────────────────────────┘
//!                       │ 2xx on acquire, never held: reload
//! ```
//!
//! - Entering `Held` enables the form; entering `LostToOther` disables it.
//! - Losing a lease that was held shows the "lock was taken" alert.
//! - An acquire granted while `LostToOther`, when the lease was never held,
//!   requests a page reload instead of enabling the stale form.
//! - No response or a 5xx keeps the state and warns the user once.
//!
//! # Enable / disable
//!
//! Both transitions are idempotent, call every registered plugin in order, run
//! the form strategy hook, and emit exactly one [`FormEvent`]. Controls that
//! were disabled before locking touched the form are never re-enabled.
//!
//! # Driving the machine
//!
//! The owner calls [`LockingForm::tick`] every ping interval and applies
//! replies with [`LockingForm::pump`] or [`LockingForm::wait`].

mod host;
mod machine;
mod model;
mod strategy;


pub use host::{FormEvent, Host};
pub use machine::{Completion, FormSetup, LockOp, LockState, LockingForm};
pub use model::{ControlId, Form, FormModel};
pub use strategy::{AdminForm, FormStrategy, PlainForm};

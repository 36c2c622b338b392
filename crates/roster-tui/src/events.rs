//! UI event types.
//!
//! All external inputs (terminal, backend results) are converted to `UiEvent`
//! before being processed by the reducer.
//!
//! ## Task Lifecycle Events
//!
//! Backend calls use a uniform lifecycle:
//! - The runtime emits `UiEvent::TaskStarted` once a task is actually spawned
//! - The runtime emits `UiEvent::TaskCompleted` with the result event when done
//! - The reducer is the only place that mutates `TaskState`, and drops results
//!   whose task id is no longer the active one

use crossterm::event::Event as CrosstermEvent;
use roster_core::records::UserRecord;

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

/// Results of sign-in and sign-up calls.
#[derive(Debug)]
pub enum SessionUiEvent {
    /// Sign-in returned a session.
    SignedIn { email: String },

    /// Sign-in failed; `error` is the single-line message for the form.
    SignInFailed { error: String },

    /// Account created.
    Registered,

    /// Account creation failed. The message is only logged.
    RegisterFailed,
}

/// Results of calls against the user collection.
#[derive(Debug)]
pub enum UsersUiEvent {
    Loaded(Vec<UserRecord>),
    LoadFailed { error: String },
    Added,
    AddFailed { error: String },
    Updated,
    UpdateFailed { error: String },
    Deleted,
    DeleteFailed { error: String },
}

/// Unified event enum for the TUI.
#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick (spinner animation).
    Tick,

    /// Terminal input event (key, paste, resize).
    Terminal(CrosstermEvent),

    /// Task lifecycle: runtime spawned a task.
    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },

    /// Task lifecycle: runtime completed a task (wraps the result event).
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    Session(SessionUiEvent),

    Users(UsersUiEvent),
}

//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── navigation: NavigationState (current route)
//! │   ├── session: SessionState      (login form, signed-in email)
//! │   ├── users: UsersState          (record cache, sort, selection)
//! │   ├── task_seq: TaskSeq          (task id generator)
//! │   ├── tasks: Tasks               (in-flight backend calls)
//! │   └── notice: Option<String>     (footer notice line)
//! └── overlay: Option<Overlay>       (add / edit dialog)
//! ```
//!
//! State is split between `TuiState` and `Option<Overlay>` so overlay
//! handlers can take `&mut self` alongside `&TuiState`.

use roster_core::config::Config;

use crate::common::{TaskSeq, Tasks};
use crate::features::navigation::NavigationState;
use crate::features::session::SessionState;
use crate::features::users::{UsersContext, UsersState};
use crate::overlays::Overlay;

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            tui: TuiState::new(config),
            overlay: None,
        }
    }
}

/// TUI application state (non-overlay).
pub struct TuiState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    pub navigation: NavigationState,
    pub session: SessionState,
    pub users: UsersState,
    /// Task id sequence for backend calls.
    pub task_seq: TaskSeq,
    /// Task lifecycle state for backend calls.
    pub tasks: Tasks,
    pub config: Config,
    /// Footer notice (only set when mutation errors are surfaced).
    pub notice: Option<String>,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(config: Config) -> Self {
        Self {
            should_quit: false,
            navigation: NavigationState::default(),
            session: SessionState::default(),
            users: UsersState::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            config,
            notice: None,
            spinner_frame: 0,
        }
    }

    pub fn users_context(&self) -> UsersContext {
        UsersContext {
            surface_mutation_errors: self.config.ui.surface_mutation_errors,
        }
    }
}

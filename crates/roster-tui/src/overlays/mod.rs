//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard input.
//! Each overlay is self-contained: it owns its state, key handler, and render function.
//!
//! - `user_form.rs`: Add / edit user dialog
//! - `render_utils.rs`: Shared rendering utilities for boxes and input lines

pub mod render_utils;
pub mod user_form;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use roster_core::records::{UserDraft, UserId};
pub use user_form::{FormMode, UserFormState};

use crate::common::{TaskId, Tasks};
use crate::effects::UiEffect;
use crate::state::TuiState;

/// Requests to open a new overlay.
#[derive(Debug)]
pub enum OverlayRequest {
    AddUser,
    EditUser { id: UserId, draft: UserDraft },
}

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            effects: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    #[must_use]
    pub fn with_ui_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    UserForm(UserFormState),
}

impl Overlay {
    pub fn open(request: OverlayRequest) -> Self {
        match request {
            OverlayRequest::AddUser => Overlay::UserForm(UserFormState::add()),
            OverlayRequest::EditUser { id, draft } => {
                Overlay::UserForm(UserFormState::edit(id, draft))
            }
        }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        available_height: u16,
        tasks: &Tasks,
        spinner_frame: usize,
    ) {
        match self {
            Overlay::UserForm(form) => {
                form.render(frame, area, available_height, tasks, spinner_frame);
            }
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::UserForm(form) => form.handle_key(tui, key),
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        match self {
            Overlay::UserForm(form) => form.handle_paste(text),
        }
    }

    /// Records the task ids assigned to effects this overlay emitted.
    pub fn track_submission(&mut self, effects: &[UiEffect]) {
        match self {
            Overlay::UserForm(form) => form.track_submission(effects),
        }
    }

    /// Task of the user dialog's latest save, if this overlay is one.
    pub fn submitted_task(&self) -> Option<TaskId> {
        match self {
            Overlay::UserForm(form) => form.submitted,
        }
    }
}

/// Extension trait for `Option<Overlay>` providing convenience helpers.
pub trait OverlayExt {
    /// Renders the overlay if one is active.
    fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        available_height: u16,
        tasks: &Tasks,
        spinner_frame: usize,
    );

    /// Closes the user dialog if its latest save ran as `task`.
    fn close_form(&mut self, task: TaskId);
}

impl OverlayExt for Option<Overlay> {
    fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        available_height: u16,
        tasks: &Tasks,
        spinner_frame: usize,
    ) {
        if let Some(overlay) = self {
            overlay.render(frame, area, available_height, tasks, spinner_frame);
        }
    }

    fn close_form(&mut self, task: TaskId) {
        if self.as_ref().and_then(Overlay::submitted_task) == Some(task) {
            *self = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_form_only_matches_own_task() {
        let mut overlay = Some(Overlay::open(OverlayRequest::AddUser));
        overlay.close_form(TaskId(1));
        assert!(overlay.is_some());

        if let Some(overlay) = overlay.as_mut() {
            overlay.track_submission(&[UiEffect::InsertUser {
                task: Some(TaskId(2)),
                draft: UserDraft::default(),
            }]);
        }
        overlay.close_form(TaskId(1));
        assert!(overlay.is_some());
        overlay.close_form(TaskId(2));
        assert!(overlay.is_none());
    }

    #[test]
    fn test_edit_request_copies_row() {
        let overlay = Overlay::open(OverlayRequest::EditUser {
            id: UserId::new("4"),
            draft: UserDraft {
                name: "Ada".to_string(),
                ..UserDraft::default()
            },
        });
        let Overlay::UserForm(form) = overlay;
        assert_eq!(form.target, Some(UserId::new("4")));
        assert_eq!(form.draft.name, "Ada");
        assert_eq!(form.mode(), FormMode::Edit);
    }
}

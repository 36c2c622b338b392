//! User table reducer.
//!
//! Handles table keys and the results of load and mutation calls. Every
//! successful mutation requests a reload; nothing is patched locally.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use roster_core::records::SortColumn;

use super::state::UsersState;
use crate::common::Tasks;
use crate::effects::UiEffect;
use crate::events::UsersUiEvent;
use crate::mutations::{NoticeMutation, StateMutation};
use crate::overlays::OverlayRequest;

/// What the reducer should do with an open add/edit dialog.
#[derive(Debug, PartialEq, Eq)]
pub enum FormAction {
    Keep,
    /// Close the dialog whose save produced this result, if still open.
    Close,
}

/// Options that change how results are surfaced.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsersContext {
    /// Show mutation failures in the footer instead of only logging them.
    pub surface_mutation_errors: bool,
}

/// Handles a key press on the home screen (no overlay open).
pub fn handle_home_key(
    users: &mut UsersState,
    tasks: &Tasks,
    key: KeyEvent,
) -> (Vec<UiEffect>, Option<OverlayRequest>) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('q') => return (vec![UiEffect::Quit], None),
        KeyCode::Char('c') if ctrl => return (vec![UiEffect::Quit], None),
        _ => {}
    }

    // Loading placeholder and the load error page have no controls.
    if users.records().is_none() {
        return (vec![], None);
    }

    match key.code {
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            if let Some(column) = SortColumn::from_index(index) {
                users.sort_by(column);
            }
            (vec![], None)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            users.select_next();
            (vec![], None)
        }
        KeyCode::Up | KeyCode::Char('k') => {
            users.select_prev();
            (vec![], None)
        }
        KeyCode::Char('a') => (vec![], Some(OverlayRequest::AddUser)),
        KeyCode::Char('e') | KeyCode::Enter => {
            let request = users.selected_record().map(|record| OverlayRequest::EditUser {
                id: record.id.clone(),
                draft: record.to_draft(),
            });
            (vec![], request)
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if tasks.delete_user.is_running() {
                return (vec![], None);
            }
            let Some(id) = users.selected_record().map(|record| record.id.clone()) else {
                return (vec![], None);
            };
            users.deleting = Some(id.clone());
            (vec![UiEffect::DeleteUser { task: None, id }], None)
        }
        _ => (vec![], None),
    }
}

/// Handles the result of a call against the user collection.
pub fn handle_users_event(
    users: &mut UsersState,
    ctx: UsersContext,
    event: UsersUiEvent,
) -> (Vec<UiEffect>, Vec<StateMutation>, FormAction) {
    let reload = || vec![UiEffect::LoadUsers { task: None }];
    let failure = |what: &str, error: String| {
        if ctx.surface_mutation_errors {
            vec![StateMutation::Notice(NoticeMutation::Show(format!(
                "Failed to {what}: {error}"
            )))]
        } else {
            vec![]
        }
    };
    let cleared = || vec![StateMutation::Notice(NoticeMutation::Clear)];

    match event {
        UsersUiEvent::Loaded(records) => {
            users.set_records(records);
            (vec![], vec![], FormAction::Keep)
        }
        UsersUiEvent::LoadFailed { error: _ } => {
            users.set_failed();
            (vec![], vec![], FormAction::Keep)
        }
        UsersUiEvent::Added => (reload(), cleared(), FormAction::Close),
        UsersUiEvent::AddFailed { error } => {
            (vec![], failure("add user", error), FormAction::Keep)
        }
        UsersUiEvent::Updated => (reload(), cleared(), FormAction::Close),
        UsersUiEvent::UpdateFailed { error } => {
            (vec![], failure("update user", error), FormAction::Keep)
        }
        UsersUiEvent::Deleted => {
            users.deleting = None;
            (reload(), cleared(), FormAction::Keep)
        }
        UsersUiEvent::DeleteFailed { error } => {
            users.deleting = None;
            (vec![], failure("delete user", error), FormAction::Keep)
        }
    }
}

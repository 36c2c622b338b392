//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent backend calls and quitting only, never direct UI mutations.
//!
//! Every backend effect carries a `task` id. Feature reducers and overlays
//! emit `None`; the top-level reducer assigns the id and marks the task
//! busy before the runtime sees the effect.

use roster_core::records::{UserDraft, UserId};

use crate::common::{TaskId, TaskKind};

#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    SignIn {
        task: Option<TaskId>,
        email: String,
        password: String,
    },

    SignUp {
        task: Option<TaskId>,
        email: String,
        password: String,
    },

    /// Fetch the full user list.
    LoadUsers { task: Option<TaskId> },

    InsertUser {
        task: Option<TaskId>,
        draft: UserDraft,
    },

    UpdateUser {
        task: Option<TaskId>,
        id: UserId,
        draft: UserDraft,
    },

    DeleteUser { task: Option<TaskId>, id: UserId },
}

impl UiEffect {
    /// Task slot of a backend effect, with its id field.
    pub fn task_slot(&mut self) -> Option<(TaskKind, &mut Option<TaskId>)> {
        match self {
            UiEffect::Quit => None,
            UiEffect::SignIn { task, .. } => Some((TaskKind::SignIn, task)),
            UiEffect::SignUp { task, .. } => Some((TaskKind::SignUp, task)),
            UiEffect::LoadUsers { task } => Some((TaskKind::LoadUsers, task)),
            UiEffect::InsertUser { task, .. } => Some((TaskKind::AddUser, task)),
            UiEffect::UpdateUser { task, .. } => Some((TaskKind::UpdateUser, task)),
            UiEffect::DeleteUser { task, .. } => Some((TaskKind::DeleteUser, task)),
        }
    }
}

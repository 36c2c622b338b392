use roster_core::backend::Backend;
use roster_core::records::{UserDraft, UserId};

use crate::events::{UiEvent, UsersUiEvent};

fn describe(err: &anyhow::Error) -> String {
    format!("{err:#}")
}

/// Fetches the full user list.
pub async fn load_users(backend: Backend) -> UiEvent {
    let event = match backend.users.select_all().await {
        Ok(records) => {
            tracing::debug!(count = records.len(), "users loaded");
            UsersUiEvent::Loaded(records)
        }
        Err(err) => {
            tracing::warn!(error = %describe(&err), "loading users failed");
            UsersUiEvent::LoadFailed {
                error: describe(&err),
            }
        }
    };
    UiEvent::Users(event)
}

pub async fn insert_user(backend: Backend, draft: UserDraft) -> UiEvent {
    let event = match backend.users.insert(&draft).await {
        Ok(()) => {
            tracing::info!(email = %draft.email, "user added");
            UsersUiEvent::Added
        }
        Err(err) => {
            tracing::warn!(error = %describe(&err), "adding user failed");
            UsersUiEvent::AddFailed {
                error: describe(&err),
            }
        }
    };
    UiEvent::Users(event)
}

pub async fn update_user(backend: Backend, id: UserId, draft: UserDraft) -> UiEvent {
    let event = match backend.users.update(&id, &draft).await {
        Ok(()) => {
            tracing::info!(id = id.as_str(), "user updated");
            UsersUiEvent::Updated
        }
        Err(err) => {
            tracing::warn!(id = id.as_str(), error = %describe(&err), "updating user failed");
            UsersUiEvent::UpdateFailed {
                error: describe(&err),
            }
        }
    };
    UiEvent::Users(event)
}

pub async fn delete_user(backend: Backend, id: UserId) -> UiEvent {
    let event = match backend.users.delete_by_id(&id).await {
        Ok(()) => {
            tracing::info!(id = id.as_str(), "user deleted");
            UsersUiEvent::Deleted
        }
        Err(err) => {
            tracing::warn!(id = id.as_str(), error = %describe(&err), "deleting user failed");
            UsersUiEvent::DeleteFailed {
                error: describe(&err),
            }
        }
    };
    UiEvent::Users(event)
}

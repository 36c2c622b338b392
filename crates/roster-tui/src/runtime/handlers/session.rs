use roster_core::backend::Backend;
use roster_core::session;

use crate::events::{SessionUiEvent, UiEvent};

/// Signs in once with the typed credentials.
pub async fn sign_in(backend: Backend, email: String, password: String) -> UiEvent {
    let event = match session::authenticate(backend.auth.as_ref(), &email, &password).await {
        Ok(session) => SessionUiEvent::SignedIn {
            email: session.user_email.unwrap_or(email),
        },
        Err(error) => SessionUiEvent::SignInFailed { error },
    };
    UiEvent::Session(event)
}

/// Creates an account. The failure text is logged by `register`, not shown.
pub async fn sign_up(backend: Backend, email: String, password: String) -> UiEvent {
    let event = match session::register(backend.auth.as_ref(), &email, &password).await {
        Ok(()) => SessionUiEvent::Registered,
        Err(_) => SessionUiEvent::RegisterFailed,
    };
    UiEvent::Session(event)
}

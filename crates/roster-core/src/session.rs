//! Sign-in and sign-up against the auth capability.
//!
//! `authenticate` folds every failure (service error, transport error,
//! success without a session) into one display line. `register` reports
//! only whether the account was created; callers route on the outcome.

use anyhow::Result;

use crate::backend::{AuthApi, Session};

/// Message used when the auth service answers without a session.
pub const NO_SESSION_MESSAGE: &str = "No session";

/// Message used when an error carries no text of its own.
pub const FALLBACK_MESSAGE: &str = "An error occurred";

/// Signs in once. On failure returns the message to show on the login form.
///
/// # Errors
/// Returns the single-line, human-readable failure message.
pub async fn authenticate(
    auth: &dyn AuthApi,
    email: &str,
    password: &str,
) -> Result<Session, String> {
    match auth.sign_in(email, password).await {
        Ok(Some(session)) => {
            tracing::info!(email, "signed in");
            Ok(session)
        }
        Ok(None) => {
            tracing::warn!(email, "sign-in succeeded without a session");
            Err(NO_SESSION_MESSAGE.to_string())
        }
        Err(err) => {
            tracing::warn!(email, error = %format!("{err:#}"), "sign-in failed");
            Err(error_line(&err))
        }
    }
}

/// Creates an account.
///
/// # Errors
/// Returns the underlying error; the UI does not show it.
pub async fn register(auth: &dyn AuthApi, email: &str, password: &str) -> Result<()> {
    match auth.sign_up(email, password).await {
        Ok(()) => {
            tracing::info!(email, "account created");
            Ok(())
        }
        Err(err) => {
            tracing::warn!(email, error = %format!("{err:#}"), "sign-up failed");
            Err(err)
        }
    }
}

/// First line of the outermost error message, or the fallback.
fn error_line(err: &anyhow::Error) -> String {
    let text = err.to_string();
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map_or_else(|| FALLBACK_MESSAGE.to_string(), ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{DEMO_EMAIL, DEMO_PASSWORD, MemoryBackend};

    #[tokio::test]
    async fn test_authenticate_success_returns_session() {
        let backend = MemoryBackend::seeded();
        let session = authenticate(&backend, DEMO_EMAIL, DEMO_PASSWORD)
            .await
            .unwrap();
        assert!(!session.access_token.is_empty());
    }

    #[tokio::test]
    async fn test_authenticate_error_is_verbatim() {
        let backend = MemoryBackend::seeded();
        let err = authenticate(&backend, DEMO_EMAIL, "nope").await.unwrap_err();
        assert_eq!(err, "Invalid login credentials");
    }

    #[tokio::test]
    async fn test_authenticate_without_session_is_error() {
        let backend = MemoryBackend::seeded();
        backend.set_omit_session(true);
        let err = authenticate(&backend, DEMO_EMAIL, DEMO_PASSWORD)
            .await
            .unwrap_err();
        assert_eq!(err, NO_SESSION_MESSAGE);
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let backend = MemoryBackend::new();
        register(&backend, "me@example.com", "secret").await.unwrap();
        assert!(authenticate(&backend, "me@example.com", "secret").await.is_ok());
        assert!(register(&backend, "me@example.com", "secret").await.is_err());
    }

    #[test]
    fn test_error_line_takes_first_line() {
        let err = anyhow::anyhow!("first line\nsecond line");
        assert_eq!(error_line(&err), "first line");
    }

    #[test]
    fn test_error_line_falls_back_when_empty() {
        let err = anyhow::anyhow!("   ");
        assert_eq!(error_line(&err), FALLBACK_MESSAGE);
    }
}

//! Session feature reducer.
//!
//! Handles login form keys and the results of sign-in / sign-up calls.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::SessionState;
use crate::common::Tasks;
use crate::effects::UiEffect;
use crate::events::SessionUiEvent;
use crate::features::navigation::Route;
use crate::mutations::{NavigationMutation, SessionMutation, StateMutation};

/// Handles a key press while the login screen is shown.
pub fn handle_login_key(
    session: &mut SessionState,
    tasks: &Tasks,
    key: KeyEvent,
) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let form = &mut session.login;

    match key.code {
        KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],
        KeyCode::Char('r') if ctrl => {
            if tasks.sign_up.is_running() {
                return vec![];
            }
            if let Some(missing) = form.first_missing() {
                form.focus = missing;
                return vec![];
            }
            vec![UiEffect::SignUp {
                task: None,
                email: form.email.trim().to_string(),
                password: form.password.clone(),
            }]
        }
        KeyCode::Tab | KeyCode::Down => {
            form.focus = form.focus.next();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus = form.focus.prev();
            vec![]
        }
        KeyCode::Enter => {
            if tasks.sign_in.is_running() {
                return vec![];
            }
            if let Some(missing) = form.first_missing() {
                form.focus = missing;
                return vec![];
            }
            form.error = None;
            vec![UiEffect::SignIn {
                task: None,
                email: form.email.trim().to_string(),
                password: form.password.clone(),
            }]
        }
        KeyCode::Backspace => {
            form.focused_mut().pop();
            vec![]
        }
        KeyCode::Char(c) if !ctrl && !alt => {
            form.focused_mut().push(c);
            vec![]
        }
        _ => vec![],
    }
}

/// Handles pasted text on the login screen (single line only).
pub fn handle_login_paste(session: &mut SessionState, text: &str) {
    let line = text.lines().next().unwrap_or_default();
    session.login.focused_mut().push_str(line);
}

/// Handles the result of a sign-in or sign-up call.
pub fn handle_session_event(
    session: &mut SessionState,
    event: SessionUiEvent,
) -> Vec<StateMutation> {
    match event {
        SessionUiEvent::SignedIn { email } => {
            session.login.error = None;
            session.login.password.clear();
            vec![
                StateMutation::Session(SessionMutation::SetSignedIn(Some(email))),
                StateMutation::Navigation(NavigationMutation::RedirectTo(Route::Home)),
            ]
        }
        SessionUiEvent::SignInFailed { error } => {
            session.login.error = Some(error);
            vec![]
        }
        SessionUiEvent::Registered => vec![
            StateMutation::Navigation(NavigationMutation::Invalidate(Route::Home)),
            StateMutation::Navigation(NavigationMutation::RedirectTo(Route::Home)),
        ],
        SessionUiEvent::RegisterFailed => vec![StateMutation::Navigation(
            NavigationMutation::RedirectTo(Route::Error),
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::TaskId;
    use crate::features::session::LoginField;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(session: &mut SessionState, text: &str) {
        let tasks = Tasks::default();
        for c in text.chars() {
            handle_login_key(session, &tasks, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut session = SessionState::default();
        type_text(&mut session, "a@b.c");
        handle_login_key(&mut session, &Tasks::default(), key(KeyCode::Tab));
        type_text(&mut session, "pw");

        assert_eq!(session.login.email, "a@b.c");
        assert_eq!(session.login.password, "pw");
        assert_eq!(session.login.focus, LoginField::Password);
    }

    #[test]
    fn test_enter_with_missing_field_focuses_it() {
        let mut session = SessionState::default();
        type_text(&mut session, "a@b.c");

        let effects = handle_login_key(&mut session, &Tasks::default(), key(KeyCode::Enter));

        assert!(effects.is_empty());
        assert_eq!(session.login.focus, LoginField::Password);
    }

    #[test]
    fn test_enter_submits_and_clears_previous_error() {
        let mut session = SessionState::default();
        session.login.email = "a@b.c".to_string();
        session.login.password = "pw".to_string();
        session.login.error = Some("old".to_string());

        let effects = handle_login_key(&mut session, &Tasks::default(), key(KeyCode::Enter));

        assert!(matches!(
            effects.as_slice(),
            [UiEffect::SignIn { email, password, .. }] if email == "a@b.c" && password == "pw"
        ));
        assert!(session.login.error.is_none());
    }

    #[test]
    fn test_enter_ignored_while_signing_in() {
        let mut session = SessionState::default();
        session.login.email = "a@b.c".to_string();
        session.login.password = "pw".to_string();
        let mut tasks = Tasks::default();
        tasks.sign_in.begin(TaskId(0));

        let effects = handle_login_key(&mut session, &tasks, key(KeyCode::Enter));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_ctrl_r_requests_sign_up() {
        let mut session = SessionState::default();
        session.login.email = "new@b.c".to_string();
        session.login.password = "pw".to_string();

        let effects = handle_login_key(
            &mut session,
            &Tasks::default(),
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
        );
        assert!(matches!(effects.as_slice(), [UiEffect::SignUp { .. }]));
        assert_eq!(session.login.email, "new@b.c");
    }

    #[test]
    fn test_register_outcomes_route() {
        let mut session = SessionState::default();
        assert_eq!(
            handle_session_event(&mut session, SessionUiEvent::Registered),
            vec![
                StateMutation::Navigation(NavigationMutation::Invalidate(Route::Home)),
                StateMutation::Navigation(NavigationMutation::RedirectTo(Route::Home)),
            ]
        );
        assert_eq!(
            handle_session_event(&mut session, SessionUiEvent::RegisterFailed),
            vec![StateMutation::Navigation(NavigationMutation::RedirectTo(
                Route::Error
            ))]
        );
    }

    #[test]
    fn test_paste_takes_first_line() {
        let mut session = SessionState::default();
        handle_login_paste(&mut session, "a@b.c\nignored");
        assert_eq!(session.login.email, "a@b.c");
    }
}

//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! Backend effects leave the reducer with a task id already assigned and the
//! matching task marked busy, so the control that triggered them is disabled
//! before the next event is processed.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::common::TaskId;
use crate::effects::UiEffect;
use crate::events::{UiEvent, UsersUiEvent};
use crate::features::navigation::Route;
use crate::features::users::FormAction;
use crate::features::{session, users};
use crate::mutations::{NavigationMutation, NoticeMutation, SessionMutation, StateMutation};
use crate::overlays::{Overlay, OverlayExt, OverlayTransition};
use crate::state::{AppState, TuiState};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    let mut effects = match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            app.tui.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            let ok = app.tui.tasks.state_mut(kind).finish_if_active(completed.id);
            if ok {
                match *completed.result {
                    UiEvent::Users(users_event) => {
                        handle_users_event(app, Some(completed.id), users_event)
                    }
                    result => update(app, result),
                }
            } else {
                tracing::debug!(?kind, id = completed.id.0, "dropping superseded task result");
                vec![]
            }
        }
        UiEvent::Session(session_event) => {
            let mutations = session::handle_session_event(&mut app.tui.session, session_event);
            apply_mutations(app, mutations)
        }
        UiEvent::Users(users_event) => handle_users_event(app, None, users_event),
    };
    assign_task_ids(&mut app.tui, &mut effects);
    effects
}

/// Applies a user collection result. `task` is the call that produced it;
/// only a dialog whose own save ran as that task is closed on success.
fn handle_users_event(
    app: &mut AppState,
    task: Option<TaskId>,
    event: UsersUiEvent,
) -> Vec<UiEffect> {
    let ctx = app.tui.users_context();
    let (mut effects, mutations, action) =
        users::handle_users_event(&mut app.tui.users, ctx, event);
    if let (FormAction::Close, Some(task)) = (action, task) {
        app.overlay.close_form(task);
    }
    effects.extend(apply_mutations(app, mutations));
    effects
}

/// Gives every backend effect without an id a fresh one and marks it active.
fn assign_task_ids(tui: &mut TuiState, effects: &mut [UiEffect]) {
    for effect in effects {
        if let Some((kind, task)) = effect.task_slot()
            && task.is_none()
        {
            let id = tui.task_seq.next_id();
            tui.tasks.state_mut(kind).begin(id);
            *task = Some(id);
        }
    }
}

/// Applies cross-slice mutations in order. Mounting the home route
/// requests a load.
fn apply_mutations(app: &mut AppState, mutations: Vec<StateMutation>) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    for mutation in mutations {
        match mutation {
            StateMutation::Navigation(NavigationMutation::RedirectTo(route)) => {
                app.tui.navigation.route = route;
                if route == Route::Home {
                    effects.push(UiEffect::LoadUsers { task: None });
                } else {
                    app.overlay = None;
                }
            }
            StateMutation::Navigation(NavigationMutation::Invalidate(route)) => {
                if route == Route::Home {
                    app.tui.users.invalidate();
                }
            }
            StateMutation::Session(SessionMutation::SetSignedIn(email)) => {
                app.tui.session.signed_in = email;
            }
            StateMutation::Notice(NoticeMutation::Show(text)) => {
                app.tui.notice = Some(text);
            }
            StateMutation::Notice(NoticeMutation::Clear) => {
                app.tui.notice = None;
            }
        }
    }
    effects
}

// ============================================================================
// Terminal Event Handlers
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => {
            if let Some(overlay) = app.overlay.as_mut() {
                overlay.handle_paste(&text);
            } else if app.tui.navigation.is_at(Route::Login) {
                session::handle_login_paste(&mut app.tui.session, &text);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if let Some(overlay) = app.overlay.as_mut() {
        let update = overlay.handle_key(&app.tui, key);
        let mut effects = update.effects;
        assign_task_ids(&mut app.tui, &mut effects);
        match update.transition {
            OverlayTransition::Stay => overlay.track_submission(&effects),
            OverlayTransition::Close => app.overlay = None,
        }
        return effects;
    }

    match app.tui.navigation.route {
        Route::Login => session::handle_login_key(&mut app.tui.session, &app.tui.tasks, key),
        Route::Home => {
            app.tui.notice = None;
            let (effects, request) =
                users::handle_home_key(&mut app.tui.users, &app.tui.tasks, key);
            if let Some(request) = request {
                app.overlay = Some(Overlay::open(request));
            }
            effects
        }
        Route::Error => handle_error_page_key(app, key),
    }
}

fn handle_error_page_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('q') => vec![UiEffect::Quit],
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],
        KeyCode::Esc => apply_mutations(
            app,
            vec![StateMutation::Navigation(NavigationMutation::RedirectTo(
                Route::Login,
            ))],
        ),
        _ => vec![],
    }
}

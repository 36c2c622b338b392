//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference, draw to a ratatui
//! Frame, and never mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;

use crate::common::truncate_with_ellipsis;
use crate::features::navigation::Route;
use crate::features::{session, users};
use crate::overlays::OverlayExt;
use crate::state::AppState;

/// Height of the footer (notice line + key hints).
const FOOTER_HEIGHT: u16 = 2;

/// Horizontal margin around the page content.
const PAGE_MARGIN: u16 = 1;

/// Spinner frames for busy indicators.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

pub fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;

    match state.navigation.route {
        Route::Login => {
            session::render_login(frame, area, &state.session, &state.tasks, state.spinner_frame);
        }
        Route::Error => session::render_error_page(frame, area),
        Route::Home => {
            let [page, footer] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)])
                    .areas(area);
            let content = Rect::new(
                page.x + PAGE_MARGIN,
                page.y,
                page.width.saturating_sub(PAGE_MARGIN * 2),
                page.height,
            );
            users::render_home(
                frame,
                content,
                &state.users,
                state.session.signed_in.as_deref(),
                &state.tasks,
                state.spinner_frame,
            );
            render_footer(frame, footer, state.notice.as_deref());

            app.overlay
                .render(frame, area, page.height, &state.tasks, state.spinner_frame);
        }
    }
}

fn render_footer(frame: &mut Frame, area: Rect, notice: Option<&str>) {
    let [notice_area, hints_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    if let Some(notice) = notice {
        let text = truncate_with_ellipsis(notice, notice_area.width as usize);
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(Color::Red))),
            notice_area,
        );
    }
    frame.render_widget(
        Paragraph::new(users::home_hints()).centered(),
        hints_area,
    );
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Cell;
    use roster_core::config::Config;

    use super::*;
    use crate::overlays::{Overlay, OverlayRequest};

    fn screen(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_login_screen_shows_error_and_masks_password() {
        let mut app = AppState::new(Config::default());
        app.tui.session.login.email = "a@b.c".to_string();
        app.tui.session.login.password = "secret".to_string();
        app.tui.session.login.error = Some("Invalid login credentials".to_string());

        let text = screen(&app);
        assert!(text.contains("Login"));
        assert!(text.contains("a@b.c"));
        assert!(text.contains("••••••"));
        assert!(!text.contains("secret"));
        assert!(text.contains("Invalid login credentials"));
    }

    #[test]
    fn test_login_busy_indicator() {
        let mut app = AppState::new(Config::default());
        app.tui.tasks.sign_in.begin(crate::common::TaskId(0));
        assert!(screen(&app).contains("Logging in..."));
    }

    #[test]
    fn test_error_page() {
        let mut app = AppState::new(Config::default());
        app.tui.navigation.route = Route::Error;
        assert!(screen(&app).contains("Something went wrong"));
    }

    #[test]
    fn test_home_with_dialog_and_notice() {
        let mut app = AppState::new(Config::default());
        app.tui.navigation.route = Route::Home;
        app.tui.users.set_records(Vec::new());
        app.tui.notice = Some("Failed to add user: boom".to_string());
        app.overlay = Some(Overlay::open(OverlayRequest::AddUser));
        app.tui.tasks.add_user.begin(crate::common::TaskId(1));

        let text = screen(&app);
        assert!(text.contains("Add New User"));
        assert!(text.contains("Saving..."));
        assert!(text.contains("Failed to add user: boom"));
    }

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner(0), spinner(SPINNER_FRAMES.len()));
        assert_ne!(spinner(0), spinner(1));
    }
}

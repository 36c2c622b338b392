//! Login and error screens.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::state::{LoginField, SessionState};
use crate::common::{Tasks, mask};
use crate::overlays::render_utils::{
    InputHint, InputLine, OverlayConfig, body_row, render_input_line, render_overlay,
};
use crate::render::spinner;

const LOGIN_WIDTH: u16 = 52;
const LOGIN_HEIGHT: u16 = 14;

pub fn render_login(
    frame: &mut Frame,
    area: Rect,
    session: &SessionState,
    tasks: &Tasks,
    spinner_frame: usize,
) {
    let form = &session.login;
    let hints = [
        InputHint::new("Tab", "next field"),
        InputHint::new("Enter", "log in"),
        InputHint::new("Ctrl+R", "register"),
        InputHint::new("Esc", "quit"),
    ];
    let body = render_overlay(
        frame,
        area,
        area.height,
        &OverlayConfig {
            title: "Login",
            border_color: Color::Cyan,
            width: LOGIN_WIDTH,
            height: LOGIN_HEIGHT,
            hints: &hints,
        },
    );

    render_field(
        frame,
        body,
        0,
        "Email",
        &form.email,
        "Enter your email",
        form.focus == LoginField::Email,
    );
    render_field(
        frame,
        body,
        3,
        "Password",
        &mask(&form.password),
        "Enter your password",
        form.focus == LoginField::Password,
    );

    if let Some(row) = body_row(body, 6) {
        let button = if tasks.sign_in.is_running() {
            Line::from(vec![
                Span::styled(spinner(spinner_frame), Style::default().fg(Color::Cyan)),
                Span::styled(" Logging in...", Style::default().fg(Color::DarkGray)),
            ])
        } else if tasks.sign_up.is_running() {
            Line::from(vec![
                Span::styled(spinner(spinner_frame), Style::default().fg(Color::Cyan)),
                Span::styled(" Creating account...", Style::default().fg(Color::DarkGray)),
            ])
        } else {
            Line::from(Span::styled(
                "[ Login ]",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
        };
        frame.render_widget(Paragraph::new(button).alignment(Alignment::Center), row);
    }

    if let Some(error) = &form.error {
        let error_area = Rect::new(
            body.x,
            body.y + 8,
            body.width,
            body.height.saturating_sub(8),
        );
        if error_area.height > 0 {
            let para = Paragraph::new(Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(Color::Red),
            )))
            .wrap(Wrap { trim: true });
            frame.render_widget(para, error_area);
        }
    }
}

fn render_field(
    frame: &mut Frame,
    body: Rect,
    offset: u16,
    label: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
) {
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    if let Some(row) = body_row(body, offset) {
        frame.render_widget(Paragraph::new(Span::styled(label, label_style)), row);
    }
    if let Some(row) = body_row(body, offset + 1) {
        render_input_line(
            frame,
            row,
            &InputLine {
                value,
                placeholder: Some(placeholder),
                prompt: "> ",
                prompt_color: Color::DarkGray,
                text_color: Color::White,
                placeholder_color: Color::DarkGray,
                cursor_color: focused.then_some(Color::Cyan),
            },
        );
    }
}

/// Static page shown after a failed registration.
pub fn render_error_page(frame: &mut Frame, area: Rect) {
    let hints = [InputHint::new("Esc", "back to login"), InputHint::new("q", "quit")];
    let body = render_overlay(
        frame,
        area,
        area.height,
        &OverlayConfig {
            title: "Error",
            border_color: Color::Red,
            width: 44,
            height: 5,
            hints: &hints,
        },
    );
    if let Some(row) = body_row(body, 0) {
        frame.render_widget(
            Paragraph::new("Something went wrong").alignment(Alignment::Center),
            row,
        );
    }
}

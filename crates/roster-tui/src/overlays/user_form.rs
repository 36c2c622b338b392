//! Add / edit user dialog.
//!
//! The dialog owns its draft. Enter submits without closing; the reducer
//! closes it when the success result of this dialog's own submission
//! arrives, so a failed save leaves the draft intact. Esc discards the draft.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use roster_core::records::{SortColumn, UserDraft, UserId};

use super::OverlayUpdate;
use super::render_utils::{
    InputHint, InputLine, OverlayConfig, body_row, render_input_line, render_overlay,
    render_separator,
};
use crate::common::{TaskId, Tasks};
use crate::effects::UiEffect;
use crate::render::spinner;
use crate::state::TuiState;

const LABEL_WIDTH: u16 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit,
}

#[derive(Debug, Clone)]
pub struct UserFormState {
    /// Record being edited; `None` when adding.
    pub target: Option<UserId>,
    pub draft: UserDraft,
    /// Index into `SortColumn::all()`.
    pub focus: usize,
    /// Task carrying this dialog's latest save.
    pub submitted: Option<TaskId>,
}

impl UserFormState {
    /// Opens the dialog with an empty draft.
    pub fn add() -> Self {
        Self {
            target: None,
            draft: UserDraft::default(),
            focus: 0,
            submitted: None,
        }
    }

    /// Opens the dialog with a copy of an existing row.
    pub fn edit(id: UserId, draft: UserDraft) -> Self {
        Self {
            target: Some(id),
            draft,
            focus: 0,
            submitted: None,
        }
    }

    pub fn mode(&self) -> FormMode {
        if self.target.is_some() {
            FormMode::Edit
        } else {
            FormMode::Add
        }
    }

    /// True while this dialog's own save is in flight. A save started by
    /// an earlier, discarded dialog does not count.
    pub fn is_saving(&self, tasks: &Tasks) -> bool {
        let slot = match self.mode() {
            FormMode::Add => &tasks.add_user,
            FormMode::Edit => &tasks.update_user,
        };
        self.submitted.is_some_and(|id| slot.active == Some(id))
    }

    /// Remembers the task id the reducer assigned to this dialog's save.
    pub fn track_submission(&mut self, effects: &[UiEffect]) {
        let task = effects.iter().find_map(|effect| match effect {
            UiEffect::InsertUser { task, .. } | UiEffect::UpdateUser { task, .. } => *task,
            _ => None,
        });
        if task.is_some() {
            self.submitted = task;
        }
    }

    fn fields() -> &'static [SortColumn] {
        SortColumn::all()
    }

    fn focused_field(&self) -> SortColumn {
        Self::fields()[self.focus % Self::fields().len()]
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let count = Self::fields().len();

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % count;
                OverlayUpdate::stay()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + count - 1) % count;
                OverlayUpdate::stay()
            }
            KeyCode::Enter => {
                if self.is_saving(&tui.tasks) {
                    return OverlayUpdate::stay();
                }
                let draft = self.draft.clone();
                let effect = match &self.target {
                    None => UiEffect::InsertUser { task: None, draft },
                    Some(id) => UiEffect::UpdateUser {
                        task: None,
                        id: id.clone(),
                        draft,
                    },
                };
                OverlayUpdate::stay().with_ui_effects(vec![effect])
            }
            KeyCode::Backspace => {
                self.draft.field_mut(self.focused_field()).pop();
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl && !alt => {
                self.draft.field_mut(self.focused_field()).push(c);
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    /// Pasted text goes into the focused field (first line only).
    pub fn handle_paste(&mut self, text: &str) {
        let line = text.lines().next().unwrap_or_default();
        self.draft.field_mut(self.focused_field()).push_str(line);
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        available_height: u16,
        tasks: &Tasks,
        spinner_frame: usize,
    ) {
        let (title, submit_label) = match self.mode() {
            FormMode::Add => ("Add New User", "Add User"),
            FormMode::Edit => ("Edit User", "Save Changes"),
        };
        let hints = [
            InputHint::new("Tab", "next field"),
            InputHint::new("Enter", "save"),
            InputHint::new("Esc", "cancel"),
        ];
        let body = render_overlay(
            frame,
            area,
            available_height,
            &OverlayConfig {
                title,
                border_color: Color::Yellow,
                width: 60,
                height: 10,
                hints: &hints,
            },
        );

        for (i, &field) in Self::fields().iter().enumerate() {
            let Some(row) = body_row(body, i as u16) else {
                break;
            };
            let focused = i == self.focus;
            let label_style = if focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let label_area = Rect::new(row.x, row.y, LABEL_WIDTH.min(row.width), 1);
            frame.render_widget(
                Paragraph::new(Span::styled(field.label(), label_style)),
                label_area,
            );
            let input_area = Rect::new(
                row.x + label_area.width,
                row.y,
                row.width.saturating_sub(label_area.width),
                1,
            );
            render_input_line(
                frame,
                input_area,
                &InputLine {
                    value: self.draft.field(field),
                    placeholder: None,
                    prompt: "> ",
                    prompt_color: Color::DarkGray,
                    text_color: Color::White,
                    placeholder_color: Color::DarkGray,
                    cursor_color: focused.then_some(Color::Yellow),
                },
            );
        }

        let count = Self::fields().len() as u16;
        render_separator(frame, body, count);
        if let Some(row) = body_row(body, count + 1) {
            let line = if self.is_saving(tasks) {
                Line::from(vec![
                    Span::styled(spinner(spinner_frame), Style::default().fg(Color::Yellow)),
                    Span::styled(" Saving...", Style::default().fg(Color::DarkGray)),
                ])
            } else {
                Line::from(Span::styled(
                    format!("[ {submit_label} ]"),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            };
            frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), row);
        }
    }
}

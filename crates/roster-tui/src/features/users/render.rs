use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};
use roster_core::records::SortColumn;

use super::state::{UsersState, UsersView};
use crate::common::Tasks;
use crate::render::spinner;

const ACTIONS_WIDTH: u16 = 18;

/// Renders the "User Management" page: title line plus the table body.
pub fn render_home(
    frame: &mut Frame,
    area: Rect,
    users: &UsersState,
    signed_in: Option<&str>,
    tasks: &Tasks,
    spinner_frame: usize,
) {
    let [title_area, _, body_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    render_title(frame, title_area, signed_in);

    match &users.view {
        UsersView::Loading => {
            frame.render_widget(Paragraph::new("Loading..."), body_area);
        }
        UsersView::Failed => {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Error loading users",
                    Style::default().fg(Color::Red),
                )),
                body_area,
            );
        }
        UsersView::Loaded(_) => render_table(frame, body_area, users, tasks, spinner_frame),
    }
}

fn render_title(frame: &mut Frame, area: Rect, signed_in: Option<&str>) {
    frame.render_widget(
        Paragraph::new(Span::styled(
            "User Management",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        area,
    );
    if let Some(email) = signed_in {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("Signed in as {email}"),
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Right),
            area,
        );
    }
}

fn render_table(
    frame: &mut Frame,
    area: Rect,
    users: &UsersState,
    tasks: &Tasks,
    spinner_frame: usize,
) {
    let rows = users.rows();
    if rows.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No users yet. Press a to add one.",
                Style::default().fg(Color::DarkGray),
            )),
            area,
        );
        return;
    }

    let header_cells = SortColumn::all()
        .iter()
        .enumerate()
        .map(|(i, &column)| {
            let mut label = format!("{} {}", i + 1, column.label());
            if users.sort.column == column {
                label.push(' ');
                label.push_str(users.sort.direction.arrow());
            }
            Cell::from(label)
        })
        .chain(std::iter::once(Cell::from("Actions")));
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let deleting = users
        .deleting
        .as_ref()
        .filter(|_| tasks.delete_user.is_running());
    let body = rows.iter().map(|record| {
        let actions = if deleting == Some(&record.id) {
            format!("{} Deleting...", spinner(spinner_frame))
        } else {
            "[e] Edit [d] Delete".to_string()
        };
        Row::new(vec![
            Cell::from(record.name.as_str()),
            Cell::from(record.email.as_str()),
            Cell::from(record.department.as_str()),
            Cell::from(record.group.as_str()),
            Cell::from(Span::styled(actions, Style::default().fg(Color::DarkGray))),
        ])
    });

    let widths = [
        Constraint::Fill(2),
        Constraint::Fill(3),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Length(ACTIONS_WIDTH),
    ];
    let table = Table::new(body, widths)
        .header(header)
        .column_spacing(2)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default().with_selected(Some(users.selected));
    frame.render_stateful_widget(table, area, &mut state);
}

/// Hint line for the home screen.
pub fn home_hints() -> Line<'static> {
    use crate::overlays::render_utils::{InputHint, hint_line};

    hint_line(
        &[
            InputHint::new("1-4", "sort"),
            InputHint::new("↑/↓", "select"),
            InputHint::new("a", "add"),
            InputHint::new("e", "edit"),
            InputHint::new("d", "delete"),
            InputHint::new("q", "quit"),
        ],
        Color::Cyan,
    )
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use roster_core::records::{UserId, UserRecord};

    use super::*;
    use crate::common::TaskId;

    fn screen(users: &UsersState) -> String {
        screen_with(users, &Tasks::default())
    }

    fn screen_with(users: &UsersState, tasks: &Tasks) -> String {
        let backend = TestBackend::new(100, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                render_home(
                    frame,
                    frame.area(),
                    users,
                    Some("admin@example.com"),
                    tasks,
                    0,
                );
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_placeholders() {
        let mut users = UsersState::default();
        assert!(screen(&users).contains("Loading..."));
        users.set_failed();
        assert!(screen(&users).contains("Error loading users"));
    }

    #[test]
    fn test_table_shows_sort_arrow_and_rows() {
        let mut users = UsersState::default();
        users.set_records(vec![UserRecord {
            id: UserId::new("1"),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            department: "Eng".to_string(),
            group: "Admins".to_string(),
        }]);
        let text = screen(&users);
        assert!(text.contains("User Management"));
        assert!(text.contains("Signed in as admin@example.com"));
        assert!(text.contains("Name ▲"));
        assert!(text.contains("ada@example.com"));
        assert!(text.contains("Actions"));
    }

    #[test]
    fn test_deleting_marker_stays_on_deleted_row() {
        let mut users = UsersState::default();
        users.set_records(
            ["Ada", "Bob"]
                .iter()
                .enumerate()
                .map(|(i, name)| UserRecord {
                    id: UserId::new(i.to_string()),
                    name: (*name).to_string(),
                    email: format!("{}@example.com", name.to_lowercase()),
                    department: "Eng".to_string(),
                    group: "Users".to_string(),
                })
                .collect(),
        );
        users.deleting = Some(UserId::new("0"));
        users.select_next();
        let mut tasks = Tasks::default();
        tasks.delete_user.begin(TaskId(1));

        let text = screen_with(&users, &tasks);
        let marked: Vec<_> = text.lines().filter(|l| l.contains("Deleting...")).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains("Ada"));

        let idle = screen_with(&users, &Tasks::default());
        assert!(!idle.contains("Deleting..."));
    }
}

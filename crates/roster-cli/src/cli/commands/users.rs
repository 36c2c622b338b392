//! `users` command handlers.

use anyhow::{Result, anyhow};
use comfy_table::{ContentArrangement, Table};
use roster_core::backend::Backend;
use roster_core::records::{SortColumn, SortDirection, SortState, UserRecord};
use roster_core::session;

/// Signs in, loads every record and prints them sorted.
pub async fn list(
    backend: &Backend,
    email: &str,
    password: &str,
    column: SortColumn,
    desc: bool,
) -> Result<()> {
    session::authenticate(backend.auth.as_ref(), email, password)
        .await
        .map_err(|message| anyhow!("Sign-in failed: {message}"))?;

    let records = backend.users.select_all().await?;
    tracing::info!(count = records.len(), "listing users");

    let sort = SortState {
        column,
        direction: if desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
    };

    if records.is_empty() {
        println!("No users.");
        return Ok(());
    }
    println!("{}", render_table(&sort.apply(&records)));
    Ok(())
}

fn render_table(rows: &[&UserRecord]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(["ID", "Name", "Email", "Department", "Group"]);
    for record in rows {
        table.add_row([
            record.id.as_str(),
            record.name.as_str(),
            record.email.as_str(),
            record.department.as_str(),
            record.group.as_str(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use roster_core::records::UserId;

    use super::*;

    fn record(id: &str, name: &str) -> UserRecord {
        UserRecord {
            id: UserId::new(id),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            department: "Eng".to_string(),
            group: String::new(),
        }
    }

    #[test]
    fn test_table_lists_rows_in_given_order() {
        let a = record("1", "Bob");
        let b = record("2", "Alice");
        let text = render_table(&[&a, &b]).to_string();

        assert!(text.contains("Department"));
        let bob = text.find("Bob").unwrap();
        let alice = text.find("Alice").unwrap();
        assert!(bob < alice);
    }
}

use comfy_table::{presets::ASCII_FULL, Cell, Table};

use crate::models::User;

/// Printed instead of a table when a listing came back empty.
pub const NO_USERS_MESSAGE: &str = "No users to display.";

/// Render a row-numbered user table for the terminal.
///
/// Returns `None` for an empty listing so callers can print
/// [`NO_USERS_MESSAGE`] instead of a headers-only skeleton.
pub fn render_users(users: &[User]) -> Option<String> {
    if users.is_empty() {
        return None;
    }

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec!["#", "Name", "UserID", "Reputation", "LastAccessDate"]);

    for (i, user) in users.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(user.name_or_missing()),
            Cell::new(user.user_id),
            Cell::new(user.reputation),
            Cell::new(user.last_access_display()),
        ]);
    }

    Some(table.to_string())
}

/// Table or the no-users message, whichever applies.
pub fn render_users_or_message(users: &[User]) -> String {
    render_users(users).unwrap_or_else(|| NO_USERS_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MISSING;

    fn sample_user(id: u64, name: &str, rep: u64) -> User {
        User {
            user_id: id,
            account_id: Some(id + 1000),
            display_name: Some(name.to_string()),
            reputation: rep,
            last_access_date: Some(1700000000),
            age: Some(30),
            location: Some("Somewhere".to_string()),
            user_type: Some("registered".to_string()),
        }
    }

    #[test]
    fn test_empty_listing_yields_message() {
        assert!(render_users(&[]).is_none());
        assert_eq!(render_users_or_message(&[]), NO_USERS_MESSAGE);
    }

    #[test]
    fn test_table_contains_rows_and_headers() {
        let users = vec![sample_user(1, "alice", 500), sample_user(2, "bob", 300)];
        let rendered = render_users(&users).unwrap();

        assert!(rendered.contains("Name"));
        assert!(rendered.contains("Reputation"));
        assert!(rendered.contains("alice"));
        assert!(rendered.contains("bob"));
        assert!(rendered.contains("2023-11-14 22:13:20"));
    }

    #[test]
    fn test_rows_are_numbered_from_one() {
        let users = vec![sample_user(9, "solo", 1)];
        let rendered = render_users(&users).unwrap();

        // first column of the single data row
        assert!(rendered.contains("| 1 "));
    }

    #[test]
    fn test_missing_name_renders_placeholder() {
        let mut user = sample_user(3, "ignored", 10);
        user.display_name = None;
        let rendered = render_users(&[user]).unwrap();

        assert!(rendered.contains(MISSING));
    }
}

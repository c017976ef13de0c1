use comfy_table::{presets::ASCII_FULL, Cell, Table};
use std::path::PathBuf;

use crate::models::{SortOrder, User, MISSING};
use crate::{Error, Result};

/// Fixed suffix every export file carries.
pub const EXPORT_EXTENSION: &str = ".sofusers";

/// Exporter for user listings
pub struct Exporter;

impl Exporter {
    /// Write a user report to `file_name`, sorted by user ID per `order`.
    ///
    /// The `.sofusers` suffix is appended when missing. Returns the path
    /// actually written.
    pub fn export_to_file(users: &[User], file_name: &str, order: SortOrder) -> Result<PathBuf> {
        let mut users = users.to_vec();
        Self::sort_by_user_id(&mut users, order);

        let report = Self::render_report(&users);
        let path = Self::ensure_extension(file_name);

        std::fs::write(&path, report)
            .map_err(|e| Error::ExportError(format!("Failed to write {}: {}", path.display(), e)))?;

        Ok(path)
    }

    /// Strict sort by user ID, ascending or descending.
    pub fn sort_by_user_id(users: &mut [User], order: SortOrder) {
        users.sort_unstable_by_key(|u| u.user_id);
        if order == SortOrder::Desc {
            users.reverse();
        }
    }

    /// The report body: a two-line count header plus a grid table.
    pub fn render_report(users: &[User]) -> String {
        let mut table = Table::new();
        table.load_preset(ASCII_FULL);
        table.set_header(vec![
            "UserID",
            "AccountID",
            "DisplayName",
            "UserAge",
            "Reputation",
            "Location",
            "UserType",
            "LastAccessDate",
        ]);

        for user in users {
            table.add_row(vec![
                Cell::new(user.user_id),
                Cell::new(opt_to_cell(user.account_id)),
                Cell::new(flatten_tabs(user.name_or_missing())),
                Cell::new(opt_to_cell(user.age)),
                Cell::new(user.reputation),
                Cell::new(flatten_tabs(user.location.as_deref().unwrap_or(MISSING))),
                Cell::new(user.user_type.as_deref().unwrap_or(MISSING)),
                Cell::new(user.last_access_display()),
            ]);
        }

        // Exports always cover the single page that was fetched.
        format!(
            "Total Count of Users Fetched: {}\nTotal Count of Pages: 1\n{}",
            users.len(),
            table
        )
    }

    /// Append the export suffix unless the name already ends with it.
    pub fn ensure_extension(file_name: &str) -> PathBuf {
        if file_name.ends_with(EXPORT_EXTENSION) {
            PathBuf::from(file_name)
        } else {
            PathBuf::from(format!("{}{}", file_name, EXPORT_EXTENSION))
        }
    }
}

fn opt_to_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| MISSING.to_string())
}

/// Tabs would wreck the fixed-width layout.
fn flatten_tabs(s: &str) -> String {
    s.replace('\t', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64, name: &str) -> User {
        User {
            user_id: id,
            account_id: Some(id * 10),
            display_name: Some(name.to_string()),
            reputation: id * 100,
            last_access_date: Some(1700000000),
            age: None,
            location: Some("Berlin, Germany".to_string()),
            user_type: Some("registered".to_string()),
        }
    }

    #[test]
    fn test_extension_appended_when_missing() {
        assert_eq!(
            Exporter::ensure_extension("report"),
            PathBuf::from("report.sofusers")
        );
        assert_eq!(
            Exporter::ensure_extension("report.txt"),
            PathBuf::from("report.txt.sofusers")
        );
        assert_eq!(
            Exporter::ensure_extension("report.sofusers"),
            PathBuf::from("report.sofusers")
        );
    }

    #[test]
    fn test_sorts_ascending_and_descending() {
        let mut users = vec![user(3, "c"), user(1, "a"), user(2, "b")];

        Exporter::sort_by_user_id(&mut users, SortOrder::Asc);
        let ids: Vec<u64> = users.iter().map(|u| u.user_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        Exporter::sort_by_user_id(&mut users, SortOrder::Desc);
        let ids: Vec<u64> = users.iter().map(|u| u.user_id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_report_header_and_body() {
        let users = vec![user(1, "alice"), user(2, "bob")];
        let report = Exporter::render_report(&users);

        assert!(report.starts_with("Total Count of Users Fetched: 2\n"));
        assert!(report.contains("Total Count of Pages: 1\n"));
        assert!(report.contains("DisplayName"));
        assert!(report.contains("alice"));
        assert!(report.contains("Berlin, Germany"));
    }

    #[test]
    fn test_missing_fields_render_placeholder() {
        let mut sparse = user(5, "ghost");
        sparse.account_id = None;
        sparse.location = None;
        sparse.user_type = None;

        let report = Exporter::render_report(&[sparse]);
        assert!(report.contains(MISSING));
    }

    #[test]
    fn test_tabs_flattened_in_names() {
        let mut tabby = user(9, "tab\there");
        tabby.location = Some("also\ttabbed".to_string());

        let report = Exporter::render_report(&[tabby]);
        assert!(report.contains("tab here"));
        assert!(report.contains("also tabbed"));
        assert!(!report.contains('\t'));
    }

    #[test]
    fn test_export_writes_file_with_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("snapshot");
        let users = vec![user(2, "b"), user(1, "a")];

        let written = Exporter::export_to_file(&users, target.to_str().unwrap(), SortOrder::Asc)
            .unwrap();

        assert!(written.to_string_lossy().ends_with(".sofusers"));
        let contents = std::fs::read_to_string(&written).unwrap();
        assert!(contents.starts_with("Total Count of Users Fetched: 2"));

        // ascending order: user 1 shows up before user 2
        let pos_a = contents.find("| 1 ").unwrap();
        let pos_b = contents.find("| 2 ").unwrap();
        assert!(pos_a < pos_b);
    }
}

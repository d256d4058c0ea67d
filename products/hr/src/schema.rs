//! Column layout of the employee sheet and its header row.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Column {
    EmpId,
    FirstName,
    LastName,
    Phone,
    Email,
    Position,
    Status,
    Note,
    PhotoUrl,
}

impl Column {
    /// Canonical column order of the sheet.
    pub const ALL: [Column; 9] = [
        Column::EmpId,
        Column::FirstName,
        Column::LastName,
        Column::Phone,
        Column::Email,
        Column::Position,
        Column::Status,
        Column::Note,
        Column::PhotoUrl,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn title(self) -> &'static str {
        match self {
            Column::EmpId => "Employee ID",
            Column::FirstName => "First Name",
            Column::LastName => "Last Name",
            Column::Phone => "Phone",
            Column::Email => "Email",
            Column::Position => "Position",
            Column::Status => "Status",
            Column::Note => "Note",
            Column::PhotoUrl => "Photo URL",
        }
    }

    /// Whether a header cell names this column.
    pub fn matches_title(self, cell: &str) -> bool {
        cell.trim().eq_ignore_ascii_case(self.title())
    }
}

pub fn header_titles() -> Vec<String> {
    Column::ALL.iter().map(|c| c.title().to_string()).collect()
}

pub fn is_blank_header(cells: &[String]) -> bool {
    cells.iter().all(|cell| cell.trim().is_empty())
}

/// Presentation applied to a freshly created header row.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct HeaderStyle {
    pub background: String,
    pub bold: bool,
    pub bordered: bool,
}

impl Default for HeaderStyle {
    fn default() -> Self {
        Self {
            background: "#f3f3f3".into(),
            bold: true,
            bordered: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_follow_canonical_order() {
        let titles = header_titles();
        assert_eq!(titles.len(), 9);
        assert_eq!(titles[0], "Employee ID");
        assert_eq!(titles[Column::Status.index()], "Status");
        assert_eq!(titles[8], "Photo URL");
    }

    #[test]
    fn blank_header_detection_ignores_whitespace() {
        assert!(is_blank_header(&[]));
        assert!(is_blank_header(&["".into(), "  ".into()]));
        assert!(!is_blank_header(&["".into(), "Status".into()]));
    }
}

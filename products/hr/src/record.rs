use serde::{Deserialize, Serialize};

use crate::schema::Column;

/// One row of the roster. Absent values are stored as empty strings.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Employee {
    pub emp_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub position: String,
    pub status: String,
    pub note: String,
    pub photo_url: String,
}

impl Employee {
    pub fn new(emp_id: impl Into<String>) -> Self {
        Self {
            emp_id: emp_id.into(),
            ..Self::default()
        }
    }

    pub fn from_row(row: &[String]) -> Self {
        let cell = |column: Column| row.get(column.index()).cloned().unwrap_or_default();
        Self {
            emp_id: cell(Column::EmpId),
            first_name: cell(Column::FirstName),
            last_name: cell(Column::LastName),
            phone: cell(Column::Phone),
            email: cell(Column::Email),
            position: cell(Column::Position),
            status: cell(Column::Status),
            note: cell(Column::Note),
            photo_url: cell(Column::PhotoUrl),
        }
    }

    pub fn to_row(&self) -> Vec<String> {
        Column::ALL
            .iter()
            .map(|column| self.field(*column).to_string())
            .collect()
    }

    pub fn field(&self, column: Column) -> &str {
        match column {
            Column::EmpId => &self.emp_id,
            Column::FirstName => &self.first_name,
            Column::LastName => &self.last_name,
            Column::Phone => &self.phone,
            Column::Email => &self.email,
            Column::Position => &self.position,
            Column::Status => &self.status,
            Column::Note => &self.note,
            Column::PhotoUrl => &self.photo_url,
        }
    }
}

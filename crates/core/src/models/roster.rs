//! Combined output rows written to the published spreadsheet.

use serde::Serialize;

/// One row of the combined student roster.
///
/// School and classroom names come from left joins and may be absent;
/// demographic fields come from the inner-joined student record.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StudentRosterRow {
    pub school_id: i64,
    pub school_name: Option<String>,
    pub classroom_id: i64,
    pub classroom_name: Option<String>,
    pub student_id: i64,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub dominant_language: Option<String>,
    pub ethnicity: Option<String>,
    pub grade: Option<String>,
    pub first_day: Option<String>,
    pub last_day: Option<String>,
    pub student_id_alt: Option<String>,
}

impl StudentRosterRow {
    /// Column header written as the first sheet row.
    pub fn header() -> Vec<String> {
        [
            "school_id",
            "school_name",
            "classroom_id",
            "classroom_name",
            "student_id",
            "first_name",
            "middle_name",
            "last_name",
            "birth_date",
            "gender",
            "dominant_language",
            "ethnicity",
            "grade",
            "first_day",
            "last_day",
            "student_id_alt",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    /// Flatten to sheet cells. Missing values become empty cells.
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.school_id.to_string(),
            cell(&self.school_name),
            self.classroom_id.to_string(),
            cell(&self.classroom_name),
            self.student_id.to_string(),
            self.first_name.clone(),
            cell(&self.middle_name),
            self.last_name.clone(),
            cell(&self.birth_date),
            cell(&self.gender),
            cell(&self.dominant_language),
            cell(&self.ethnicity),
            cell(&self.grade),
            cell(&self.first_day),
            cell(&self.last_day),
            cell(&self.student_id_alt),
        ]
    }
}

/// One row of the combined teacher roster.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TeacherRosterRow {
    pub school_name: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
}

impl TeacherRosterRow {
    /// Column header written as the first sheet row.
    pub fn header() -> Vec<String> {
        ["school_name", "first_name", "last_name", "email"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Flatten to sheet cells. Missing values become empty cells.
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            cell(&self.school_name),
            self.first_name.clone(),
            self.last_name.clone(),
            cell(&self.email),
        ]
    }
}

fn cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

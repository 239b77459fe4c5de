//! Wire-format structs for Transparent Classroom API responses.

use serde::Deserialize;

/// Entry from `GET /schools.json`. The listing mixes schools and the
/// enclosing network record.
#[derive(Debug, Clone, Deserialize)]
pub struct SchoolResponse {
    pub id: i64,
    pub name: String,
    #[serde(default, rename = "type")]
    pub type_: Option<String>,
}

/// Entry from `GET /sessions.json` (scoped to one school).
#[derive(Debug, Clone, Deserialize)]
pub struct SessionResponse {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub current_session: bool,
}

/// Entry from `GET /classrooms.json` (scoped to one school).
#[derive(Debug, Clone, Deserialize)]
pub struct ClassroomResponse {
    pub id: i64,
    pub name: String,
}

/// Entry from `GET /children.json` (scoped to one school, optionally to one
/// session). Doubles as the demographic record and, via `classroom_ids`,
/// the source of student-classroom enrollment rows.
#[derive(Debug, Clone, Deserialize)]
pub struct ChildResponse {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub dominant_language: Option<String>,
    #[serde(default)]
    pub ethnicity: Option<Vec<String>>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub first_day: Option<String>,
    #[serde(default)]
    pub last_day: Option<String>,
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub classroom_ids: Vec<i64>,
}

/// Entry from `GET /users.json` (scoped to one school).
#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Response from `GET /authenticate.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticateResponse {
    pub api_token: String,
}

pub mod models;

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::UpstreamConfig;
use crate::connectors::RosterSource;
use crate::error::{Result, SlateError};
use crate::models::{
    classroom::Classroom, enrollment::EnrollmentRecord, school::School, student::Student,
    teacher::Teacher,
};

use self::models::{
    AuthenticateResponse, ChildResponse, ClassroomResponse, SchoolResponse, SessionResponse,
    UserResponse,
};

const TOKEN_HEADER: &str = "X-TransparentClassroomToken";
const SCHOOL_HEADER: &str = "X-TransparentClassroomSchoolId";

/// HTTP client for the Transparent Classroom API.
///
/// Authenticates once (exchanging username/password for an API token unless
/// a token was supplied), then scopes data requests to a school via the
/// `X-TransparentClassroomSchoolId` header.
pub struct TransparentClassroomClient {
    base_url: String,
    username: Option<String>,
    password: Option<String>,
    http: Client,
    api_token: RwLock<Option<String>>,
}

impl TransparentClassroomClient {
    pub fn new(config: &UpstreamConfig) -> Self {
        Self {
            base_url: config.url_base.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
            http: Client::new(),
            api_token: RwLock::new(config.api_token.clone()),
        }
    }

    /// Override the base URL (for testing with wiremock).
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Exchange username/password for an API token. A no-op when a token is
    /// already held.
    pub async fn authenticate(&self) -> Result<()> {
        if self.api_token.read().await.is_some() {
            debug!("API token already present, skipping authentication");
            return Ok(());
        }

        let (username, password) = match (&self.username, &self.password) {
            (Some(u), Some(p)) => (u, p),
            _ => {
                return Err(SlateError::Auth(
                    "no API token and no username/password configured".into(),
                ));
            }
        };

        let url = format!("{}/authenticate.json", self.base_url);
        debug!(url = %url, "Authenticating with Transparent Classroom");

        let response = self
            .http
            .get(&url)
            .basic_auth(username, Some(password))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Authentication failed");
            return Err(SlateError::Auth(format!(
                "Transparent Classroom authentication failed with status {status}: {body}"
            )));
        }

        let auth: AuthenticateResponse = response
            .json()
            .await
            .map_err(|e| SlateError::Auth(format!("failed to parse authenticate response: {e}")))?;

        let mut token = self.api_token.write().await;
        *token = Some(auth.api_token);
        debug!("Transparent Classroom authentication successful");

        Ok(())
    }

    /// GET a JSON endpoint, optionally scoped to one school.
    ///
    /// `path_and_query` is relative to the base URL (e.g.
    /// `/children.json?session_id=7`).
    async fn get_json<T: DeserializeOwned>(
        &self,
        path_and_query: &str,
        school_id: Option<i64>,
    ) -> Result<T> {
        let token_guard = self.api_token.read().await;
        let token = token_guard.as_ref().ok_or_else(|| {
            SlateError::Auth("not authenticated; call authenticate() first".into())
        })?;
        let token = token.clone();
        drop(token_guard);

        let url = format!("{}{path_and_query}", self.base_url);
        debug!(url = %url, school_id, "Fetching");

        let mut request = self.http.get(&url).header(TOKEN_HEADER, &token);
        if let Some(id) = school_id {
            request = request.header(SCHOOL_HEADER, id.to_string());
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, path = %path_and_query, "API request failed");
            return Err(SlateError::Api(format!(
                "request to {path_and_query} failed with status {status}: {body}"
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SlateError::Api(format!("failed to parse {path_and_query} response: {e}")))
    }

    async fn fetch_sessions(&self, school_id: i64) -> Result<Vec<SessionResponse>> {
        self.get_json("/sessions.json", Some(school_id)).await
    }

    async fn fetch_children(
        &self,
        school_id: i64,
        session_id: Option<i64>,
    ) -> Result<Vec<ChildResponse>> {
        let path = match session_id {
            Some(id) => format!("/children.json?session_id={id}"),
            None => "/children.json".to_string(),
        };
        self.get_json(&path, Some(school_id)).await
    }
}

fn to_student(school_id: i64, child: ChildResponse) -> Student {
    Student {
        school_id,
        id: child.id,
        first_name: child.first_name,
        middle_name: child.middle_name,
        last_name: child.last_name,
        birth_date: child.birth_date,
        gender: child.gender,
        dominant_language: child.dominant_language,
        ethnicity: child.ethnicity.map(|e| e.join(", ")),
        grade: child.grade,
        first_day: child.first_day,
        last_day: child.last_day,
        student_id_alt: child.student_id,
    }
}

#[async_trait]
impl RosterSource for TransparentClassroomClient {
    async fn fetch_schools(&self) -> Result<Vec<School>> {
        let entries: Vec<SchoolResponse> = self.get_json("/schools.json", None).await?;
        // The listing includes the enclosing network record; only actual
        // schools carry roster data.
        Ok(entries
            .into_iter()
            .filter(|s| s.type_.as_deref() != Some("Network"))
            .map(|s| School {
                id: s.id,
                name: s.name,
            })
            .collect())
    }

    async fn fetch_enrollments(
        &self,
        school_ids: &[i64],
        only_current: bool,
    ) -> Result<Vec<EnrollmentRecord>> {
        let pulled_at = Utc::now();
        let mut records = Vec::new();

        for &school_id in school_ids {
            let sessions = self.fetch_sessions(school_id).await?;
            for session in sessions {
                if only_current && !session.current_session {
                    continue;
                }
                let children = self.fetch_children(school_id, Some(session.id)).await?;
                for child in children {
                    for classroom_id in &child.classroom_ids {
                        records.push(EnrollmentRecord {
                            school_id,
                            session_id: session.id,
                            student_id: child.id,
                            classroom_id: *classroom_id,
                            pulled_at,
                        });
                    }
                }
            }
        }

        Ok(records)
    }

    async fn fetch_classrooms(&self, school_ids: &[i64]) -> Result<Vec<Classroom>> {
        let mut classrooms = Vec::new();
        for &school_id in school_ids {
            let entries: Vec<ClassroomResponse> =
                self.get_json("/classrooms.json", Some(school_id)).await?;
            classrooms.extend(entries.into_iter().map(|c| Classroom {
                school_id,
                id: c.id,
                name: c.name,
            }));
        }
        Ok(classrooms)
    }

    async fn fetch_students(
        &self,
        school_ids: &[i64],
        only_current: bool,
    ) -> Result<Vec<Student>> {
        // Without a session id the API returns the current roster; pulling
        // every session (deduplicated) covers past students too.
        let mut students: BTreeMap<(i64, i64), Student> = BTreeMap::new();

        for &school_id in school_ids {
            if only_current {
                let children = self.fetch_children(school_id, None).await?;
                for child in children {
                    students
                        .entry((school_id, child.id))
                        .or_insert_with(|| to_student(school_id, child));
                }
            } else {
                let sessions = self.fetch_sessions(school_id).await?;
                for session in sessions {
                    let children = self.fetch_children(school_id, Some(session.id)).await?;
                    for child in children {
                        students
                            .entry((school_id, child.id))
                            .or_insert_with(|| to_student(school_id, child));
                    }
                }
            }
        }

        Ok(students.into_values().collect())
    }

    async fn fetch_teachers(&self, school_ids: &[i64]) -> Result<Vec<Teacher>> {
        let mut teachers = Vec::new();
        for &school_id in school_ids {
            let users: Vec<UserResponse> =
                self.get_json("/users.json?roles[]=teacher", Some(school_id)).await?;
            teachers.extend(
                users
                    .into_iter()
                    .filter(|u| u.roles.iter().any(|r| r == "teacher"))
                    .map(|u| Teacher {
                        school_id,
                        first_name: u.first_name,
                        last_name: u.last_name,
                        email: u.email,
                    }),
            );
        }
        Ok(teachers)
    }

    async fn test_connection(&self) -> Result<()> {
        self.authenticate().await?;
        let _: Vec<SchoolResponse> = self.get_json("/schools.json", None).await?;
        Ok(())
    }
}

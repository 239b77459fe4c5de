//! Publish combined roster tables into a new, shared spreadsheet.

use tracing::info;

use slate_core::error::Result;
use slate_core::models::roster::{StudentRosterRow, TeacherRosterRow};

use crate::client::SheetsClient;

pub const STUDENTS_SHEET: &str = "Students";
pub const TEACHERS_SHEET: &str = "Teachers";

/// Creates, shares, and populates the destination spreadsheet.
///
/// There is no partial-success recovery: a spreadsheet may be created and
/// shared but left unpopulated when a later write fails.
pub struct RosterPublisher {
    client: SheetsClient,
}

impl RosterPublisher {
    pub fn new(client: SheetsClient) -> Self {
        Self { client }
    }

    /// Publish both tables and return the new spreadsheet identifier.
    pub async fn publish(
        &self,
        students: &[StudentRosterRow],
        teachers: &[TeacherRosterRow],
        spreadsheet_name: &str,
        recipient_email: &str,
    ) -> Result<String> {
        info!(spreadsheet_name, "Creating spreadsheet");
        let spreadsheet_id = self.client.create_spreadsheet(spreadsheet_name).await?;

        info!(spreadsheet_id = %spreadsheet_id, recipient_email, "Sharing spreadsheet");
        self.client
            .share_with_writer(&spreadsheet_id, recipient_email)
            .await?;

        info!(rows = students.len(), "Writing student roster");
        self.client
            .write_table(
                &spreadsheet_id,
                STUDENTS_SHEET,
                StudentRosterRow::header(),
                students.iter().map(|r| r.to_cells()).collect(),
            )
            .await?;

        info!(rows = teachers.len(), "Writing teacher roster");
        self.client
            .write_table(
                &spreadsheet_id,
                TEACHERS_SHEET,
                TeacherRosterRow::header(),
                teachers.iter().map(|r| r.to_cells()).collect(),
            )
            .await?;

        info!(spreadsheet_id = %spreadsheet_id, "Publish complete");
        Ok(spreadsheet_id)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn student_row() -> StudentRosterRow {
        StudentRosterRow {
            school_id: 1,
            school_name: Some("Sunshine".to_string()),
            classroom_id: 10,
            classroom_name: Some("Room A".to_string()),
            student_id: 100,
            first_name: "Ada".to_string(),
            middle_name: None,
            last_name: "Lee".to_string(),
            birth_date: Some("2019-04-02".to_string()),
            gender: None,
            dominant_language: None,
            ethnicity: None,
            grade: None,
            first_day: None,
            last_day: None,
            student_id_alt: None,
        }
    }

    fn teacher_row() -> TeacherRosterRow {
        TeacherRosterRow {
            school_name: Some("Sunshine".to_string()),
            first_name: "Grace".to_string(),
            last_name: "Adams".to_string(),
            email: Some("gadams@sunshine.edu".to_string()),
        }
    }

    async fn mount_happy_path(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/v4/spreadsheets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "spreadsheetId": "sheet-id-9"
            })))
            .expect(1)
            .mount(server)
            .await;

        Mock::given(method("POST"))
            .and(path("/drive/v3/files/sheet-id-9/permissions"))
            .and(query_param("sendNotificationEmail", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "perm-1"
            })))
            .expect(1)
            .mount(server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v4/spreadsheets/sheet-id-9:batchUpdate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(2)
            .mount(server)
            .await;

        for sheet in ["Students", "Teachers"] {
            Mock::given(method("POST"))
                .and(path(format!(
                    "/v4/spreadsheets/sheet-id-9/values/{sheet}:clear"
                )))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
                .expect(1)
                .mount(server)
                .await;
        }

        Mock::given(method("PUT"))
            .and(path("/v4/spreadsheets/sheet-id-9/values/Students!A1"))
            .and(body_string_contains("Lee"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/v4/spreadsheets/sheet-id-9/values/Teachers!A1"))
            .and(body_string_contains("Adams"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(server)
            .await;
    }

    fn publisher_for(server: &MockServer) -> RosterPublisher {
        RosterPublisher::new(
            SheetsClient::new("test-token")
                .with_sheets_base_url(&server.uri())
                .with_drive_base_url(&server.uri()),
        )
    }

    #[tokio::test]
    async fn publish_creates_shares_and_writes_both_sheets() {
        let server = MockServer::start().await;
        mount_happy_path(&server).await;

        let publisher = publisher_for(&server);
        let id = publisher
            .publish(
                &[student_row()],
                &[teacher_row()],
                "rosters_current_20260823_060000",
                "ops@school.edu",
            )
            .await
            .unwrap();
        assert_eq!(id, "sheet-id-9");
    }

    #[tokio::test]
    async fn publish_empty_tables_still_writes_headers() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v4/spreadsheets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "spreadsheetId": "sheet-id-9"
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/drive/v3/files/sheet-id-9/permissions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v4/spreadsheets/sheet-id-9:batchUpdate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        for sheet in ["Students", "Teachers"] {
            Mock::given(method("POST"))
                .and(path(format!(
                    "/v4/spreadsheets/sheet-id-9/values/{sheet}:clear"
                )))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
                .mount(&server)
                .await;
        }

        // Header rows are written even with no data rows.
        Mock::given(method("PUT"))
            .and(path("/v4/spreadsheets/sheet-id-9/values/Students!A1"))
            .and(body_string_contains("school_name"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/v4/spreadsheets/sheet-id-9/values/Teachers!A1"))
            .and(body_string_contains("email"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let publisher = publisher_for(&server);
        let id = publisher
            .publish(&[], &[], "rosters_current_20260823_060000", "ops@school.edu")
            .await
            .unwrap();
        assert_eq!(id, "sheet-id-9");
    }

    #[tokio::test]
    async fn write_failure_propagates_after_share() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v4/spreadsheets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "spreadsheetId": "sheet-id-9"
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/drive/v3/files/sheet-id-9/permissions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v4/spreadsheets/sheet-id-9:batchUpdate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
            .mount(&server)
            .await;

        let publisher = publisher_for(&server);
        let err = publisher
            .publish(
                &[student_row()],
                &[teacher_row()],
                "rosters",
                "ops@school.edu",
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("500"));
    }
}

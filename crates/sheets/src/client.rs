//! Typed reqwest wrapper for the Google Sheets v4 and Drive v3 APIs.

use reqwest::StatusCode;
use tracing::debug;

use slate_core::error::{Result, SlateError};

use crate::models::{
    AddSheetRequest, BatchUpdateRequest, CreateSpreadsheetRequest, DrivePermission, SheetProperties,
    SheetRequest, Spreadsheet, SpreadsheetProperties, ValueRange,
};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";
const DRIVE_API_BASE: &str = "https://www.googleapis.com";

/// HTTP client for spreadsheet creation, sharing, and cell writes.
pub struct SheetsClient {
    http: reqwest::Client,
    sheets_base: String,
    drive_base: String,
    auth_token: String,
}

impl SheetsClient {
    /// Create a new client with the given bearer token.
    pub fn new(auth_token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            sheets_base: SHEETS_API_BASE.to_string(),
            drive_base: DRIVE_API_BASE.to_string(),
            auth_token: auth_token.to_string(),
        }
    }

    /// Override the Sheets API base URL (for testing with wiremock).
    pub fn with_sheets_base_url(mut self, url: &str) -> Self {
        self.sheets_base = url.to_string();
        self
    }

    /// Override the Drive API base URL (for testing with wiremock).
    pub fn with_drive_base_url(mut self, url: &str) -> Self {
        self.drive_base = url.to_string();
        self
    }

    fn spreadsheets_url(&self) -> String {
        format!("{}/v4/spreadsheets", self.sheets_base)
    }

    fn values_url(&self, spreadsheet_id: &str, range: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.sheets_base, spreadsheet_id, range
        )
    }

    /// Create a new spreadsheet and return its generated identifier.
    pub async fn create_spreadsheet(&self, title: &str) -> Result<String> {
        let body = CreateSpreadsheetRequest {
            properties: SpreadsheetProperties {
                title: title.to_string(),
            },
        };

        let resp = self
            .http
            .post(self.spreadsheets_url())
            .bearer_auth(&self.auth_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| SlateError::Sheets(format!("create spreadsheet request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(SlateError::Sheets(format!(
                "create spreadsheet failed ({status}): {body}"
            )));
        }

        let sheet = resp
            .json::<Spreadsheet>()
            .await
            .map_err(|e| SlateError::Sheets(format!("create spreadsheet parse failed: {e}")))?;
        Ok(sheet.spreadsheet_id)
    }

    /// Grant the recipient writer access, sending a notification email.
    pub async fn share_with_writer(&self, spreadsheet_id: &str, email: &str) -> Result<()> {
        let url = format!(
            "{}/drive/v3/files/{}/permissions",
            self.drive_base, spreadsheet_id
        );
        let permission = DrivePermission {
            type_: "user".to_string(),
            role: "writer".to_string(),
            email_address: email.to_string(),
        };

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.auth_token)
            .query(&[("sendNotificationEmail", "true")])
            .json(&permission)
            .send()
            .await
            .map_err(|e| SlateError::Sheets(format!("share request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(SlateError::Sheets(format!(
                "share failed ({status}): {body}"
            )));
        }

        Ok(())
    }

    /// Add a named sheet to the spreadsheet. A 400 is treated as the sheet
    /// already existing.
    pub async fn add_sheet(&self, spreadsheet_id: &str, title: &str) -> Result<()> {
        let url = format!("{}/{}:batchUpdate", self.spreadsheets_url(), spreadsheet_id);
        let body = BatchUpdateRequest {
            requests: vec![SheetRequest {
                add_sheet: Some(AddSheetRequest {
                    properties: SheetProperties {
                        title: title.to_string(),
                    },
                }),
            }],
        };

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.auth_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| SlateError::Sheets(format!("add sheet request failed: {e}")))?;

        if resp.status() == StatusCode::BAD_REQUEST {
            debug!(title, "add sheet returned 400, assuming sheet exists");
            return Ok(());
        }

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(SlateError::Sheets(format!(
                "add sheet failed ({status}): {body}"
            )));
        }

        Ok(())
    }

    /// Clear all values in a range.
    pub async fn clear_values(&self, spreadsheet_id: &str, range: &str) -> Result<()> {
        let url = format!("{}:clear", self.values_url(spreadsheet_id, range));

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.auth_token)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| SlateError::Sheets(format!("clear values request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(SlateError::Sheets(format!(
                "clear values failed ({status}): {body}"
            )));
        }

        Ok(())
    }

    /// Write raw values starting at a range.
    pub async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: Vec<Vec<String>>,
    ) -> Result<()> {
        let url = self.values_url(spreadsheet_id, range);
        let body = ValueRange {
            range: Some(range.to_string()),
            major_dimension: Some("ROWS".to_string()),
            values,
        };

        let resp = self
            .http
            .put(&url)
            .bearer_auth(&self.auth_token)
            .query(&[("valueInputOption", "RAW")])
            .json(&body)
            .send()
            .await
            .map_err(|e| SlateError::Sheets(format!("update values request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(SlateError::Sheets(format!(
                "update values failed ({status}): {body}"
            )));
        }

        Ok(())
    }

    /// Write a header plus data rows to a named sheet, fully replacing its
    /// previous content.
    pub async fn write_table(
        &self,
        spreadsheet_id: &str,
        sheet: &str,
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<()> {
        self.add_sheet(spreadsheet_id, sheet).await?;

        // Clearing by bare sheet name covers the whole sheet; a cell range
        // would leave old rows behind when the new table is shorter.
        self.clear_values(spreadsheet_id, sheet).await?;

        let mut values = Vec::with_capacity(rows.len() + 1);
        values.push(header);
        values.extend(rows);
        self.update_values(spreadsheet_id, &format!("{sheet}!A1"), values)
            .await
    }
}

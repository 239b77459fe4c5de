//! Google Sheets and Drive API request/response structs.

use serde::{Deserialize, Serialize};

/// Spreadsheet-level properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetProperties {
    pub title: String,
}

/// A spreadsheet resource as returned by the Sheets API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spreadsheet {
    pub spreadsheet_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<SpreadsheetProperties>,
}

/// Body for creating a spreadsheet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpreadsheetRequest {
    pub properties: SpreadsheetProperties,
}

/// A Drive permission granting a user access to a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrivePermission {
    #[serde(rename = "type")]
    pub type_: String,
    pub role: String,
    pub email_address: String,
}

/// A block of cell values for a range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    pub values: Vec<Vec<String>>,
}

/// Sheet-level properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub title: String,
}

/// `addSheet` request entry for a spreadsheet batchUpdate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSheetRequest {
    pub properties: SheetProperties,
}

/// One entry in a batchUpdate request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_sheet: Option<AddSheetRequest>,
}

/// Body for a spreadsheet batchUpdate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateRequest {
    pub requests: Vec<SheetRequest>,
}

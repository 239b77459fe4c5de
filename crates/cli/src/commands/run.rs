//! The `run` command: the one-shot fetch-and-publish handler.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use slate_core::config::Config;
use slate_core::connectors::transparent_classroom::TransparentClassroomClient;
use slate_core::error::Result;
use slate_core::roster::fetch_rosters;
use slate_sheets::auth::authenticate;
use slate_sheets::client::SheetsClient;
use slate_sheets::publisher::RosterPublisher;

/// HTTP-style response returned to the invoking runtime.
#[derive(Debug, Serialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

pub async fn run(event_json: Option<&str>, include_inactive: bool) -> anyhow::Result<()> {
    let config = Config::from_env();
    config.validate()?;

    let event: Value = match event_json {
        Some(raw) => serde_json::from_str(raw)?,
        None => Value::Null,
    };

    let response = handle(&config, event, !include_inactive).await?;
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

/// Fetch both roster tables and publish them to a new spreadsheet named
/// after the invocation timestamp. Returns the response payload.
pub async fn handle(config: &Config, event: Value, only_current: bool) -> Result<HandlerResponse> {
    let timestamp = Utc::now();

    let client = TransparentClassroomClient::new(&config.upstream);
    client.authenticate().await?;

    let (students, teachers) = fetch_rosters(&client, only_current).await?;

    let spreadsheet_name = spreadsheet_name(&config.spreadsheet_name_base, only_current, timestamp);
    info!(spreadsheet_name, "Publishing rosters");

    let auth = authenticate(&config.service_account).await?;
    let publisher = RosterPublisher::new(SheetsClient::new(auth.token()));
    let spreadsheet_id = publisher
        .publish(&students, &teachers, &spreadsheet_name, &config.recipient_email)
        .await?;

    info!(spreadsheet_id = %spreadsheet_id, "Rosters stored");

    let body = serde_json::json!({
        "message": format!("Success. Data stored in spreadsheet {spreadsheet_id}"),
        "input": event,
    });

    Ok(HandlerResponse {
        status_code: 200,
        body: body.to_string(),
    })
}

fn spreadsheet_name(base: &str, only_current: bool, timestamp: DateTime<Utc>) -> String {
    let scope = if only_current { "current" } else { "all" };
    format!("{base}_{scope}_{}", timestamp.format("%Y%m%d_%H%M%S"))
}

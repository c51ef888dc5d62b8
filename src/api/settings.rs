//! Settings API endpoints

use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use crate::snippet::DEFAULT_SHEET_NAME;
use crate::snippet::SpreadsheetSettings;
use crate::storage::Storage;

use super::Error;
use super::Form;
use super::Operator;
use super::Success;

/// Get the current spreadsheet settings
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:6000/api/settings/spreadsheet
/// ```
pub async fn spreadsheet(
    Extension(storage): Extension<Storage>,
    _operator: Operator,
) -> Result<Success<SpreadsheetSettings>, Error> {
    Ok(Success::ok(storage.find_spreadsheet_settings().await))
}

/// Spreadsheet settings form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetSettingsForm {
    /// API key with read access
    api_key: String,

    /// Spreadsheet ID
    spreadsheet_id: String,

    /// Sheet name, `Links` when not provided
    sheet_name: Option<String>,
}

/// Response of saving the settings
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSettingsResponse {
    /// The saved settings
    pub settings: SpreadsheetSettings,

    /// Number of templates with a regenerated snippet
    pub regenerated_scripts: usize,
}

/// Save the spreadsheet settings based on the
/// [`SpreadsheetSettingsForm`](SpreadsheetSettingsForm) form
///
/// The snippets of all templates are regenerated with the new settings
///
/// Request:
/// ```sh
/// curl -v -XPUT -H 'Content-Type: application/json' \
///     -H 'Authorization: Bearer tokentokentoken' \
///     -d '{ "apiKey": "key", "spreadsheetId": "id", "sheetName": "Links" }' \
///     http://localhost:6000/api/settings/spreadsheet
/// ```
pub async fn save_spreadsheet(
    Extension(storage): Extension<Storage>,
    _operator: Operator,
    Form(form): Form<SpreadsheetSettingsForm>,
) -> Result<Success<SavedSettingsResponse>, Error> {
    let settings = SpreadsheetSettings {
        api_key: form.api_key.trim().to_string(),
        spreadsheet_id: form.spreadsheet_id.trim().to_string(),
        sheet_name: form
            .sheet_name
            .map(|sheet_name| sheet_name.trim().to_string())
            .filter(|sheet_name| !sheet_name.is_empty())
            .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string()),
    };

    let regenerated_scripts = storage.save_spreadsheet_settings(settings.clone()).await?;

    tracing::info!("Spreadsheet settings saved, {regenerated_scripts} snippets regenerated");

    Ok(Success::ok(SavedSettingsResponse {
        settings,
        regenerated_scripts,
    }))
}

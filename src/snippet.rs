//! Validation snippets
//!
//! A snippet is a `<script>` block to embed on the registration page a template points to. On
//! page load it reads the `token` query parameter and looks it up in the spreadsheet the links
//! are recorded in. The registration form (`.formreg`) is only shown for a token whose row is
//! still `new`, otherwise the fallback text (`.textreg`) is shown.

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;
use serde::Deserialize;
use serde::Serialize;

use crate::storage::ValidationError;
use crate::templates::Template;

/// Sheet used when none is configured
pub const DEFAULT_SHEET_NAME: &str = "Links";

/// Base of the spreadsheet values endpoint
const SPREADSHEET_VALUES_ENDPOINT: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Characters escaped in a single URL path segment or query value
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const SCRIPT_TEMPLATE: &str = r#"<script>
// reglinks template __TEMPLATE_ID__
(function() {
  const VALUES_URL = __VALUES_URL__;

  function getTokenFromUrl() {
    const params = new URLSearchParams(window.location.search);
    return params.get('token');
  }

  async function isTokenNew(token) {
    try {
      const response = await fetch(VALUES_URL);
      const data = await response.json();

      if (!data.values) return false;

      for (const row of data.values) {
        if (row[0] && String(row[0]).includes(token) && row[1] === 'new') {
          return true;
        }
      }
      return false;
    } catch (error) {
      console.error('Token check failed:', error);
      return false;
    }
  }

  async function init() {
    const token = getTokenFromUrl();
    const formBlock = document.querySelector('.formreg');
    const textBlock = document.querySelector('.textreg');

    if (!formBlock) {
      console.warn('Block .formreg not found');
      return;
    }

    if (!token) {
      formBlock.style.display = 'none';
      if (textBlock) textBlock.style.display = 'none';
      return;
    }

    const isValid = await isTokenNew(token);
    formBlock.style.display = isValid ? 'block' : 'none';
    if (textBlock) textBlock.style.display = isValid ? 'none' : 'block';
  }

  if (document.readyState === 'loading') {
    document.addEventListener('DOMContentLoaded', init);
  } else {
    init();
  }
})();
</script>"#;

/// Connection parameters of the spreadsheet links are recorded in
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetSettings {
    /// API key with read access to the spreadsheet
    pub api_key: String,

    /// Spreadsheet ID
    pub spreadsheet_id: String,

    /// Sheet holding the links, column A the link and column B the status
    pub sheet_name: String,
}

impl SpreadsheetSettings {
    /// Check the settings are usable for a snippet
    ///
    /// # Errors
    ///
    /// Will return `Err` when the API key or spreadsheet ID is empty
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.trim().is_empty() {
            return Err(ValidationError::Required("apiKey"));
        }

        if self.spreadsheet_id.trim().is_empty() {
            return Err(ValidationError::Required("spreadsheetId"));
        }

        Ok(())
    }

    /// Sheet name, falling back to the default one
    fn sheet_name(&self) -> &str {
        let sheet_name = self.sheet_name.trim();

        if sheet_name.is_empty() {
            DEFAULT_SHEET_NAME
        } else {
            sheet_name
        }
    }

    /// URL reading all values of the sheet
    pub fn values_url(&self) -> String {
        format!(
            "{SPREADSHEET_VALUES_ENDPOINT}/{}/values/{}?key={}",
            utf8_percent_encode(self.spreadsheet_id.trim(), COMPONENT),
            utf8_percent_encode(self.sheet_name(), COMPONENT),
            utf8_percent_encode(self.api_key.trim(), COMPONENT),
        )
    }
}

/// Generate the validation snippet for a template
///
/// Returns `None` when the settings are incomplete, a snippet without them would never show the
/// form
pub fn generate(settings: &SpreadsheetSettings, template: &Template) -> Option<String> {
    if settings.validate().is_err() {
        tracing::debug!(
            "Spreadsheet settings incomplete, no snippet for template {}",
            template.id
        );

        return None;
    }

    let script = SCRIPT_TEMPLATE
        .replace("__TEMPLATE_ID__", &template.id.to_string())
        .replace("__VALUES_URL__", &js_string(&settings.values_url()));

    Some(script)
}

/// Encode a value as a JavaScript string literal that is safe inside a `<script>` block
fn js_string(value: &str) -> String {
    // a JSON string is a valid JavaScript string literal
    serde_json::Value::from(value)
        .to_string()
        .replace("</", "<\\/")
}

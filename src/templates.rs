//! Templates

use chrono::NaiveDateTime;
use uuid::Uuid;

/// A named URL prefix used to mint links
#[derive(Clone, Debug)]
pub struct Template {
    /// Template ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// URL prefix the token is appended to
    pub base_url: String,

    /// Validation snippet, available once the spreadsheet settings are complete
    pub script: Option<String>,

    /// Creation date, local time
    pub created_at: NaiveDateTime,
}

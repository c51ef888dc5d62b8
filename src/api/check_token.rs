//! Token check endpoint
//!
//! Public, called from the registration pages to decide whether to show the form

use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use crate::storage::Storage;
use crate::token::extract_token;

use super::Error;
use super::QueryParameters;
use super::Success;

/// Query of the token check
#[derive(Debug, Deserialize)]
pub struct CheckTokenQuery {
    /// Token from the registration link
    token: Option<String>,

    /// The full registration link, used when the token is missing or empty
    link: Option<String>,
}

/// Result of the token check
#[derive(Debug, Serialize)]
pub struct CheckTokenResponse {
    /// Does the token belong to a link that is still `new`
    pub valid: bool,

    /// The checked token
    pub token: String,
}

/// Check a token against the ledger
///
/// Request:
/// ```sh
/// curl -v 'http://localhost:6000/api/check-token?token=<token>'
/// ```
///
/// Or with the full link, URL encoded:
/// ```sh
/// curl -v 'http://localhost:6000/api/check-token?link=https%3A%2F%2Fx.test%2Fr%3Ftoken%3D<token>'
/// ```
///
/// Response:
/// ```json
/// { "data": { "valid": true, "token": "<token>" } }
/// ```
pub async fn check(
    Extension(storage): Extension<Storage>,
    QueryParameters(query): QueryParameters<CheckTokenQuery>,
) -> Result<Success<CheckTokenResponse>, Error> {
    let token = query
        .token
        .filter(|token| !token.trim().is_empty())
        .or_else(|| query.link.as_deref().and_then(extract_token))
        .unwrap_or_default();

    let valid = storage.check_token(&token).await?;

    tracing::debug!("Token {token} checked, valid: {valid}");

    Ok(Success::ok(CheckTokenResponse {
        valid,
        token: token.trim().to_string(),
    }))
}

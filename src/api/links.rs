//! Links API endpoints
//!
//! Issuing links from a template and keeping track of them

use axum::Extension;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::links::GeneratedLink;
use crate::links::LinkStats;
use crate::links::LinkStatus;
use crate::storage::Storage;
use crate::storage::UpdateLinkValues;
use crate::sync::Recorder;
use crate::sync::SyncError;
use crate::utils::format_timestamp;

use super::Error;
use super::Form;
use super::Operator;
use super::PathParameters;
use super::QueryParameters;
use super::Success;
use super::templates::fetch_template;

/// Link response going to the user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    /// Link ID
    pub id: Uuid,

    /// Template the link was minted from
    pub template_id: Uuid,

    /// Name of the template at the time of minting
    pub template_name: String,

    /// The token of the link
    pub token: String,

    /// Base URL of the template followed by the token
    pub full_url: String,

    /// `new` or `used`
    pub status: LinkStatus,

    /// Creation date, `YYYY-MM-DD HH:MM`
    pub created_at: String,
}

impl LinkResponse {
    /// Create a response from a [`GeneratedLink`](GeneratedLink)
    fn from_link(link: GeneratedLink) -> Self {
        Self {
            id: link.id,
            template_id: link.template_id,
            template_name: link.template_name,
            token: link.token,
            full_url: link.full_url,
            status: link.status,
            created_at: format_timestamp(&link.created_at),
        }
    }

    /// Create a response from multiple [`GeneratedLink`](GeneratedLink)s
    fn from_link_multiple(links: Vec<GeneratedLink>) -> Vec<Self> {
        links.into_iter().map(Self::from_link).collect()
    }
}

/// Outcome of recording a new link externally
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum SyncOutcome {
    /// The recording endpoint accepted the link
    Recorded,

    /// No recording endpoint is configured
    Skipped,

    /// Recording failed, the link is kept anyway
    Failed {
        /// What went wrong
        error: String,
    },
}

impl SyncOutcome {
    fn from_result(result: Result<(), SyncError>) -> Self {
        match result {
            Ok(()) => SyncOutcome::Recorded,
            Err(err) => SyncOutcome::Failed {
                error: err.to_string(),
            },
        }
    }
}

/// Response of issuing a link
#[derive(Debug, Serialize)]
pub struct IssuedLinkResponse {
    /// The new link, stored regardless of the sync outcome
    pub link: LinkResponse,

    /// Outcome of recording the link externally
    pub sync: SyncOutcome,
}

/// Issue a new link from a template
///
/// The link is stored first, then recorded at the sync endpoint. A failed recording is reported
/// in `sync` but does not undo the link.
///
/// Request:
/// ```sh
/// curl -v -XPOST -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:6000/api/templates/<uuid>/links
/// ```
///
/// Response:
/// ```json
/// { "data": { "link": { "id": "<uuid>", "fullUrl": "https://x.test/r?token=<token>" ... },
///             "sync": { "status": "recorded" } } }
/// ```
pub async fn issue(
    Extension(storage): Extension<Storage>,
    Extension(recorder): Extension<Recorder>,
    _operator: Operator,
    PathParameters(template_id): PathParameters<Uuid>,
) -> Result<Success<IssuedLinkResponse>, Error> {
    let template = fetch_template(&storage, &template_id).await?;

    let link = storage
        .issue_link(&template)
        .await
        .ok_or_else(|| Error::not_found("Template not found"))?;

    tracing::info!(r#"Link issued for template "{}""#, template.name);

    let sync = match recorder.spawn_record(link.clone()) {
        Some(task) => {
            let result = task.await.unwrap_or_else(|err| Err(SyncError::from(err)));

            SyncOutcome::from_result(result)
        }
        None => SyncOutcome::Skipped,
    };

    Ok(Success::created(IssuedLinkResponse {
        link: LinkResponse::from_link(link),
        sync,
    }))
}

/// Filters for the links list
#[derive(Debug, Deserialize)]
pub struct ListLinksQuery {
    /// Only links with this status
    status: Option<LinkStatus>,
}

/// List all links, most recent first
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer tokentokentoken' \
///     'http://localhost:6000/api/links?status=new'
/// ```
pub async fn list(
    Extension(storage): Extension<Storage>,
    _operator: Operator,
    QueryParameters(query): QueryParameters<ListLinksQuery>,
) -> Result<Success<Vec<LinkResponse>>, Error> {
    let links = storage.find_all_links(query.status).await;

    Ok(Success::ok(LinkResponse::from_link_multiple(links)))
}

/// Counts of all links by status
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:6000/api/links/stats
/// ```
///
/// Response:
/// ```json
/// { "data": { "total": 3, "new": 2, "used": 1 } }
/// ```
pub async fn stats(
    Extension(storage): Extension<Storage>,
    _operator: Operator,
) -> Result<Success<LinkStats>, Error> {
    Ok(Success::ok(storage.link_stats().await))
}

/// Get a single link
pub async fn single(
    Extension(storage): Extension<Storage>,
    _operator: Operator,
    PathParameters(link_id): PathParameters<Uuid>,
) -> Result<Success<LinkResponse>, Error> {
    fetch_link(&storage, &link_id)
        .await
        .map(|link| Success::ok(LinkResponse::from_link(link)))
}

/// Update link form
#[derive(Debug, Deserialize)]
pub struct UpdateLinkForm {
    /// New status, `new` (or `active`) or `used`
    status: LinkStatus,
}

/// Update the status of a link based on the [`UpdateLinkForm`](UpdateLinkForm) form
///
/// Request:
/// ```sh
/// curl -v -XPATCH -H 'Content-Type: application/json' \
///     -H 'Authorization: Bearer tokentokentoken' \
///     -d '{ "status": "used" }' \
///     http://localhost:6000/api/links/<uuid>
/// ```
pub async fn update(
    Extension(storage): Extension<Storage>,
    _operator: Operator,
    PathParameters(link_id): PathParameters<Uuid>,
    Form(form): Form<UpdateLinkForm>,
) -> Result<Success<LinkResponse>, Error> {
    let link = fetch_link(&storage, &link_id).await?;

    let values = UpdateLinkValues {
        status: form.status,
    };

    let updated_link = storage
        .update_link(&link, &values)
        .await
        .ok_or_else(|| Error::not_found("Link not found"))?;

    tracing::info!("Link {} marked {}", updated_link.id, updated_link.status.as_str());

    Ok(Success::ok(LinkResponse::from_link(updated_link)))
}

/// Fetch link from storage
async fn fetch_link(storage: &Storage, link_id: &Uuid) -> Result<GeneratedLink, Error> {
    storage
        .find_single_link_by_id(link_id)
        .await
        .ok_or_else(|| Error::not_found("Link not found"))
}

//! Templates API endpoints
//!
//! Everything related to the template management

use axum::Extension;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::storage::CreateTemplateValues;
use crate::storage::Storage;
use crate::templates::Template;
use crate::utils::format_timestamp;

use super::Error;
use super::Form;
use super::Operator;
use super::PathParameters;
use super::Success;

/// Template response going to the user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateResponse {
    /// Template ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// URL prefix the tokens are appended to
    pub base_url: String,

    /// Whether a validation snippet is available
    pub has_script: bool,

    /// Creation date, `YYYY-MM-DD HH:MM`
    pub created_at: String,
}

impl TemplateResponse {
    /// Create a response from a [`Template`](Template)
    fn from_template(template: Template) -> Self {
        Self {
            id: template.id,
            has_script: template.script.is_some(),
            created_at: format_timestamp(&template.created_at),
            name: template.name,
            base_url: template.base_url,
        }
    }

    /// Create a response from multiple [`Template`](Template)s
    fn from_template_multiple(templates: Vec<Template>) -> Vec<Self> {
        templates.into_iter().map(Self::from_template).collect()
    }
}

/// Script response going to the user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptResponse {
    /// Template ID
    pub template_id: Uuid,

    /// The snippet, `null` until the spreadsheet settings are complete
    pub script: Option<String>,
}

/// List all templates, most recent first
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:6000/api/templates
/// ```
///
/// Response:
/// ```json
/// { "data": [ { "id": "<uuid>", "name": "Demo", "baseUrl": "https://x.test/r?token=" ... } ] }
/// ```
pub async fn list(
    Extension(storage): Extension<Storage>,
    _operator: Operator,
) -> Result<Success<Vec<TemplateResponse>>, Error> {
    let templates = storage.find_all_templates().await;

    Ok(Success::ok(TemplateResponse::from_template_multiple(
        templates,
    )))
}

/// Get a single template
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:6000/api/templates/<uuid>
/// ```
pub async fn single(
    Extension(storage): Extension<Storage>,
    _operator: Operator,
    PathParameters(template_id): PathParameters<Uuid>,
) -> Result<Success<TemplateResponse>, Error> {
    fetch_template(&storage, &template_id)
        .await
        .map(|template| Success::ok(TemplateResponse::from_template(template)))
}

/// Get the validation snippet of a single template
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:6000/api/templates/<uuid>/script
/// ```
///
/// Response:
/// ```json
/// { "data": { "templateId": "<uuid>", "script": "<script>..." } }
/// ```
pub async fn script(
    Extension(storage): Extension<Storage>,
    _operator: Operator,
    PathParameters(template_id): PathParameters<Uuid>,
) -> Result<Success<ScriptResponse>, Error> {
    let template = fetch_template(&storage, &template_id).await?;

    Ok(Success::ok(ScriptResponse {
        template_id: template.id,
        script: template.script,
    }))
}

/// Create template form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateForm {
    /// Display name, stored as given
    name: String,

    /// URL prefix the tokens are appended to, usually ending in `?token=`
    base_url: String,
}

/// Create a template based on the [`CreateTemplateForm`](CreateTemplateForm) form
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -H 'Authorization: Bearer tokentokentoken' \
///     -d '{ "name": "Demo", "baseUrl": "https://x.test/r?token=" }' \
///     http://localhost:6000/api/templates
/// ```
pub async fn create(
    Extension(storage): Extension<Storage>,
    _operator: Operator,
    Form(form): Form<CreateTemplateForm>,
) -> Result<Success<TemplateResponse>, Error> {
    let values = CreateTemplateValues {
        name: &form.name,
        base_url: &form.base_url,
    };

    let template = storage.create_template(&values).await?;

    tracing::info!(r#"Template "{}" created"#, template.name);

    Ok(Success::created(TemplateResponse::from_template(template)))
}

/// Fetch template from storage
pub(super) async fn fetch_template(storage: &Storage, template_id: &Uuid) -> Result<Template, Error> {
    storage
        .find_single_template_by_id(template_id)
        .await
        .ok_or_else(|| Error::not_found("Template not found"))
}

//! All things related to the storage of templates and links
//!
//! Everything lives in memory and is gone on shutdown. Every operation takes the lock once, so
//! each change is applied as a whole.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::Local;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

pub use form_types::*;

use crate::links::GeneratedLink;
use crate::links::LinkStats;
use crate::links::LinkStatus;
use crate::snippet;
use crate::snippet::SpreadsheetSettings;
use crate::templates::Template;
use crate::token;

mod form_types;

/// Required input is missing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is empty
    #[error("`{0}` is required")]
    Required(&'static str),
}

/// Result type for storage interactions that validate their input
pub type Result<T> = core::result::Result<T, ValidationError>;

/// The state behind the lock
#[derive(Debug, Default)]
struct State {
    /// All templates, most recent first
    templates: VecDeque<Template>,

    /// The ledger, most recent first
    links: VecDeque<GeneratedLink>,

    /// Settings used for the validation snippets
    spreadsheet: SpreadsheetSettings,
}

/// In-memory storage of templates, links and settings
#[derive(Clone, Debug)]
pub struct Storage {
    /// Shared state
    state: Arc<Mutex<State>>,
}

impl Storage {
    /// Create a new empty storage with the initial spreadsheet settings
    pub fn new(spreadsheet: SpreadsheetSettings) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                spreadsheet,
                ..State::default()
            })),
        }
    }

    /// Find all templates, most recent first
    pub async fn find_all_templates(&self) -> Vec<Template> {
        self.state.lock().await.templates.iter().cloned().collect()
    }

    /// Find a single template by ID
    pub async fn find_single_template_by_id(&self, id: &Uuid) -> Option<Template> {
        self.state
            .lock()
            .await
            .templates
            .iter()
            .find(|template| &template.id == id)
            .cloned()
    }

    /// Create a template
    ///
    /// A snippet is generated right away when the spreadsheet settings are complete
    ///
    /// # Errors
    ///
    /// Will return `Err` when the name or base URL is blank, nothing is stored in that case
    pub async fn create_template(&self, values: &CreateTemplateValues<'_>) -> Result<Template> {
        if values.name.trim().is_empty() {
            return Err(ValidationError::Required("name"));
        }

        if values.base_url.trim().is_empty() {
            return Err(ValidationError::Required("baseUrl"));
        }

        let mut state = self.state.lock().await;

        let mut template = Template {
            id: Uuid::new_v4(),
            name: values.name.to_string(),
            base_url: values.base_url.to_string(),
            script: None,
            created_at: Local::now().naive_local(),
        };
        template.script = snippet::generate(&state.spreadsheet, &template);

        state.templates.push_front(template.clone());

        tracing::debug!(r#"Template "{}" created: {}"#, template.name, template.id);

        Ok(template)
    }

    /// Current spreadsheet settings
    pub async fn find_spreadsheet_settings(&self) -> SpreadsheetSettings {
        self.state.lock().await.spreadsheet.clone()
    }

    /// Save the spreadsheet settings and regenerate the snippet of every template
    ///
    /// Returns the number of regenerated snippets
    ///
    /// # Errors
    ///
    /// Will return `Err` when the API key or spreadsheet ID is empty, nothing changes in that
    /// case
    pub async fn save_spreadsheet_settings(&self, settings: SpreadsheetSettings) -> Result<usize> {
        settings.validate()?;

        let mut state = self.state.lock().await;

        for template in &mut state.templates {
            template.script = snippet::generate(&settings, template);
        }

        state.spreadsheet = settings;

        Ok(state.templates.len())
    }

    /// Mint a new link for a template and add it to the front of the ledger
    ///
    /// Returns `None` when the template is not known
    pub async fn issue_link(&self, template: &Template) -> Option<GeneratedLink> {
        let mut state = self.state.lock().await;

        let template = state
            .templates
            .iter()
            .find(|known| known.id == template.id)?;

        let token = token::generate();

        let link = GeneratedLink {
            id: Uuid::new_v4(),
            template_id: template.id,
            template_name: template.name.clone(),
            full_url: format!("{}{token}", template.base_url),
            token,
            status: LinkStatus::New,
            created_at: Local::now().naive_local(),
        };

        state.links.push_front(link.clone());

        tracing::debug!(r#"Link issued for template "{}": {}"#, link.template_name, link.full_url);

        Some(link)
    }

    /// Find all links, most recent first, optionally only with a given status
    pub async fn find_all_links(&self, status: Option<LinkStatus>) -> Vec<GeneratedLink> {
        self.state
            .lock()
            .await
            .links
            .iter()
            .filter(|link| status.is_none_or(|status| link.status == status))
            .cloned()
            .collect()
    }

    /// Find a single link by ID
    pub async fn find_single_link_by_id(&self, id: &Uuid) -> Option<GeneratedLink> {
        self.state
            .lock()
            .await
            .links
            .iter()
            .find(|link| &link.id == id)
            .cloned()
    }

    /// Find a single link by its token
    pub async fn find_single_link_by_token(&self, token: &str) -> Option<GeneratedLink> {
        self.state
            .lock()
            .await
            .links
            .iter()
            .find(|link| link.token == token)
            .cloned()
    }

    /// Update a single link
    ///
    /// The only way a link changes after it is issued
    pub async fn update_link(
        &self,
        link: &GeneratedLink,
        values: &UpdateLinkValues,
    ) -> Option<GeneratedLink> {
        self.state
            .lock()
            .await
            .links
            .iter_mut()
            .find(|known| known.id == link.id)
            .map(|link| {
                link.status = values.status;

                link.clone()
            })
    }

    /// Count the links in the ledger by status
    pub async fn link_stats(&self) -> LinkStats {
        LinkStats::from_links(&self.state.lock().await.links)
    }

    /// Is the token the token of a link that is still `new`?
    ///
    /// # Errors
    ///
    /// Will return `Err` when the token is empty
    pub async fn check_token(&self, token: &str) -> Result<bool> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ValidationError::Required("token"));
        }

        Ok(self
            .find_single_link_by_token(token)
            .await
            .is_some_and(|link| link.is_new()))
    }
}

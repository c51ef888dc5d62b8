//! Recording of new links in an external system
//!
//! Best effort only: the ledger is the source of truth, a failed recording is reported back but
//! never undoes the link

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinError;
use tokio::task::JoinHandle;
use url::Url;

use crate::links::GeneratedLink;

/// Where and how to record new links
#[derive(Clone, Debug)]
pub struct SyncConfig {
    /// Endpoint receiving a `POST` for every new link
    pub endpoint: Url,

    /// Timeout of a single recording request
    pub timeout: Duration,
}

/// Recording failures
#[derive(Debug, Error)]
pub enum SyncError {
    /// The endpoint answered with a non-success status code
    #[error("Recording endpoint responded with {0}")]
    Status(StatusCode),

    /// The endpoint could not be reached
    #[error("Could not reach recording endpoint: {0}")]
    Transport(#[from] reqwest::Error),

    /// The recording task died before finishing
    #[error("Recording task failed: {0}")]
    Task(#[from] JoinError),
}

/// Body sent to the recording endpoint
#[derive(Debug, Serialize)]
struct RecordPayload<'a> {
    /// Full URL of the link
    link: &'a str,

    /// Status of the link
    status: &'static str,
}

/// Configured recording endpoint
#[derive(Debug)]
struct Endpoint {
    /// HTTP client with the configured timeout
    client: Client,

    /// The endpoint itself
    url: Url,
}

/// Records new links at the configured endpoint, or does nothing when there is none
#[derive(Clone, Debug)]
pub struct Recorder {
    /// Endpoint, when configured
    endpoint: Option<Arc<Endpoint>>,
}

impl Recorder {
    /// Create a recorder from the sync configuration
    ///
    /// # Errors
    ///
    /// Will return `Err` when the HTTP client can not be created
    pub fn new(config: Option<SyncConfig>) -> Result<Self, SyncError> {
        let Some(config) = config else {
            return Ok(Self::disabled());
        };

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("reglinks/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            endpoint: Some(Arc::new(Endpoint {
                client,
                url: config.endpoint,
            })),
        })
    }

    /// Recorder that skips every recording
    pub fn disabled() -> Self {
        Self { endpoint: None }
    }

    /// Record a link at the endpoint
    ///
    /// Does nothing when no endpoint is configured
    ///
    /// # Errors
    ///
    /// Will return `Err` on a transport failure or a non-success response
    pub async fn record(&self, link: &GeneratedLink) -> Result<(), SyncError> {
        let Some(endpoint) = &self.endpoint else {
            return Ok(());
        };

        let payload = RecordPayload {
            link: &link.full_url,
            status: link.status.as_str(),
        };

        let response = endpoint
            .client
            .post(endpoint.url.clone())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status(status));
        }

        tracing::debug!("Link {} recorded at {}", link.id, endpoint.url);

        Ok(())
    }

    /// Record a link in its own task
    ///
    /// The task runs to completion even when nobody waits for it. Returns `None` when no
    /// endpoint is configured.
    pub fn spawn_record(&self, link: GeneratedLink) -> Option<JoinHandle<Result<(), SyncError>>> {
        self.endpoint.as_ref()?;

        let recorder = self.clone();

        Some(tokio::spawn(async move {
            let result = recorder.record(&link).await;

            if let Err(err) = &result {
                tracing::warn!("Link {} could not be recorded: {err}", link.id);
            }

            result
        }))
    }
}

//! Configuration of the service
//!
//! Everything is read from the environment, a `.env` file is loaded first when present

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use url::Url;

use crate::api::ApiToken;
use crate::snippet::SpreadsheetSettings;
use crate::snippet::DEFAULT_SHEET_NAME;
use crate::sync::SyncConfig;
use crate::token;
use crate::utils::env_var;
use crate::utils::env_var_or_else;

const DEFAULT_ADDRESS: &str = "0.0.0.0:6000";
const DEFAULT_SYNC_TIMEOUT_SECONDS: u64 = 10;

/// All settings needed to run the service
pub struct Config {
    /// Address to listen on
    pub address: SocketAddr,

    /// Bearer token protecting the management API
    pub api_token: ApiToken,

    /// Recording endpoint for new links, sync is skipped without it
    pub sync: Option<SyncConfig>,

    /// Initial spreadsheet settings for the validation snippets
    pub spreadsheet: SpreadsheetSettings,
}

impl Config {
    /// Read the configuration from the environment
    ///
    /// # Errors
    ///
    /// Will return `Err` when a set variable can not be parsed:
    /// - `ADDRESS` / `PORT`
    /// - `SYNC_ENDPOINT` / `SYNC_TIMEOUT_SECONDS`
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            address: address_from_env()?,
            api_token: api_token_from_env(),
            sync: sync_from_env()?,
            spreadsheet: spreadsheet_from_env(),
        })
    }
}

fn address_from_env() -> Result<SocketAddr> {
    let mut address = env_var_or_else("ADDRESS", || String::from(DEFAULT_ADDRESS))
        .parse::<SocketAddr>()
        .context("Invalid `ADDRESS`")?;

    // optional override of just the port
    if let Some(port) = env_var("PORT") {
        let port = port.parse::<u16>().context("Invalid `PORT`")?;

        address.set_port(port);
    }

    Ok(address)
}

fn api_token_from_env() -> ApiToken {
    let api_token = env_var_or_else("API_TOKEN", || {
        let api_token = token::generate_secret();
        tracing::info!("`API_TOKEN` is not set, generating temporary one: {api_token}");
        api_token
    });

    ApiToken::new(api_token)
}

fn sync_from_env() -> Result<Option<SyncConfig>> {
    let Some(endpoint) = env_var("SYNC_ENDPOINT") else {
        tracing::info!("`SYNC_ENDPOINT` is not set, new links will not be recorded externally");
        return Ok(None);
    };

    let endpoint = Url::parse(&endpoint).context("Invalid `SYNC_ENDPOINT`")?;

    let timeout = match env_var("SYNC_TIMEOUT_SECONDS") {
        Some(seconds) => seconds
            .parse::<u64>()
            .context("Invalid `SYNC_TIMEOUT_SECONDS`")?,
        None => DEFAULT_SYNC_TIMEOUT_SECONDS,
    };

    Ok(Some(SyncConfig {
        endpoint,
        timeout: Duration::from_secs(timeout),
    }))
}

fn spreadsheet_from_env() -> SpreadsheetSettings {
    SpreadsheetSettings {
        api_key: env_var("SPREADSHEET_API_KEY").unwrap_or_default(),
        spreadsheet_id: env_var("SPREADSHEET_ID").unwrap_or_default(),
        sheet_name: env_var_or_else("SPREADSHEET_SHEET_NAME", || {
            String::from(DEFAULT_SHEET_NAME)
        }),
    }
}

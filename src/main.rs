#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
// easier to use when using the functions as callback of foreign functions
#![allow(clippy::needless_pass_by_value)]

use anyhow::Result;
use axum::Extension;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::prelude::*;

use crate::api::router;
use crate::config::Config;
use crate::storage::Storage;
use crate::sync::Recorder;

mod api;
mod config;
mod graceful_shutdown;
mod links;
mod snippet;
mod storage;
mod sync;
mod templates;
#[cfg(test)]
mod tests;
mod token;
mod utils;

const DEFAULT_RUST_LOG: &str = "reglinks=debug,tower_http=debug";

#[tokio::main]
async fn main() -> Result<()> {
    setup_environment();
    setup_tracing();

    let config = Config::from_env()?;
    let address = config.address;
    let app = setup_app(config)?;

    let listener = TcpListener::bind(address).await?;
    tracing::info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(graceful_shutdown::handler())
        .await?;

    Ok(())
}

/// Create and setup the app with its dependencies
///
/// # Errors
///
/// Will return `Err` when the HTTP client for the sync endpoint can not be created
pub fn setup_app(config: Config) -> Result<Router> {
    let storage = Storage::new(config.spreadsheet);
    let recorder = Recorder::new(config.sync)?;

    Ok(create_router(storage, recorder, config.api_token))
}

/// Create the router for Reglinks
fn create_router(storage: Storage, recorder: Recorder, api_token: api::ApiToken) -> Router {
    Router::new()
        .nest("/api", router())
        .layer(TraceLayer::new_for_http())
        .layer(Extension(storage))
        .layer(Extension(recorder))
        .layer(Extension(api_token))
}

fn setup_environment() {
    dotenvy::dotenv().ok();
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::registry;

    registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.into()),
        ))
        .with(fmt::layer())
        .init();
}

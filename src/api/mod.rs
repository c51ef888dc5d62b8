//! All API endpoint setup

use axum::Router;
use axum::http::Method;
use axum::routing::get;
use axum::routing::post;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;

pub use operator::ApiToken;
pub use operator::Operator;
pub use request::Form;
pub use request::PathParameters;
pub use request::QueryParameters;
pub use response::Error;
pub use response::Success;

mod check_token;
mod links;
mod operator;
mod request;
mod response;
mod settings;
mod templates;

/// Get the Axum router for all API routes
pub fn router() -> Router {
    let templates = Router::new()
        .route("/", get(templates::list).post(templates::create))
        .route("/{template}", get(templates::single))
        .route("/{template}/script", get(templates::script))
        .route("/{template}/links", post(links::issue));

    let links = Router::new()
        .route("/", get(links::list))
        .route("/stats", get(links::stats))
        .route("/{link}", get(links::single).patch(links::update));

    let settings = Router::new().route(
        "/spreadsheet",
        get(settings::spreadsheet).put(settings::save_spreadsheet),
    );

    // registration pages on other origins ask for this one
    let check_token = Router::new().route("/", get(check_token::check)).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS]),
    );

    Router::new()
        .nest("/templates", templates)
        .nest("/links", links)
        .nest("/settings", settings)
        .nest("/check-token", check_token)
}

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::{Router, routing::get};

use super::handlers;
use super::handlers::probes::{healthz, livez};
use super::state::AppState;

/// Resume uploads are capped at 10MB; leave room for the other form fields.
const BODY_LIMIT: usize = 12 * 1024 * 1024;

pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/subscribe", post(handlers::subscribe::create))
        .route("/api/submit-resource", post(handlers::resources::submit))
        .route("/api/resources", get(handlers::resources::list))
        .route(
            "/api/job-finder-request",
            post(handlers::job_finder::create),
        )
        .route(
            "/api/job-finder/return",
            get(handlers::job_finder::checkout_return),
        )
        .route("/api/startups", get(handlers::directory::startups))
        .route("/api/companies", get(handlers::companies::list))
        .route("/api/companies/{slug}", get(handlers::companies::detail))
        .route("/api/jobs", get(handlers::jobs::list))
        .route("/api/roundup", get(handlers::roundup::list))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(state)
}

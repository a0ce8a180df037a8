//! REST API - JSON endpoints over the core services.
//!
//! Every data endpoint answers `{ "success": true, "data": ... }`; failures answer
//! `{ "success": false, "error": "..." }` with a matching status code.

/// Server-sent change notifications
pub mod events;
/// Body and query extractors with enveloped rejections
pub mod extract;
/// Health check endpoint
pub mod health;
/// Job endpoints
pub mod jobs;
/// Mapping endpoints
pub mod mappings;
/// Outcome endpoints
pub mod outcomes;
/// Output endpoints
pub mod outputs;
/// Progress chart endpoint
pub mod progress;
/// Response envelope and error mapping
pub mod response;

use crate::{errors::Result, events::EventBus};
use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection (pooled by `SeaORM`)
    pub db: DatabaseConnection,
    /// Change notification bus
    pub events: EventBus,
}

impl AppState {
    /// Creates new application state
    #[must_use]
    pub const fn new(db: DatabaseConnection, events: EventBus) -> Self {
        Self { db, events }
    }
}

/// Builds the application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, patch};

    let api = Router::new()
        .route(
            "/api/outcomes",
            get(outcomes::list_outcomes).post(outcomes::create_outcome),
        )
        .route(
            "/api/outcomes/:id",
            get(outcomes::get_outcome)
                .put(outcomes::update_outcome)
                .delete(outcomes::delete_outcome),
        )
        .route(
            "/api/outcomes/:id/current",
            patch(outcomes::set_current_value),
        )
        .route(
            "/api/outputs",
            get(outputs::list_outputs).post(outputs::create_output),
        )
        .route(
            "/api/outputs/:id",
            get(outputs::get_output)
                .put(outputs::update_output)
                .delete(outputs::delete_output),
        )
        .route("/api/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route(
            "/api/jobs/:id",
            get(jobs::get_job)
                .put(jobs::update_job)
                .delete(jobs::delete_job),
        )
        .route("/api/jobs/:id/done", patch(jobs::set_job_done))
        .route(
            "/api/mappings/outcome-output",
            get(mappings::list_outcome_output).post(mappings::create_outcome_output),
        )
        .route(
            "/api/mappings/outcome-output/:id",
            axum::routing::delete(mappings::delete_outcome_output),
        )
        .route(
            "/api/mappings/job-output",
            get(mappings::list_job_output).post(mappings::create_job_output),
        )
        .route(
            "/api/mappings/job-output/:id",
            axum::routing::delete(mappings::delete_job_output),
        )
        .route("/api/progress", get(progress::get_progress_chart))
        .route("/api/events", get(events::event_stream));

    Router::new()
        .merge(api)
        .merge(health::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `bind_addr` and serves the API until the process stops.
pub async fn serve(bind_addr: &str, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("OutcomeBuddy API listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

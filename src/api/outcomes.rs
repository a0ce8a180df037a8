//! Outcome endpoints

use crate::{
    api::{
        AppState,
        extract::ApiJson,
        response::{ApiResponse, Deleted, created, ok},
    },
    core::outcome::{self, OutcomeInput},
    entities::OutcomeModel,
    errors::{Error, Result},
    events::{Collection, DashboardEvent},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

/// Body of `PATCH /api/outcomes/:id/current`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentValueBody {
    /// Newly measured value
    pub current_value: f64,
}

/// GET /api/outcomes
pub async fn list_outcomes(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<OutcomeModel>>>> {
    Ok(ok(outcome::get_all_outcomes(&state.db).await?))
}

/// POST /api/outcomes
pub async fn create_outcome(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<OutcomeInput>,
) -> Result<(StatusCode, Json<ApiResponse<OutcomeModel>>)> {
    let model = outcome::create_outcome(&state.db, input).await?;
    state
        .events
        .publish(DashboardEvent::data_changed(Collection::Outcomes));
    Ok(created(model))
}

/// GET /api/outcomes/:id
pub async fn get_outcome(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<OutcomeModel>>> {
    let model = outcome::get_outcome_by_id(&state.db, &id)
        .await?
        .ok_or(Error::OutcomeNotFound { id })?;
    Ok(ok(model))
}

/// PUT /api/outcomes/:id
pub async fn update_outcome(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<OutcomeInput>,
) -> Result<Json<ApiResponse<OutcomeModel>>> {
    let model = outcome::update_outcome(&state.db, &id, input).await?;
    state
        .events
        .publish(DashboardEvent::data_changed(Collection::Outcomes));
    Ok(ok(model))
}

/// PATCH /api/outcomes/:id/current
pub async fn set_current_value(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<CurrentValueBody>,
) -> Result<Json<ApiResponse<OutcomeModel>>> {
    let model = outcome::set_outcome_current_value(&state.db, &id, body.current_value).await?;
    state
        .events
        .publish(DashboardEvent::data_changed(Collection::Outcomes));
    Ok(ok(model))
}

/// DELETE /api/outcomes/:id
pub async fn delete_outcome(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Deleted>>> {
    outcome::delete_outcome(&state.db, &id).await?;
    for collection in [Collection::OutcomeOutputMappings, Collection::Outcomes] {
        state
            .events
            .publish(DashboardEvent::data_changed(collection));
    }
    Ok(ok(Deleted { id }))
}

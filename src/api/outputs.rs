//! Output endpoints

use crate::{
    api::{
        AppState,
        extract::ApiJson,
        response::{ApiResponse, Deleted, created, ok},
    },
    core::output::{self, OutputInput},
    entities::OutputModel,
    errors::{Error, Result},
    events::{Collection, DashboardEvent},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// GET /api/outputs
pub async fn list_outputs(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<OutputModel>>>> {
    Ok(ok(output::get_all_outputs(&state.db).await?))
}

/// POST /api/outputs
pub async fn create_output(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<OutputInput>,
) -> Result<(StatusCode, Json<ApiResponse<OutputModel>>)> {
    let model = output::create_output(&state.db, input).await?;
    state
        .events
        .publish(DashboardEvent::data_changed(Collection::Outputs));
    Ok(created(model))
}

/// GET /api/outputs/:id
pub async fn get_output(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<OutputModel>>> {
    let model = output::get_output_by_id(&state.db, &id)
        .await?
        .ok_or(Error::OutputNotFound { id })?;
    Ok(ok(model))
}

/// PUT /api/outputs/:id
pub async fn update_output(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<OutputInput>,
) -> Result<Json<ApiResponse<OutputModel>>> {
    let model = output::update_output(&state.db, &id, input).await?;
    state
        .events
        .publish(DashboardEvent::data_changed(Collection::Outputs));
    Ok(ok(model))
}

/// DELETE /api/outputs/:id
pub async fn delete_output(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Deleted>>> {
    output::delete_output(&state.db, &id).await?;
    for collection in [
        Collection::OutcomeOutputMappings,
        Collection::JobOutputMappings,
        Collection::Outputs,
    ] {
        state
            .events
            .publish(DashboardEvent::data_changed(collection));
    }
    Ok(ok(Deleted { id }))
}

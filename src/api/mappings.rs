//! Mapping endpoints

use crate::{
    api::{
        AppState,
        extract::ApiJson,
        response::{ApiResponse, Deleted, created, ok},
    },
    core::mapping::{
        self, JobOutputMappingInput, JobOutputMappingView, OutcomeOutputMappingInput,
        OutcomeOutputMappingView,
    },
    entities::{JobOutputMappingModel, OutcomeOutputMappingModel},
    errors::Result,
    events::{Collection, DashboardEvent},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// GET /api/mappings/outcome-output
pub async fn list_outcome_output(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<OutcomeOutputMappingView>>>> {
    Ok(ok(mapping::list_outcome_output_mapping_views(&state.db).await?))
}

/// POST /api/mappings/outcome-output
pub async fn create_outcome_output(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<OutcomeOutputMappingInput>,
) -> Result<(StatusCode, Json<ApiResponse<OutcomeOutputMappingModel>>)> {
    let model = mapping::create_outcome_output_mapping(&state.db, input).await?;
    state
        .events
        .publish(DashboardEvent::data_changed(Collection::OutcomeOutputMappings));
    Ok(created(model))
}

/// DELETE /api/mappings/outcome-output/:id
pub async fn delete_outcome_output(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Deleted>>> {
    mapping::delete_outcome_output_mapping(&state.db, &id).await?;
    state
        .events
        .publish(DashboardEvent::data_changed(Collection::OutcomeOutputMappings));
    Ok(ok(Deleted { id }))
}

/// GET /api/mappings/job-output
pub async fn list_job_output(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<JobOutputMappingView>>>> {
    Ok(ok(mapping::list_job_output_mapping_views(&state.db).await?))
}

/// POST /api/mappings/job-output
pub async fn create_job_output(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<JobOutputMappingInput>,
) -> Result<(StatusCode, Json<ApiResponse<JobOutputMappingModel>>)> {
    let model = mapping::create_job_output_mapping(&state.db, input).await?;
    state
        .events
        .publish(DashboardEvent::data_changed(Collection::JobOutputMappings));
    Ok(created(model))
}

/// DELETE /api/mappings/job-output/:id
pub async fn delete_job_output(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Deleted>>> {
    mapping::delete_job_output_mapping(&state.db, &id).await?;
    state
        .events
        .publish(DashboardEvent::data_changed(Collection::JobOutputMappings));
    Ok(ok(Deleted { id }))
}

//! Job endpoints

use crate::{
    api::{
        AppState,
        extract::{ApiJson, ApiQuery},
        response::{ApiResponse, Deleted, created, ok},
    },
    core::job::{self, JobInput},
    entities::JobModel,
    errors::{Error, Result},
    events::{Collection, DashboardEvent},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

/// Body of `PATCH /api/jobs/:id/done`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoneBody {
    /// New completion status
    pub is_done: bool,
}

/// Query of `DELETE /api/jobs/:id`
#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    /// Remove the row and its mappings instead of hiding it
    #[serde(default)]
    pub hard: bool,
}

/// GET /api/jobs
pub async fn list_jobs(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<JobModel>>>> {
    Ok(ok(job::get_active_jobs(&state.db).await?))
}

/// POST /api/jobs
pub async fn create_job(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<JobInput>,
) -> Result<(StatusCode, Json<ApiResponse<JobModel>>)> {
    let model = job::create_job(&state.db, input).await?;
    state
        .events
        .publish(DashboardEvent::data_changed(Collection::Jobs));
    Ok(created(model))
}

/// GET /api/jobs/:id
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<JobModel>>> {
    match job::get_job_by_id(&state.db, &id).await? {
        Some(model) if !model.is_deleted => Ok(ok(model)),
        _ => Err(Error::JobNotFound { id }),
    }
}

/// PUT /api/jobs/:id
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<JobInput>,
) -> Result<Json<ApiResponse<JobModel>>> {
    let model = job::update_job(&state.db, &id, input).await?;
    state
        .events
        .publish(DashboardEvent::data_changed(Collection::Jobs));
    Ok(ok(model))
}

/// PATCH /api/jobs/:id/done
pub async fn set_job_done(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<DoneBody>,
) -> Result<Json<ApiResponse<JobModel>>> {
    let model = job::set_job_done(&state.db, &state.events, &id, body.is_done).await?;
    Ok(ok(model))
}

/// DELETE /api/jobs/:id (`?hard=true` for a hard delete)
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<DeleteParams>,
) -> Result<Json<ApiResponse<Deleted>>> {
    if params.hard {
        job::hard_delete_job(&state.db, &id).await?;
        state
            .events
            .publish(DashboardEvent::data_changed(Collection::JobOutputMappings));
    } else {
        job::soft_delete_job(&state.db, &id).await?;
    }
    state
        .events
        .publish(DashboardEvent::data_changed(Collection::Jobs));
    Ok(ok(Deleted { id }))
}

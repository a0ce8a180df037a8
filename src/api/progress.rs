//! Progress chart endpoint

use crate::{
    api::{
        AppState,
        extract::ApiQuery,
        response::{ApiResponse, ok},
    },
    core::progress::{self, ChartEntry, TimeFilter},
    errors::Result,
};
use axum::{Json, extract::State};

/// GET /api/progress?from=YYYY-MM-DD&to=YYYY-MM-DD
///
/// One entry per outcome, in outcome order. Both query parameters are optional
/// and restrict which jobs count by due date.
pub async fn get_progress_chart(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<TimeFilter>,
) -> Result<Json<ApiResponse<Vec<ChartEntry>>>> {
    Ok(ok(progress::chart_for_dashboard(&state.db, filter).await?))
}

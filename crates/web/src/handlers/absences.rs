//! Handlers for the `/absences` JSON resource.

use std::sync::Arc;

use absences_core::absence::{RowField, RowRecord};
use absences_core::error::CoreError;
use absences_core::table::{sort_rows, FieldKey, SortDirection, SortState};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::dashboard::LoadState;
use crate::error::{AppError, AppResult};
use crate::query::SortParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Payload of an accepted refresh.
#[derive(Debug, Serialize)]
pub struct RefreshAccepted {
    /// Generation of the cycle that was started.
    pub generation: u64,
}

/// GET /api/v1/absences
///
/// Merged rows of the latest completed cycle, in API order unless
/// `?sort=<field>&dir=asc|desc` asks otherwise. Returns 503 while loading
/// and 502 when the last cycle failed.
pub async fn list_absences(
    State(state): State<AppState>,
    Query(params): Query<SortParams>,
) -> AppResult<Json<DataResponse<Vec<RowRecord>>>> {
    let sort = parse_sort(&params)?;
    let rows = ready_rows(&state).await?;
    let data = sort_rows(&rows[..], &sort).into_iter().cloned().collect();
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/absences/refresh
///
/// Start a new aggregation cycle in the background.
pub async fn refresh(
    State(state): State<AppState>,
) -> (StatusCode, Json<DataResponse<RefreshAccepted>>) {
    let (generation, _) = state.dashboard.spawn_refresh().await;
    tracing::info!(generation, "Refresh requested");
    (
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: RefreshAccepted { generation },
        }),
    )
}

/// Rows of the latest cycle, or the error describing why there are none.
pub(crate) async fn ready_rows(state: &AppState) -> AppResult<Arc<[RowRecord]>> {
    match state.dashboard.snapshot().await {
        LoadState::Ready(rows) => Ok(rows),
        LoadState::Loading => Err(AppError::NotReady),
        LoadState::Failed(message) => Err(AppError::Upstream(message)),
    }
}

/// Strict counterpart of the page's lenient sort parsing.
fn parse_sort(params: &SortParams) -> Result<SortState<RowField>, CoreError> {
    let Some(name) = params.sort.as_deref() else {
        return Ok(SortState::default());
    };
    let key = RowField::from_name(name)
        .ok_or_else(|| CoreError::Validation(format!("Unknown sort field '{name}'")))?;
    let direction = params
        .dir
        .as_deref()
        .map(SortDirection::parse)
        .transpose()?
        .unwrap_or_default();
    Ok(SortState::by(key, direction))
}

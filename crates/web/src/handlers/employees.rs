//! Handlers for the `/employees` resource.

use absences_core::employee::EmployeeDetail;
use absences_core::error::CoreError;
use axum::extract::{Path, State};
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::handlers::absences::ready_rows;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/employees/{name}/absences
///
/// Every absence of the employee whose full name is exactly `name`, newest
/// first. Returns 404 when there are none.
pub async fn employee_absences(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<DataResponse<EmployeeDetail>>> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("Employee name must not be blank".into()));
    }

    let rows = ready_rows(&state).await?;
    let detail = EmployeeDetail::build(&rows, &name);
    if detail.is_empty() {
        return Err(CoreError::NotFound {
            entity: "Employee",
            key: name,
        }
        .into());
    }

    Ok(Json(DataResponse { data: detail }))
}

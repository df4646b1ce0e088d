//! Route definitions for the `/employees` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::employees;
use crate::state::AppState;

/// Routes mounted at `/employees`.
///
/// ```text
/// GET    /{name}/absences   -> employee_absences
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{name}/absences", get(employees::employee_absences))
}

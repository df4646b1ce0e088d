//! Route definitions for the `/absences` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::absences;
use crate::state::AppState;

/// Routes mounted at `/absences`.
///
/// ```text
/// GET    /          -> list_absences  (?sort=field&dir=asc|desc)
/// POST   /refresh   -> refresh
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(absences::list_absences))
        .route("/refresh", post(absences::refresh))
}

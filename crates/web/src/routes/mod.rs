pub mod absences;
pub mod employees;
pub mod health;
pub mod pages;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /absences                                        list (?sort=&dir=)
/// /absences/refresh                                start a new cycle (POST)
///
/// /employees/{name}/absences                       one employee's absences
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/absences", absences::router())
        .nest("/employees", employees::router())
}

//! Route definitions for the server-rendered dashboard.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// GET    /        -> index  (?lang=&sort=&dir=&page=&employee=)
/// POST   /retry   -> retry  (form: lang, sort, dir)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/retry", post(pages::retry))
}

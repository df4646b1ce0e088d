//! JSON success envelope.

use serde::Serialize;

/// Every JSON success body is `{ "data": ... }`; errors use
/// [`crate::error::AppError`]'s `{ "error", "code" }` instead.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

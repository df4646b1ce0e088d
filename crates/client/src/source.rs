use std::sync::Arc;

use absences_core::absence::{AbsenceRecord, ConflictRecord};
use absences_core::types::AbsenceId;
use async_trait::async_trait;

use crate::api::AbsenceApiError;

/// Where absences and their conflict flags come from.
///
/// [`crate::api::AbsenceApi`] is the production implementation; tests plug in
/// in-memory sources.
#[async_trait]
pub trait AbsenceSource: Send + Sync {
    async fn fetch_absences(&self) -> Result<Vec<AbsenceRecord>, AbsenceApiError>;

    async fn fetch_conflict(&self, id: AbsenceId) -> Result<ConflictRecord, AbsenceApiError>;
}

#[async_trait]
impl<T: AbsenceSource + ?Sized> AbsenceSource for Arc<T> {
    async fn fetch_absences(&self) -> Result<Vec<AbsenceRecord>, AbsenceApiError> {
        (**self).fetch_absences().await
    }

    async fn fetch_conflict(&self, id: AbsenceId) -> Result<ConflictRecord, AbsenceApiError> {
        (**self).fetch_conflict(id).await
    }
}

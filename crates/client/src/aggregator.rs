//! One aggregation cycle: fetch absences, look up every conflict flag in
//! parallel, and merge the results into table rows.
//!
//! A failed absence fetch fails the whole cycle. A failed conflict lookup
//! only affects its own row, which is treated as conflict-free.

use absences_core::absence::{AbsenceRecord, ConflictRecord, RowRecord};
use absences_core::types::AbsenceId;
use futures::future::join_all;
use tokio_util::sync::CancellationToken;

use crate::api::AbsenceApiError;
use crate::source::AbsenceSource;

/// Errors that end an aggregation cycle without producing rows.
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    /// The absence listing could not be fetched.
    #[error("Failed to fetch absences: {0}")]
    Absences(#[source] AbsenceApiError),

    /// The cycle was abandoned before it finished.
    #[error("Aggregation cancelled")]
    Cancelled,
}

/// Runs aggregation cycles against an [`AbsenceSource`].
pub struct DataAggregator<S> {
    source: S,
}

impl<S: AbsenceSource> DataAggregator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run one full cycle.
    ///
    /// Rows come back in the order the absences endpoint returned them. The
    /// call resolves only after every conflict lookup has finished.
    pub async fn aggregate(&self) -> Result<Vec<RowRecord>, AggregationError> {
        let absences = self
            .source
            .fetch_absences()
            .await
            .map_err(AggregationError::Absences)?;
        tracing::debug!(count = absences.len(), "Fetched absences");

        let conflicts = join_all(absences.iter().map(|a| self.fetch_conflict_safely(a.id))).await;

        let failed = conflicts.iter().filter(|c| c.is_none()).count();
        if failed > 0 {
            tracing::warn!(failed, total = absences.len(), "Some conflict lookups failed");
        }

        Ok(merge_all(&absences, &conflicts))
    }

    /// Like [`DataAggregator::aggregate`], but gives up with
    /// [`AggregationError::Cancelled`] as soon as `cancel` fires.
    pub async fn aggregate_until_cancelled(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<RowRecord>, AggregationError> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(AggregationError::Cancelled),
            result = self.aggregate() => result,
        }
    }

    async fn fetch_conflict_safely(&self, id: AbsenceId) -> Option<ConflictRecord> {
        match self.source.fetch_conflict(id).await {
            Ok(conflict) => Some(conflict),
            Err(e) => {
                tracing::warn!(absence_id = id, error = %e, "Conflict lookup failed, assuming no conflict");
                None
            }
        }
    }
}

/// Pair each absence with the lookup made for it, by position.
fn merge_all(absences: &[AbsenceRecord], conflicts: &[Option<ConflictRecord>]) -> Vec<RowRecord> {
    absences
        .iter()
        .zip(conflicts)
        .map(|(absence, conflict)| RowRecord::merge(absence, conflict.as_ref()))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use absences_core::absence::{ApprovalStatus, Employee};
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use tokio::sync::Barrier;

    use super::*;

    fn absence(id: AbsenceId, first: &str, last: &str, start: &str, days: Option<i64>) -> AbsenceRecord {
        AbsenceRecord {
            id,
            start_date: start.to_string(),
            end_date: None,
            days,
            employee: Employee {
                first_name: first.to_string(),
                last_name: last.to_string(),
            },
            approved: id % 2 == 1,
            absence_type: "SICKNESS".to_string(),
        }
    }

    #[derive(Default)]
    struct FakeSource {
        absences: Vec<AbsenceRecord>,
        fail_absences: bool,
        conflicting: HashSet<AbsenceId>,
        failing: HashSet<AbsenceId>,
        barrier: Option<Barrier>,
        calls: Mutex<Vec<String>>,
    }

    fn unavailable() -> AbsenceApiError {
        AbsenceApiError::ApiError {
            status: 500,
            body: "unavailable".into(),
        }
    }

    #[async_trait]
    impl AbsenceSource for FakeSource {
        async fn fetch_absences(&self) -> Result<Vec<AbsenceRecord>, AbsenceApiError> {
            self.calls.lock().unwrap().push("absences".into());
            if self.fail_absences {
                return Err(unavailable());
            }
            Ok(self.absences.clone())
        }

        async fn fetch_conflict(&self, id: AbsenceId) -> Result<ConflictRecord, AbsenceApiError> {
            self.calls.lock().unwrap().push(format!("conflict:{id}"));
            if let Some(barrier) = &self.barrier {
                barrier.wait().await;
            }
            if self.failing.contains(&id) {
                return Err(unavailable());
            }
            Ok(ConflictRecord {
                id,
                has_conflict: self.conflicting.contains(&id),
            })
        }
    }

    fn three_absences() -> Vec<AbsenceRecord> {
        vec![
            absence(3, "Carol", "C", "2023-03-01", Some(2)),
            absence(1, "Alice", "A", "2023-01-01", Some(1)),
            absence(2, "Bob", "B", "2023-02-01", None),
        ]
    }

    #[tokio::test]
    async fn one_failing_conflict_keeps_every_row() {
        let source = FakeSource {
            absences: three_absences(),
            conflicting: HashSet::from([3, 1]),
            failing: HashSet::from([1]),
            ..Default::default()
        };

        let rows = DataAggregator::new(source).aggregate().await.unwrap();

        assert_eq!(rows.len(), 3);
        let flags: Vec<_> = rows.iter().map(|r| (r.id, r.has_conflict)).collect();
        assert_eq!(flags, vec![(3, true), (1, false), (2, false)]);
    }

    #[tokio::test]
    async fn failing_absences_fetch_fails_cycle() {
        let source = FakeSource {
            absences: three_absences(),
            fail_absences: true,
            ..Default::default()
        };
        let aggregator = DataAggregator::new(source);

        let result = aggregator.aggregate().await;

        assert_matches!(result, Err(AggregationError::Absences(AbsenceApiError::ApiError { status: 500, .. })));
        assert_eq!(*aggregator.source().calls.lock().unwrap(), vec!["absences".to_string()]);
    }

    #[tokio::test]
    async fn preserves_api_order() {
        let source = FakeSource {
            absences: three_absences(),
            ..Default::default()
        };

        let rows = DataAggregator::new(source).aggregate().await.unwrap();

        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn absences_fetch_precedes_conflict_lookups() {
        let source = FakeSource {
            absences: three_absences(),
            ..Default::default()
        };
        let aggregator = DataAggregator::new(source);

        aggregator.aggregate().await.unwrap();

        let calls = aggregator.source().calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0], "absences");
        assert!(calls[1..].iter().all(|c| c.starts_with("conflict:")));
    }

    #[tokio::test]
    async fn conflict_lookups_run_concurrently() {
        // Every lookup waits on the barrier, so the cycle only completes if
        // all three are in flight at the same time.
        let source = FakeSource {
            absences: three_absences(),
            barrier: Some(Barrier::new(3)),
            ..Default::default()
        };

        let rows = tokio::time::timeout(Duration::from_secs(5), DataAggregator::new(source).aggregate())
            .await
            .expect("lookups did not run concurrently")
            .unwrap();

        assert_eq!(rows.len(), 3);
    }

    #[tokio::test]
    async fn empty_listing_yields_no_rows() {
        let rows = DataAggregator::new(FakeSource::default()).aggregate().await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn end_to_end_single_row_with_failed_conflict() {
        let source = FakeSource {
            absences: vec![absence(1, "A", "B", "2023-10-15", Some(3))],
            failing: HashSet::from([1]),
            ..Default::default()
        };

        let rows = DataAggregator::new(Arc::new(source)).aggregate().await.unwrap();

        assert_eq!(
            rows,
            vec![RowRecord {
                id: 1,
                start_date: "2023-10-15".into(),
                end_date: "2023-10-17".into(),
                days: Some(3),
                employee_name: "A B".into(),
                approval_status: ApprovalStatus::Approved,
                absence_type: "SICKNESS".into(),
                has_conflict: false,
            }]
        );
    }

    #[tokio::test]
    async fn cancelled_cycle_reports_cancellation() {
        let source = FakeSource {
            absences: three_absences(),
            // Never released: only three parties will ever arrive.
            barrier: Some(Barrier::new(10)),
            ..Default::default()
        };
        let aggregator = DataAggregator::new(source);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = aggregator.aggregate_until_cancelled(&cancel).await;

        assert_matches!(result, Err(AggregationError::Cancelled));
    }
}

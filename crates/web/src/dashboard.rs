//! Load state of the absences dashboard.
//!
//! The dashboard owns the current row set and the aggregator that refreshes
//! it. Each refresh is a numbered cycle: [`Dashboard::begin_cycle`] moves the
//! state to [`LoadState::Loading`] and hands out a generation, and
//! [`Dashboard::commit`] only applies a result whose generation is still the
//! latest. Results that arrive after a newer cycle started, or after
//! [`Dashboard::shutdown`], are dropped.

use std::sync::Arc;

use absences_client::{AbsenceSource, AggregationError, DataAggregator};
use absences_core::absence::RowRecord;
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// What the dashboard currently has to show.
#[derive(Debug, Clone)]
pub enum LoadState {
    /// A cycle is in flight and no result has been committed for it.
    Loading,
    /// Merged rows from the latest completed cycle, in API order.
    Ready(Arc<[RowRecord]>),
    /// The latest cycle failed; holds the upstream error message.
    Failed(String),
}

/// Serializable tag for [`LoadState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed,
}

impl LoadState {
    pub fn status(&self) -> LoadStatus {
        match self {
            LoadState::Loading => LoadStatus::Loading,
            LoadState::Ready(_) => LoadStatus::Ready,
            LoadState::Failed(_) => LoadStatus::Failed,
        }
    }
}

#[derive(Debug)]
struct Inner {
    generation: u64,
    state: LoadState,
}

/// Shared dashboard state plus the aggregator that fills it.
pub struct Dashboard {
    inner: RwLock<Inner>,
    aggregator: DataAggregator<Arc<dyn AbsenceSource>>,
    cancel: CancellationToken,
}

impl Dashboard {
    /// A dashboard that starts out loading. Nothing is fetched until
    /// [`Dashboard::refresh`] or [`Dashboard::spawn_refresh`] is called.
    pub fn new(source: Arc<dyn AbsenceSource>) -> Self {
        Self {
            inner: RwLock::new(Inner {
                generation: 0,
                state: LoadState::Loading,
            }),
            aggregator: DataAggregator::new(source),
            cancel: CancellationToken::new(),
        }
    }

    /// Current load state.
    pub async fn snapshot(&self) -> LoadState {
        self.inner.read().await.state.clone()
    }

    pub async fn generation(&self) -> u64 {
        self.inner.read().await.generation
    }

    /// Start a new cycle: bump the generation and show the loading state.
    ///
    /// Any earlier cycle still running becomes stale.
    pub async fn begin_cycle(&self) -> u64 {
        let mut inner = self.inner.write().await;
        inner.generation += 1;
        inner.state = LoadState::Loading;
        tracing::debug!(generation = inner.generation, "Began aggregation cycle");
        inner.generation
    }

    /// Apply the outcome of cycle `generation`.
    ///
    /// Returns `false` without touching the state when the cycle is stale,
    /// was cancelled, or the dashboard has been shut down.
    pub async fn commit(
        &self,
        generation: u64,
        result: Result<Vec<RowRecord>, AggregationError>,
    ) -> bool {
        if self.cancel.is_cancelled() {
            tracing::debug!(generation, "Dashboard shut down, discarding cycle result");
            return false;
        }

        let mut inner = self.inner.write().await;
        if inner.generation != generation {
            tracing::debug!(
                generation,
                current = inner.generation,
                "Discarding stale cycle result"
            );
            return false;
        }

        inner.state = match result {
            Ok(rows) => {
                tracing::info!(generation, rows = rows.len(), "Absences loaded");
                LoadState::Ready(rows.into())
            }
            Err(AggregationError::Absences(e)) => {
                tracing::error!(generation, error = %e, "Absences could not be loaded");
                LoadState::Failed(e.to_string())
            }
            Err(AggregationError::Cancelled) => return false,
        };
        true
    }

    /// Run a full cycle and wait for it to finish.
    ///
    /// Returns whether the result was committed.
    pub async fn refresh(&self) -> bool {
        let generation = self.begin_cycle().await;
        self.run_cycle(generation).await
    }

    /// Start a cycle and finish it in the background.
    ///
    /// The state is already [`LoadState::Loading`] when this returns. Yields
    /// the cycle's generation and a handle resolving to whether its result
    /// was committed.
    pub async fn spawn_refresh(self: &Arc<Self>) -> (u64, JoinHandle<bool>) {
        let generation = self.begin_cycle().await;
        let dashboard = Arc::clone(self);
        let handle = tokio::spawn(async move { dashboard.run_cycle(generation).await });
        (generation, handle)
    }

    /// Cancel in-flight cycles and refuse further commits.
    pub fn shutdown(&self) {
        tracing::info!("Shutting down dashboard");
        self.cancel.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    async fn run_cycle(&self, generation: u64) -> bool {
        tracing::info!(generation, "Aggregation cycle started");
        let result = self.aggregator.aggregate_until_cancelled(&self.cancel).await;
        self.commit(generation, result).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

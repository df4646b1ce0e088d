//! Upstream access for the absences dashboard.
//!
//! - [`api`]: reqwest client for the absence and conflict endpoints.
//! - [`source`]: the [`source::AbsenceSource`] seam the aggregator depends on.
//! - [`aggregator`]: one fetch-then-merge cycle producing table rows.

pub mod aggregator;
pub mod api;
pub mod source;

pub use aggregator::{AggregationError, DataAggregator};
pub use api::{AbsenceApi, AbsenceApiError};
pub use source::AbsenceSource;

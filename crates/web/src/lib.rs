//! Absences dashboard server library.
//!
//! Exposes the building blocks (config, dashboard state, error handling,
//! routes, views) so integration tests and the binary entrypoint can both
//! access them.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod view;

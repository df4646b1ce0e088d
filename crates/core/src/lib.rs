//! Absences dashboard domain logic.
//!
//! Pure, I/O-free building blocks shared by the upstream client and the web
//! front-end: calendar date math, the record model and merge, the generic
//! table engine, translations, and the per-employee detail view.

pub mod absence;
pub mod absence_type;
pub mod date_math;
pub mod employee;
pub mod error;
pub mod i18n;
pub mod table;
pub mod types;

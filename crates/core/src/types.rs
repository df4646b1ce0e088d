/// Absence identifiers as issued by the upstream absences API.
pub type AbsenceId = i64;

//! Per-employee absence listing shown when an employee name is selected.

use std::cmp::Ordering;

use serde::Serialize;

use crate::absence::{ApprovalStatus, RowRecord};
use crate::date_math::parse_calendar_date;
use crate::types::AbsenceId;

/// Rows belonging to exactly `name`, newest start date first.
///
/// The order is fixed. Start dates that do not parse sort after every valid
/// date; ties keep their input order.
pub fn employee_absences<'a>(rows: &'a [RowRecord], name: &str) -> Vec<&'a RowRecord> {
    let mut matching: Vec<_> = rows
        .iter()
        .filter(|r| r.employee_name == name)
        .map(|r| (parse_calendar_date(&r.start_date), r))
        .collect();

    matching.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    matching.into_iter().map(|(_, r)| r).collect()
}

/// One line of the employee detail listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailEntry {
    pub id: AbsenceId,
    pub start_date: String,
    pub end_date: String,
    /// Missing or zero durations count as a single day.
    pub duration_days: i64,
    pub absence_type: String,
    pub approval_status: ApprovalStatus,
    pub has_conflict: bool,
}

impl From<&RowRecord> for DetailEntry {
    fn from(row: &RowRecord) -> Self {
        Self {
            id: row.id,
            start_date: row.start_date.clone(),
            end_date: row.end_date.clone(),
            duration_days: row.days.filter(|d| *d != 0).unwrap_or(1),
            absence_type: row.absence_type.clone(),
            approval_status: row.approval_status,
            has_conflict: row.has_conflict,
        }
    }
}

/// View model for one employee's absences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeDetail {
    pub name: String,
    pub entries: Vec<DetailEntry>,
}

impl EmployeeDetail {
    pub fn build(rows: &[RowRecord], name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: employee_absences(rows, name)
                .into_iter()
                .map(DetailEntry::from)
                .collect(),
        }
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Which employee's detail view is open, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailSelection {
    selected: Option<String>,
}

impl DetailSelection {
    /// Open the detail view for `name`. Blank names are ignored.
    pub fn open(&mut self, name: &str) {
        if !name.trim().is_empty() {
            self.selected = Some(name.to_string());
        }
    }

    /// Close the view (close button or dismiss gesture) and forget the
    /// selection.
    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    /// Build the detail view model for the selected employee.
    pub fn detail(&self, rows: &[RowRecord]) -> Option<EmployeeDetail> {
        self.selected().map(|name| EmployeeDetail::build(rows, name))
    }
}

//! Absence records as delivered by the upstream API, and the merged row
//! records the table displays.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::date_math::calculate_end_date;
use crate::table::{CellValue, FieldKey, TableRow};
use crate::types::AbsenceId;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub first_name: String,
    pub last_name: String,
}

impl Employee {
    /// First and last name separated by a single space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One absence as returned by the absences endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceRecord {
    pub id: AbsenceId,
    pub start_date: String,
    /// Sent by the API but not trusted; the row derives its own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_days")]
    pub days: Option<i64>,
    pub employee: Employee,
    pub approved: bool,
    pub absence_type: String,
}

/// Conflict flag for one absence, as returned by the conflict endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub id: AbsenceId,
    #[serde(rename = "conflicts")]
    pub has_conflict: bool,
}

/// Coerce a JSON `days` value to a whole number of days.
///
/// Numbers are truncated toward zero, numeric strings are parsed then
/// truncated, and everything else (including non-finite values) is `None`.
pub fn coerce_days(value: &Value) -> Option<i64> {
    fn truncate(f: f64) -> Option<i64> {
        f.is_finite().then(|| f.trunc() as i64)
    }

    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => s.trim().parse::<f64>().ok().and_then(truncate),
        _ => None,
    }
}

fn deserialize_days<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_days))
}

// ---------------------------------------------------------------------------
// Row records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Approved,
    Pending,
}

impl ApprovalStatus {
    pub fn from_approved(approved: bool) -> Self {
        if approved {
            ApprovalStatus::Approved
        } else {
            ApprovalStatus::Pending
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Pending => "pending",
        }
    }

    pub fn translation_key(self) -> &'static str {
        match self {
            ApprovalStatus::Approved => "table.status.approved",
            ApprovalStatus::Pending => "table.status.pendingApproval",
        }
    }
}

/// One displayed table row: an absence merged with its conflict flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowRecord {
    pub id: AbsenceId,
    pub start_date: String,
    pub end_date: String,
    pub days: Option<i64>,
    pub employee_name: String,
    pub approval_status: ApprovalStatus,
    pub absence_type: String,
    #[serde(default)]
    pub has_conflict: bool,
}

impl RowRecord {
    /// Merge an absence with the outcome of its conflict lookup.
    ///
    /// `conflict` is `None` when the lookup failed, which counts as no
    /// conflict.
    pub fn merge(absence: &AbsenceRecord, conflict: Option<&ConflictRecord>) -> Self {
        Self {
            id: absence.id,
            start_date: absence.start_date.clone(),
            end_date: calculate_end_date(&absence.start_date, absence.days),
            days: absence.days,
            employee_name: absence.employee.full_name(),
            approval_status: ApprovalStatus::from_approved(absence.approved),
            absence_type: absence.absence_type.clone(),
            has_conflict: conflict.is_some_and(|c| c.has_conflict),
        }
    }
}

/// Number of rows flagged as conflicting.
pub fn conflict_count(rows: &[RowRecord]) -> usize {
    rows.iter().filter(|r| r.has_conflict).count()
}

/// Typed field selector for [`RowRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowField {
    Id,
    StartDate,
    EndDate,
    Days,
    EmployeeName,
    ApprovalStatus,
    AbsenceType,
    HasConflict,
}

impl FieldKey for RowField {
    fn name(self) -> &'static str {
        match self {
            RowField::Id => "id",
            RowField::StartDate => "startDate",
            RowField::EndDate => "endDate",
            RowField::Days => "days",
            RowField::EmployeeName => "employeeName",
            RowField::ApprovalStatus => "approvalStatus",
            RowField::AbsenceType => "absenceType",
            RowField::HasConflict => "hasConflict",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(RowField::Id),
            "startDate" => Some(RowField::StartDate),
            "endDate" => Some(RowField::EndDate),
            "days" => Some(RowField::Days),
            "employeeName" => Some(RowField::EmployeeName),
            "approvalStatus" => Some(RowField::ApprovalStatus),
            "absenceType" => Some(RowField::AbsenceType),
            "hasConflict" => Some(RowField::HasConflict),
            _ => None,
        }
    }
}

impl TableRow for RowRecord {
    type Field = RowField;

    fn value(&self, field: RowField) -> CellValue {
        match field {
            RowField::Id => self.id.into(),
            RowField::StartDate => self.start_date.as_str().into(),
            RowField::EndDate => self.end_date.as_str().into(),
            RowField::Days => self.days.into(),
            RowField::EmployeeName => self.employee_name.as_str().into(),
            RowField::ApprovalStatus => self.approval_status.as_str().into(),
            RowField::AbsenceType => self.absence_type.as_str().into(),
            RowField::HasConflict => self.has_conflict.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

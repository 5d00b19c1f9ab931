use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier wrapper for employee records.
///
/// Uses UUIDv7 so identifiers sort by creation time and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(Uuid);

impl EmployeeId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EmployeeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for EmployeeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s.trim()).map(Self)
    }
}

/// Closed set of employee kinds, each carrying its own date payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmployeeKind {
    FullTime { begin_date: Option<NaiveDate> },
    Consultant { end_date: Option<NaiveDate> },
}

impl EmployeeKind {
    pub const FULL_TIME_CODE: char = 'F';
    pub const CONSULTANT_CODE: char = 'C';

    pub const fn code(&self) -> char {
        match self {
            EmployeeKind::FullTime { .. } => Self::FULL_TIME_CODE,
            EmployeeKind::Consultant { .. } => Self::CONSULTANT_CODE,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            EmployeeKind::FullTime { .. } => "full_time",
            EmployeeKind::Consultant { .. } => "consultant",
        }
    }

    pub const fn begin_date(&self) -> Option<NaiveDate> {
        match self {
            EmployeeKind::FullTime { begin_date } => *begin_date,
            EmployeeKind::Consultant { .. } => None,
        }
    }

    pub const fn end_date(&self) -> Option<NaiveDate> {
        match self {
            EmployeeKind::FullTime { .. } => None,
            EmployeeKind::Consultant { end_date } => *end_date,
        }
    }
}

/// Caller-facing kind selector used on creation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeKindSelector {
    FullTime,
    Consultant,
}

/// Validated employee aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub base_salary: f64,
    pub kind: EmployeeKind,
}

impl Employee {
    pub fn summary(&self) -> EmployeeSummary {
        EmployeeSummary {
            id: self.id,
            name: self.name.clone(),
            base_salary: self.base_salary,
            start_date: self.kind.begin_date(),
            end_date: self.kind.end_date(),
        }
    }

    pub fn to_record(&self) -> EmployeeRecord {
        EmployeeRecord {
            id: self.id,
            kind_code: self.kind.code(),
            name: self.name.clone(),
            base_salary: self.base_salary,
            begin_date: self.kind.begin_date(),
            end_date: self.kind.end_date(),
        }
    }
}

/// Flat persisted row, one table for both kinds keyed by `kind_code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: EmployeeId,
    pub kind_code: char,
    pub name: String,
    pub base_salary: f64,
    pub begin_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl TryFrom<EmployeeRecord> for Employee {
    type Error = CorruptRecord;

    fn try_from(record: EmployeeRecord) -> Result<Self, Self::Error> {
        let kind = match record.kind_code {
            EmployeeKind::FULL_TIME_CODE => {
                if record.end_date.is_some() {
                    return Err(CorruptRecord::MismatchedPayload {
                        kind_code: record.kind_code,
                        field: "end_date",
                    });
                }
                EmployeeKind::FullTime {
                    begin_date: record.begin_date,
                }
            }
            EmployeeKind::CONSULTANT_CODE => {
                if record.begin_date.is_some() {
                    return Err(CorruptRecord::MismatchedPayload {
                        kind_code: record.kind_code,
                        field: "begin_date",
                    });
                }
                EmployeeKind::Consultant {
                    end_date: record.end_date,
                }
            }
            other => return Err(CorruptRecord::UnknownKind(other)),
        };

        Ok(Employee {
            id: record.id,
            name: record.name,
            base_salary: record.base_salary,
            kind,
        })
    }
}

/// Reasons a stored row cannot be turned back into an [`Employee`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CorruptRecord {
    #[error("there is no employee type: {0}")]
    UnknownKind(char),
    #[error("employee type {kind_code} must not carry {field}")]
    MismatchedPayload {
        kind_code: char,
        field: &'static str,
    },
}

/// Summary returned from create and lookup operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub id: EmployeeId,
    pub name: String,
    pub base_salary: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Computed period salary for a single employee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryResult {
    pub id: EmployeeId,
    pub salary: f64,
}

/// Creation request. The kind may be given explicitly or inferred from the dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeCommand {
    pub name: String,
    pub base_salary: f64,
    #[serde(default)]
    pub kind: Option<EmployeeKindSelector>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Partial update of the mutable fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeCommand {
    pub id: EmployeeId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub base_salary: Option<f64>,
}

/// Salary query inputs; which ones matter depends on the employee kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryQuery {
    pub id: EmployeeId,
    #[serde(default)]
    pub bonus: Option<f64>,
    #[serde(default)]
    pub tax_deduction: Option<f64>,
    #[serde(default)]
    pub nb_worked_hours: Option<i32>,
}

//! Field rules applied to lifecycle commands before the store is touched.

use super::domain::{CreateEmployeeCommand, UpdateEmployeeCommand};

/// A command field that failed one of the validation rules.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("base salary should be greater than 0 (got {value})")]
    NonPositiveSalary { value: f64 },
    #[error("computed salary {value} is not positive; check taxDeduction and bonus")]
    NonPositiveComputedSalary { value: f64 },
    #[error("name should not be empty")]
    BlankName,
    #[error("the employee name should not have numbers: {name:?}")]
    NameContainsDigits { name: String },
    #[error("nbWorkedHours should not be null for a consultant")]
    MissingWorkedHours,
    #[error("nbWorkedHours should be greater than 0 (got {value})")]
    NonPositiveWorkedHours { value: i32 },
    #[error("{field} is not applicable to a {kind} employee")]
    DateNotApplicable {
        kind: &'static str,
        field: &'static str,
    },
}

impl ValidationError {
    /// Name of the request field the caller needs to correct.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NonPositiveSalary { .. } => "baseSalary",
            ValidationError::NonPositiveComputedSalary { .. } => "taxDeduction",
            ValidationError::BlankName | ValidationError::NameContainsDigits { .. } => "name",
            ValidationError::MissingWorkedHours | ValidationError::NonPositiveWorkedHours { .. } => {
                "nbWorkedHours"
            }
            ValidationError::DateNotApplicable { field, .. } => *field,
        }
    }
}

pub fn ensure_positive_salary(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveSalary { value })
    }
}

/// Guards a computed salary before it replaces the stored base salary.
pub fn ensure_positive_computed_salary(value: f64) -> Result<(), ValidationError> {
    ensure_positive_salary(value).map_err(|_| ValidationError::NonPositiveComputedSalary { value })
}

pub fn ensure_name_not_blank(name: &str) -> Result<(), ValidationError> {
    if name.chars().all(char::is_whitespace) {
        return Err(ValidationError::BlankName);
    }
    Ok(())
}

pub fn ensure_name_has_no_digits(name: &str) -> Result<(), ValidationError> {
    if name.chars().any(char::is_numeric) {
        return Err(ValidationError::NameContainsDigits {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Absent and non-positive hours are reported separately.
pub fn ensure_worked_hours(hours: Option<i32>) -> Result<u32, ValidationError> {
    match hours {
        None => Err(ValidationError::MissingWorkedHours),
        Some(value) if value <= 0 => Err(ValidationError::NonPositiveWorkedHours { value }),
        Some(value) => Ok(value.unsigned_abs()),
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    ensure_name_not_blank(name)?;
    ensure_name_has_no_digits(name)
}

/// Salary first, then the name rules, mirroring the update order.
pub fn validate_update(command: &UpdateEmployeeCommand) -> Result<(), ValidationError> {
    if let Some(salary) = command.base_salary {
        ensure_positive_salary(salary)?;
    }
    if let Some(name) = command.name.as_deref() {
        validate_name(name)?;
    }
    Ok(())
}

pub fn validate_create(command: &CreateEmployeeCommand) -> Result<(), ValidationError> {
    ensure_positive_salary(command.base_salary)?;
    validate_name(&command.name)
}

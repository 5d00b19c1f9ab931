//! Period salary computation for both employee kinds.

use super::domain::{EmployeeKind, SalaryQuery};
use super::validation::{ensure_worked_hours, ValidationError};

/// Full-time salaries are computed on a fixed 30-day period.
pub const FULL_TIME_PERIOD_DAYS: f64 = 30.0;

/// Optional inputs to a salary computation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SalaryInputs {
    pub bonus: Option<f64>,
    pub tax_deduction: Option<f64>,
    pub nb_worked_hours: Option<i32>,
}

impl From<&SalaryQuery> for SalaryInputs {
    fn from(query: &SalaryQuery) -> Self {
        Self {
            bonus: query.bonus,
            tax_deduction: query.tax_deduction,
            nb_worked_hours: query.nb_worked_hours,
        }
    }
}

/// Compute the salary for one period without touching any stored state.
///
/// Full-time: `(base - tax_deduction) * 30 + bonus`, with missing inputs treated as 0.
/// Consultant: `base * nb_worked_hours`; hours are required and must be positive.
pub fn compute(
    kind: &EmployeeKind,
    base_salary: f64,
    inputs: SalaryInputs,
) -> Result<f64, ValidationError> {
    match kind {
        EmployeeKind::FullTime { .. } => {
            let deduction = inputs.tax_deduction.unwrap_or(0.0);
            let bonus = inputs.bonus.unwrap_or(0.0);
            Ok((base_salary - deduction) * FULL_TIME_PERIOD_DAYS + bonus)
        }
        EmployeeKind::Consultant { .. } => {
            let hours = ensure_worked_hours(inputs.nb_worked_hours)?;
            Ok(base_salary * f64::from(hours))
        }
    }
}

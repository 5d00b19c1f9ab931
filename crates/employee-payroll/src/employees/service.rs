use std::sync::Arc;

use tracing::{debug, error, info};

use super::domain::{
    CorruptRecord, CreateEmployeeCommand, Employee, EmployeeId, EmployeeKind,
    EmployeeKindSelector, EmployeeSummary, SalaryQuery, SalaryResult, UpdateEmployeeCommand,
};
use super::repository::{EmployeeRepository, RepositoryError};
use super::salary::{self, SalaryInputs};
use super::validation::{self, ValidationError};
use crate::config::PayrollPolicy;

/// How the kind of a new employee was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindResolution {
    Explicit,
    InferredFromStartDate,
    InferredFromEndDate,
    /// Neither a kind nor any date was supplied.
    DefaultedToConsultant,
}

/// Decide the kind of a new employee from the creation command.
pub fn resolve_kind(
    command: &CreateEmployeeCommand,
) -> Result<(EmployeeKind, KindResolution), ValidationError> {
    match (command.kind, command.start_date, command.end_date) {
        (Some(EmployeeKindSelector::FullTime), _, Some(_)) => {
            Err(ValidationError::DateNotApplicable {
                kind: "full_time",
                field: "endDate",
            })
        }
        (Some(EmployeeKindSelector::FullTime), begin_date, None) => Ok((
            EmployeeKind::FullTime { begin_date },
            KindResolution::Explicit,
        )),
        (Some(EmployeeKindSelector::Consultant), Some(_), _) => {
            Err(ValidationError::DateNotApplicable {
                kind: "consultant",
                field: "startDate",
            })
        }
        (Some(EmployeeKindSelector::Consultant), None, end_date) => Ok((
            EmployeeKind::Consultant { end_date },
            KindResolution::Explicit,
        )),
        (None, Some(begin_date), _) => Ok((
            EmployeeKind::FullTime {
                begin_date: Some(begin_date),
            },
            KindResolution::InferredFromStartDate,
        )),
        (None, None, Some(end_date)) => Ok((
            EmployeeKind::Consultant {
                end_date: Some(end_date),
            },
            KindResolution::InferredFromEndDate,
        )),
        (None, None, None) => Ok((
            EmployeeKind::Consultant { end_date: None },
            KindResolution::DefaultedToConsultant,
        )),
    }
}

/// Lifecycle and salary operations over an injected employee store.
pub struct EmployeeService<R> {
    repository: Arc<R>,
    policy: PayrollPolicy,
}

impl<R> EmployeeService<R>
where
    R: EmployeeRepository + 'static,
{
    pub fn new(repository: Arc<R>, policy: PayrollPolicy) -> Self {
        Self { repository, policy }
    }

    pub fn policy(&self) -> &PayrollPolicy {
        &self.policy
    }

    /// Create a full-time employee or consultant and persist it once.
    pub fn create(
        &self,
        command: CreateEmployeeCommand,
    ) -> Result<EmployeeSummary, EmployeeServiceError> {
        if self.policy.validate_on_create {
            validation::validate_create(&command)?;
        }

        let (kind, resolution) = resolve_kind(&command)?;
        if resolution == KindResolution::DefaultedToConsultant {
            debug!("no kind or dates supplied, creating consultant without end date");
        }

        let employee = Employee {
            id: EmployeeId::new(),
            name: command.name,
            base_salary: command.base_salary,
            kind,
        };

        self.repository.insert(employee.to_record())?;
        info!(
            employee_id = %employee.id,
            kind = employee.kind.label(),
            ?resolution,
            "employee created"
        );

        Ok(employee.summary())
    }

    /// Apply a partial update of name and/or base salary.
    pub fn update(&self, command: UpdateEmployeeCommand) -> Result<(), EmployeeServiceError> {
        validation::validate_update(&command)?;

        let mut employee = self.load(&command.id)?;

        if let Some(base_salary) = command.base_salary {
            employee.base_salary = base_salary;
        }
        if let Some(name) = command.name {
            employee.name = name;
        }

        self.repository
            .update(employee.to_record())
            .map_err(vanished_as_not_found(employee.id))?;
        info!(employee_id = %employee.id, "employee updated");
        Ok(())
    }

    pub fn delete(&self, id: &EmployeeId) -> Result<(), EmployeeServiceError> {
        if !self.repository.exists(id)? {
            return Err(EmployeeServiceError::NotFound { id: *id });
        }

        self.repository
            .delete(id)
            .map_err(vanished_as_not_found(*id))?;
        info!(employee_id = %id, "employee deleted");
        Ok(())
    }

    pub fn get(&self, id: &EmployeeId) -> Result<EmployeeSummary, EmployeeServiceError> {
        self.load(id).map(|employee| employee.summary())
    }

    /// Compute the period salary. Only persists the result when the policy asks for it.
    pub fn compute_salary(&self, query: SalaryQuery) -> Result<SalaryResult, EmployeeServiceError> {
        if self.policy.persist_computed_salary {
            return self.compute_and_persist_salary(query);
        }

        let employee = self.load(&query.id)?;
        let salary = salary::compute(
            &employee.kind,
            employee.base_salary,
            SalaryInputs::from(&query),
        )?;
        debug!(employee_id = %employee.id, salary, "salary computed");

        Ok(SalaryResult {
            id: employee.id,
            salary,
        })
    }

    /// Compute the period salary and overwrite the stored base salary with it.
    pub fn compute_and_persist_salary(
        &self,
        query: SalaryQuery,
    ) -> Result<SalaryResult, EmployeeServiceError> {
        let mut employee = self.load(&query.id)?;
        let salary = salary::compute(
            &employee.kind,
            employee.base_salary,
            SalaryInputs::from(&query),
        )?;
        validation::ensure_positive_computed_salary(salary)?;

        employee.base_salary = salary;
        self.repository
            .update(employee.to_record())
            .map_err(vanished_as_not_found(employee.id))?;
        info!(employee_id = %employee.id, salary, "computed salary stored as base salary");

        Ok(SalaryResult {
            id: employee.id,
            salary,
        })
    }

    fn load(&self, id: &EmployeeId) -> Result<Employee, EmployeeServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(EmployeeServiceError::NotFound { id: *id })?;

        Employee::try_from(record).map_err(|source| {
            error!(employee_id = %id, %source, "stored employee record is corrupt");
            EmployeeServiceError::InvalidData { id: *id, source }
        })
    }
}

/// A row removed between the read and the write of a request is reported like
/// any other unknown id.
fn vanished_as_not_found(
    id: EmployeeId,
) -> impl FnOnce(RepositoryError) -> EmployeeServiceError {
    move |err| match err {
        RepositoryError::NotFound => EmployeeServiceError::NotFound { id },
        other => EmployeeServiceError::Repository(other),
    }
}

/// Error raised by the employee service.
#[derive(Debug, thiserror::Error)]
pub enum EmployeeServiceError {
    #[error("employee with id {id} not found")]
    NotFound { id: EmployeeId },
    #[error(transparent)]
    InvalidArgument(#[from] ValidationError),
    #[error("employee {id} has invalid stored data: {source}")]
    InvalidData {
        id: EmployeeId,
        #[source]
        source: CorruptRecord,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl EmployeeServiceError {
    /// Whether the caller can fix the request and retry.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            EmployeeServiceError::NotFound { .. } | EmployeeServiceError::InvalidArgument(_)
        )
    }
}

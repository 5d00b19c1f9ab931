//! Employee lifecycle (create, update, delete) and period salary computation.
//!
//! Full-time employees and consultants share one record shape in storage and are
//! discriminated by [`EmployeeKind`] once loaded. Validation runs before any store
//! mutation so a failed request never leaves a partial write behind.

pub mod domain;
pub mod repository;
pub mod router;
pub mod salary;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    CorruptRecord, CreateEmployeeCommand, Employee, EmployeeId, EmployeeKind,
    EmployeeKindSelector, EmployeeRecord, EmployeeSummary, SalaryQuery, SalaryResult,
    UpdateEmployeeCommand,
};
pub use repository::{EmployeeRepository, InMemoryEmployeeRepository, RepositoryError};
pub use router::employee_router;
pub use salary::{SalaryInputs, FULL_TIME_PERIOD_DAYS};
pub use service::{resolve_kind, EmployeeService, EmployeeServiceError, KindResolution};
pub use validation::ValidationError;

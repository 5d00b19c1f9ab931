use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::config::PayrollPolicy;
use crate::employees::domain::{
    CreateEmployeeCommand, EmployeeId, EmployeeKindSelector, EmployeeRecord,
};
use crate::employees::repository::{EmployeeRepository, RepositoryError};
use crate::employees::{employee_router, EmployeeService};

pub(super) fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).expect("valid date")
}

pub(super) fn end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 31).expect("valid date")
}

pub(super) fn full_time_command(base_salary: f64) -> CreateEmployeeCommand {
    CreateEmployeeCommand {
        name: "John Doe".to_string(),
        base_salary,
        kind: None,
        start_date: Some(start_date()),
        end_date: None,
    }
}

pub(super) fn consultant_command(base_salary: f64) -> CreateEmployeeCommand {
    CreateEmployeeCommand {
        name: "Jane Doe".to_string(),
        base_salary,
        kind: Some(EmployeeKindSelector::Consultant),
        start_date: None,
        end_date: Some(end_date()),
    }
}

pub(super) fn build_service() -> (EmployeeService<MemoryRepository>, Arc<MemoryRepository>) {
    build_service_with(PayrollPolicy::default())
}

pub(super) fn build_service_with(
    policy: PayrollPolicy,
) -> (EmployeeService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = EmployeeService::new(repository.clone(), policy);
    (service, repository)
}

/// Counts writes so tests can assert that failed requests never reach the store.
#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<EmployeeId, EmployeeRecord>>>,
    writes: Arc<Mutex<usize>>,
}

impl MemoryRepository {
    pub(super) fn writes(&self) -> usize {
        *self.writes.lock().expect("write counter poisoned")
    }

    pub(super) fn record(&self, id: &EmployeeId) -> Option<EmployeeRecord> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .get(id)
            .cloned()
    }

    pub(super) fn seed(&self, record: EmployeeRecord) {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .insert(record.id, record);
    }

    fn count_write(&self) {
        *self.writes.lock().expect("write counter poisoned") += 1;
    }
}

impl EmployeeRepository for MemoryRepository {
    fn insert(&self, record: EmployeeRecord) -> Result<EmployeeRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id, record.clone());
        self.count_write();
        Ok(record)
    }

    fn update(&self, record: EmployeeRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.id, record);
        self.count_write();
        Ok(())
    }

    fn fetch(&self, id: &EmployeeId) -> Result<Option<EmployeeRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &EmployeeId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id);
        self.count_write();
        Ok(())
    }

    fn exists(&self, id: &EmployeeId) -> Result<bool, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.contains_key(id))
    }
}

/// Removes the row right before every update or delete, as a concurrent delete would.
#[derive(Default, Clone)]
pub(super) struct VanishingRepository {
    inner: MemoryRepository,
}

impl VanishingRepository {
    pub(super) fn inner(&self) -> &MemoryRepository {
        &self.inner
    }

    fn vanish(&self, id: &EmployeeId) -> RepositoryError {
        self.inner
            .records
            .lock()
            .expect("repository mutex poisoned")
            .remove(id);
        RepositoryError::NotFound
    }
}

impl EmployeeRepository for VanishingRepository {
    fn insert(&self, record: EmployeeRecord) -> Result<EmployeeRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn update(&self, record: EmployeeRecord) -> Result<(), RepositoryError> {
        Err(self.vanish(&record.id))
    }

    fn fetch(&self, id: &EmployeeId) -> Result<Option<EmployeeRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn delete(&self, id: &EmployeeId) -> Result<(), RepositoryError> {
        Err(self.vanish(id))
    }

    fn exists(&self, id: &EmployeeId) -> Result<bool, RepositoryError> {
        self.inner.exists(id)
    }
}

pub(super) fn build_vanishing_service() -> (
    EmployeeService<VanishingRepository>,
    Arc<VanishingRepository>,
) {
    let repository = Arc::new(VanishingRepository::default());
    let service = EmployeeService::new(repository.clone(), PayrollPolicy::default());
    (service, repository)
}

pub(super) struct UnavailableRepository;

impl EmployeeRepository for UnavailableRepository {
    fn insert(&self, _record: EmployeeRecord) -> Result<EmployeeRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: EmployeeRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &EmployeeId) -> Result<Option<EmployeeRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: &EmployeeId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn exists(&self, _id: &EmployeeId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn corrupt_record(kind_code: char) -> EmployeeRecord {
    EmployeeRecord {
        id: EmployeeId::new(),
        kind_code,
        name: "Corrupt Row".to_string(),
        base_salary: 100.0,
        begin_date: None,
        end_date: None,
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(service: EmployeeService<MemoryRepository>) -> axum::Router {
    employee_router(Arc::new(service))
}

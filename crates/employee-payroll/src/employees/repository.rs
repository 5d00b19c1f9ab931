use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{EmployeeId, EmployeeRecord};

/// Storage abstraction so the service can be exercised against any keyed store.
///
/// Each call is expected to be atomic for the single record it touches.
pub trait EmployeeRepository: Send + Sync {
    fn insert(&self, record: EmployeeRecord) -> Result<EmployeeRecord, RepositoryError>;
    fn update(&self, record: EmployeeRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &EmployeeId) -> Result<Option<EmployeeRecord>, RepositoryError>;
    fn delete(&self, id: &EmployeeId) -> Result<(), RepositoryError>;
    fn exists(&self, id: &EmployeeId) -> Result<bool, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store backed by a mutex-guarded map.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEmployeeRepository {
    records: Arc<Mutex<HashMap<EmployeeId, EmployeeRecord>>>,
}

impl InMemoryEmployeeRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<EmployeeId, EmployeeRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("employee store mutex poisoned".to_string()))
    }

    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.lock()?.is_empty())
    }
}

impl EmployeeRepository for InMemoryEmployeeRepository {
    fn insert(&self, record: EmployeeRecord) -> Result<EmployeeRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id, record.clone());
        Ok(record)
    }

    fn update(&self, record: EmployeeRecord) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        match guard.get_mut(&record.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &EmployeeId) -> Result<Option<EmployeeRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &EmployeeId) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn exists(&self, id: &EmployeeId) -> Result<bool, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.contains_key(id))
    }
}

// src/infrastructure/memory.rs
use crate::application::{KeyValueStore, WriteOp};
use crate::domain::DomainError;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::instrument;

/// Process-local store. Contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, DomainError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, String>>, DomainError> {
        self.entries
            .read()
            .map_err(|_| DomainError::Storage("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, String>>, DomainError> {
        self.entries
            .write()
            .map_err(|_| DomainError::Storage("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    #[instrument(level = "trace", skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.read()?.get(key).cloned())
    }

    #[instrument(level = "trace", skip(self, value))]
    fn put(&self, key: &str, value: &str) -> Result<(), DomainError> {
        if value.is_empty() {
            return Err(DomainError::EmptyValue(key.to_string()));
        }
        self.write()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    #[instrument(level = "trace", skip(self))]
    fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.write()?.remove(key);
        Ok(())
    }

    /// Validates every operation, then applies them under one write lock.
    fn write_batch(&self, ops: &[WriteOp]) -> Result<(), DomainError> {
        if let Some(WriteOp::Put { key, .. }) = ops
            .iter()
            .find(|op| matches!(op, WriteOp::Put { value, .. } if value.is_empty()))
        {
            return Err(DomainError::EmptyValue(key.clone()));
        }

        let mut entries = self.write()?;
        for op in ops {
            match op {
                WriteOp::Put { key, value } => {
                    entries.insert(key.clone(), value.clone());
                }
                WriteOp::Delete { key } => {
                    entries.remove(key);
                }
            }
        }
        Ok(())
    }
}

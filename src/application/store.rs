// src/application/store.rs
use crate::domain::DomainError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// One write inside a [`KeyValueStore::write_batch`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    Put { key: String, value: String },
    Delete { key: String },
}

/// String-keyed backing store for pads and notes.
///
/// Implementations must refuse empty values with [`DomainError::EmptyValue`].
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    fn put(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), DomainError>;

    /// Apply several writes together.
    ///
    /// Backends with transactions apply all or nothing. The default applies the
    /// operations one after another and stops at the first failure.
    fn write_batch(&self, ops: &[WriteOp]) -> Result<(), DomainError> {
        for op in ops {
            match op {
                WriteOp::Put { key, value } => self.put(key, value)?,
                WriteOp::Delete { key } => self.delete(key)?,
            }
        }
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), DomainError> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), DomainError> {
        (**self).delete(key)
    }

    fn write_batch(&self, ops: &[WriteOp]) -> Result<(), DomainError> {
        (**self).write_batch(ops)
    }
}

/// Typed JSON access on top of any store.
pub trait StoreExt: KeyValueStore {
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DomainError> {
        match self.get(key)? {
            None => Ok(None),
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| DomainError::CorruptRecord {
                    key: key.to_string(),
                    reason: e.to_string(),
                }),
        }
    }

    fn put_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), DomainError> {
        let raw = to_json(key, value)?;
        self.put(key, &raw)
    }
}

impl<S: KeyValueStore + ?Sized> StoreExt for S {}

pub(crate) fn to_json<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<String, DomainError> {
    serde_json::to_string(value).map_err(|e| DomainError::CorruptRecord {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryStore;

    #[test]
    fn given_json_value_when_round_tripping_then_returns_same_value() {
        let store = MemoryStore::new();

        store.put_json("k", &vec![1, 2, 3]).unwrap();
        let value: Option<Vec<i32>> = store.get_json("k").unwrap();

        assert_eq!(value, Some(vec![1, 2, 3]));
    }

    #[test]
    fn given_non_json_value_when_reading_json_then_returns_corrupt_record() {
        let store = MemoryStore::new();
        store.put("k", "not json").unwrap();

        let result: Result<Option<Vec<i32>>, _> = store.get_json("k");

        assert!(matches!(result, Err(DomainError::CorruptRecord { key, .. }) if key == "k"));
    }

    #[test]
    fn given_missing_key_when_reading_json_then_returns_none() {
        let store = MemoryStore::new();

        let value: Option<Vec<i32>> = store.get_json("missing").unwrap();

        assert!(value.is_none());
    }
}

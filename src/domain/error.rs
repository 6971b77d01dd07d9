// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Note not found: {0}")]
    NoteNotFound(String),
    #[error("Payload too large: {size} bytes exceeds limit of {limit} bytes")]
    PayloadTooLarge { size: usize, limit: usize },
    #[error("Invalid id: {0:?}")]
    InvalidId(String),
    #[error("Refusing to store empty value for key {0}")]
    EmptyValue(String),
    #[error("Corrupt record at {key}: {reason}")]
    CorruptRecord { key: String, reason: String },
    #[error("Storage error: {0}")]
    Storage(String),
}

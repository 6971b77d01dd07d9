// src/infrastructure/mod.rs
pub mod config;
pub mod memory;
pub mod sqlite;

pub use config::{Config, StorageBackend};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

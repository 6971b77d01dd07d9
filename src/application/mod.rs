// src/application/mod.rs
pub mod note_service;
pub mod pad_service;
pub mod store;

pub use note_service::NoteService;
pub use pad_service::PadService;
pub use store::{KeyValueStore, StoreExt, WriteOp};

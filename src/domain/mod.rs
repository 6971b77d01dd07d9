// src/domain/mod.rs
pub mod error;
pub mod id;
pub mod note;

pub use error::DomainError;
pub use note::{Note, NoteDraft, NotePatch, Pad, DEFAULT_NOTE_TITLE};

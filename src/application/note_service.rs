// src/application/note_service.rs
use crate::application::store::{to_json, StoreExt, WriteOp};
use crate::application::KeyValueStore;
use crate::constants::{note_key, MAX_CONTENT_BYTES, NOTES_LIST_KEY};
use crate::domain::id::generate_note_id;
use crate::domain::{DomainError, Note, NoteDraft, NotePatch};
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, instrument};

/// CRUD over the multi-note variant.
///
/// Every note lives twice in the store: under `note:{id}` and inside the
/// `notes:all` list. Both copies are written in one batch, and the
/// read-modify-write of the list is serialized by `list_lock`.
pub struct NoteService<S: KeyValueStore> {
    store: S,
    max_record_bytes: usize,
    list_lock: Mutex<()>,
}

impl<S: KeyValueStore> NoteService<S> {
    pub fn new(store: S) -> Self {
        Self::with_limit(store, MAX_CONTENT_BYTES)
    }

    pub fn with_limit(store: S, max_record_bytes: usize) -> Self {
        Self {
            store,
            max_record_bytes,
            list_lock: Mutex::new(()),
        }
    }

    /// All notes, most recently updated first.
    #[instrument(level = "debug", skip(self))]
    pub fn list(&self) -> Result<Vec<Note>, DomainError> {
        let mut notes = self.read_list()?;
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        debug!(count = notes.len(), "Listed notes");
        Ok(notes)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn get(&self, id: &str) -> Result<Note, DomainError> {
        self.store
            .get_json::<Note>(&note_key(id))?
            .ok_or_else(|| DomainError::NoteNotFound(id.to_string()))
    }

    #[instrument(level = "debug", skip(self, draft))]
    pub fn create(&self, draft: NoteDraft) -> Result<Note, DomainError> {
        let _guard = self.lock_list()?;

        let note = Note::from_draft(generate_note_id(), draft, Utc::now());
        let key = note_key(&note.id);
        let record = self.encode_record(&key, &note)?;

        let mut notes = self.read_list()?;
        notes.push(note.clone());

        self.store.write_batch(&[
            WriteOp::Put { key, value: record },
            WriteOp::Put {
                key: NOTES_LIST_KEY.to_string(),
                value: to_json(NOTES_LIST_KEY, &notes)?,
            },
        ])?;

        info!(note_id = %note.id, "Created note");
        Ok(note)
    }

    /// Merge `patch` into an existing note.
    ///
    /// A note missing from the list but present under its own key is appended
    /// to the list again.
    #[instrument(level = "debug", skip(self, patch))]
    pub fn update(&self, id: &str, patch: NotePatch) -> Result<Note, DomainError> {
        let _guard = self.lock_list()?;

        let mut note = self.get(id)?;
        note.apply(patch, Utc::now());
        let key = note_key(id);
        let record = self.encode_record(&key, &note)?;

        let mut notes = self.read_list()?;
        match notes.iter_mut().find(|n| n.id == id) {
            Some(slot) => *slot = note.clone(),
            None => {
                debug!(note_id = id, "Note missing from list, appending");
                notes.push(note.clone());
            }
        }

        self.store.write_batch(&[
            WriteOp::Put { key, value: record },
            WriteOp::Put {
                key: NOTES_LIST_KEY.to_string(),
                value: to_json(NOTES_LIST_KEY, &notes)?,
            },
        ])?;

        info!(note_id = id, "Updated note");
        Ok(note)
    }

    /// Remove a note from both its own key and the list.
    ///
    /// Fails with `NoteNotFound` only when neither copy exists.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&self, id: &str) -> Result<(), DomainError> {
        let _guard = self.lock_list()?;

        let key = note_key(id);
        let has_record = self.store.get(&key)?.is_some();

        let mut notes = self.read_list()?;
        let before = notes.len();
        notes.retain(|n| n.id != id);
        let in_list = notes.len() < before;

        if !has_record && !in_list {
            debug!(note_id = id, "Note not found for deletion");
            return Err(DomainError::NoteNotFound(id.to_string()));
        }

        self.store.write_batch(&[
            WriteOp::Delete { key },
            WriteOp::Put {
                key: NOTES_LIST_KEY.to_string(),
                value: to_json(NOTES_LIST_KEY, &notes)?,
            },
        ])?;

        info!(note_id = id, "Deleted note");
        Ok(())
    }

    fn read_list(&self) -> Result<Vec<Note>, DomainError> {
        Ok(self
            .store
            .get_json::<Vec<Note>>(NOTES_LIST_KEY)?
            .unwrap_or_default())
    }

    fn encode_record(&self, key: &str, note: &Note) -> Result<String, DomainError> {
        let record = to_json(key, note)?;
        if record.len() > self.max_record_bytes {
            return Err(DomainError::PayloadTooLarge {
                size: record.len(),
                limit: self.max_record_bytes,
            });
        }
        Ok(record)
    }

    fn lock_list(&self) -> Result<MutexGuard<'_, ()>, DomainError> {
        self.list_lock
            .lock()
            .map_err(|_| DomainError::Storage("note list lock poisoned".to_string()))
    }
}

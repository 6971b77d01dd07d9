// src/application/pad_service.rs
use crate::application::KeyValueStore;
use crate::constants::{pad_key, EMPTY_CONTENT_PLACEHOLDER, MAX_CONTENT_BYTES};
use crate::domain::{DomainError, Pad};
use crate::util::text::is_blank_markup;
use tracing::{debug, info, instrument};

/// Loads and saves single-pad content.
pub struct PadService<S: KeyValueStore> {
    store: S,
    max_content_bytes: usize,
}

impl<S: KeyValueStore> PadService<S> {
    pub fn new(store: S) -> Self {
        Self::with_limit(store, MAX_CONTENT_BYTES)
    }

    pub fn with_limit(store: S, max_content_bytes: usize) -> Self {
        Self {
            store,
            max_content_bytes,
        }
    }

    /// Stored content for `id`, or an empty string for a pad nobody wrote yet.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, id: &str) -> Result<Pad, DomainError> {
        let content = self.store.get(&pad_key(id))?.unwrap_or_default();
        debug!(pad_id = id, bytes = content.len(), "Loaded pad");
        Ok(Pad {
            id: id.to_string(),
            content,
        })
    }

    /// Upsert pad content.
    ///
    /// Blank markup is stored as a single space. The size check runs after that
    /// substitution and counts UTF-8 bytes.
    #[instrument(level = "debug", skip(self, content), fields(bytes = content.len()))]
    pub fn save(&self, id: &str, content: &str) -> Result<(), DomainError> {
        if id.is_empty() {
            return Err(DomainError::InvalidId(id.to_string()));
        }

        let content = if is_blank_markup(content) {
            EMPTY_CONTENT_PLACEHOLDER
        } else {
            content
        };

        let size = content.len();
        if size > self.max_content_bytes {
            info!(pad_id = id, size, "Rejected oversized pad");
            return Err(DomainError::PayloadTooLarge {
                size,
                limit: self.max_content_bytes,
            });
        }

        self.store.put(&pad_key(id), content)?;
        info!(pad_id = id, size, "Saved pad");
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn clear(&self, id: &str) -> Result<(), DomainError> {
        self.store.delete(&pad_key(id))?;
        info!(pad_id = id, "Cleared pad");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryStore;
    use crate::util::testing::MockStore;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t")]
    #[case("<br>")]
    #[case("<br><br/>  <BR />")]
    fn given_blank_content_when_saving_then_stores_single_space(#[case] content: &str) {
        // Arrange
        let service = PadService::new(MemoryStore::new());

        // Act
        service.save("abc", content).expect("Save should succeed");

        // Assert
        assert_eq!(service.load("abc").unwrap().content, " ");
    }

    #[test]
    fn given_content_when_saving_and_loading_then_returns_it_unchanged() {
        let service = PadService::new(MemoryStore::new());
        let content = "<div>hello</div><img src=\"data:image/jpeg;base64,AAAA\"><br>";

        service.save("abc", content).unwrap();

        assert_eq!(service.load("abc").unwrap().content, content);
    }

    #[test]
    fn given_unknown_pad_when_loading_then_returns_empty_content() {
        let service = PadService::new(MemoryStore::new());

        let pad = service.load("zzz").expect("Load should succeed");

        assert_eq!(pad.id, "zzz");
        assert_eq!(pad.content, "");
    }

    #[test]
    fn given_oversized_content_when_saving_then_rejects_and_stores_nothing() {
        // Arrange
        let service = PadService::with_limit(MemoryStore::new(), 10);

        // Act
        let result = service.save("abc", "12345678901");

        // Assert
        match result {
            Err(DomainError::PayloadTooLarge { size, limit }) => {
                assert_eq!(size, 11);
                assert_eq!(limit, 10);
            }
            other => panic!("Expected PayloadTooLarge, got {other:?}"),
        }
        assert_eq!(service.load("abc").unwrap().content, "");
    }

    #[test]
    fn given_content_at_limit_when_saving_then_succeeds() {
        let service = PadService::with_limit(MemoryStore::new(), 10);

        assert!(service.save("abc", "1234567890").is_ok());
    }

    #[test]
    fn given_multibyte_content_when_saving_then_limit_counts_bytes() {
        let service = PadService::with_limit(MemoryStore::new(), 5);

        // two characters, six bytes
        let result = service.save("abc", "笔记");

        assert!(matches!(result, Err(DomainError::PayloadTooLarge { size: 6, .. })));
    }

    #[test]
    fn given_empty_id_when_saving_then_returns_invalid_id() {
        let service = PadService::new(MemoryStore::new());

        assert!(matches!(service.save("", "x"), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn given_failing_store_when_saving_then_propagates_storage_error() {
        let mock = MockStore::builder().with_failing_writes().build();
        let service = PadService::new(mock);

        let result = service.save("abc", "hello");

        assert!(matches!(result, Err(DomainError::Storage(_))));
    }

    #[test]
    fn given_saved_pad_when_clearing_then_loads_empty() {
        let service = PadService::new(MemoryStore::new());
        service.save("abc", "hello").unwrap();

        service.clear("abc").unwrap();

        assert_eq!(service.load("abc").unwrap().content, "");
    }
}

// src/domain/note.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title given to notes created without one.
pub const DEFAULT_NOTE_TITLE: &str = "Untitled";

/// Single editable page bound to a short id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pad {
    pub id: String,
    pub content: String,
}

/// Record of the multi-note variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Base64 data URIs in display order
    #[serde(default)]
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a note. Anything else in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub images: Option<Vec<String>>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub images: Option<Vec<String>>,
}

impl Note {
    pub fn from_draft(id: String, draft: NoteDraft, now: DateTime<Utc>) -> Self {
        let title = draft
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_NOTE_TITLE.to_string());

        Self {
            id,
            title,
            content: draft.content.unwrap_or_default(),
            images: draft.images.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a patch into this note and stamp `updated_at`.
    ///
    /// An empty title is treated like a missing one, while empty content and an
    /// empty image list replace the stored values.
    pub fn apply(&mut self, patch: NotePatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title.filter(|t| !t.is_empty()) {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        self.updated_at = now;
    }
}

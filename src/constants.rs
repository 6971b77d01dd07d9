// src/constants.rs
//
// Application-wide constants. Values that operators may tune are only the
// defaults here; the effective values come from `infrastructure::config`.

/// Upper bound for a stored pad or note record, in bytes of UTF-8.
///
/// The hosted store this service was modelled on refuses values near 2MB, so
/// the limit sits a little below that.
///
/// Used in: `application/pad_service.rs`, `application/note_service.rs`
pub const MAX_CONTENT_BYTES: usize = 1_900_000;

/// Value stored in place of blank pad content. The store refuses empty values.
///
/// Used in: `application/pad_service.rs`
pub const EMPTY_CONTENT_PLACEHOLDER: &str = " ";

/// Largest request body accepted by the HTTP layer.
///
/// Must stay above `MAX_CONTENT_BYTES` plus JSON overhead so that oversized
/// pads are reported by the save handler and not cut off by the body limit.
pub const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Key prefix for single-pad content.
pub const PAD_KEY_PREFIX: &str = "pad:";

/// Key prefix for individual multi-note records.
pub const NOTE_KEY_PREFIX: &str = "note:";

/// Key of the aggregate list holding every multi-note record.
pub const NOTES_LIST_KEY: &str = "notes:all";

/// Delay after the last keystroke before the editor saves.
pub const SAVE_DEBOUNCE_MS: u64 = 1000;

/// Pasted images wider than this are scaled down before embedding.
pub const MAX_IMAGE_WIDTH: u32 = 800;

/// JPEG quality used when re-encoding pasted images.
pub const JPEG_QUALITY: f64 = 0.6;

/// Largest data URI the editor will embed for one image.
pub const MAX_IMAGE_BYTES: usize = 1_900_000;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";

pub fn pad_key(id: &str) -> String {
    format!("{PAD_KEY_PREFIX}{id}")
}

pub fn note_key(id: &str) -> String {
    format!("{NOTE_KEY_PREFIX}{id}")
}

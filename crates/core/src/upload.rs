//! Upload validation rules.
//!
//! Checks run in a fixed order: extension first, then size. The extension
//! is returned normalized (lowercase, with leading dot) so callers can build
//! the stored filename from it.

use std::path::Path;

use crate::error::CoreError;

/// Accepted media extensions, lowercase with leading dot.
pub const ALLOWED_EXTENSIONS: &[&str] = &[".mp3", ".wav", ".mp4", ".mov"];

/// Default maximum upload size (100 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

/// Extract the lowercase extension (with leading dot) from a user-supplied
/// filename. Returns an empty string when there is none.
pub fn extension_of(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

/// Validate an incoming upload and return its normalized extension.
pub fn validate_upload(original_name: &str, size: u64, max_bytes: u64) -> Result<String, CoreError> {
    let ext = extension_of(original_name);
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CoreError::UnsupportedFormat(ext));
    }
    if size > max_bytes {
        return Err(CoreError::FileTooLarge {
            size,
            limit: max_bytes,
        });
    }
    Ok(ext)
}

/// Name under which an upload is persisted: `{id}{ext}`.
pub fn stored_filename(id: &str, ext: &str) -> String {
    format!("{id}{ext}")
}

//! Image type detection by file extension.

use std::path::Path;

/// Lower-cased extension of `path`, or an empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Detect MIME type from a file extension.
pub fn mime_from_extension(ext: &str) -> String {
    mime_guess::from_ext(ext)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string()
}

/// Whether flashcard viewers display this image type without conversion.
pub fn is_viewer_friendly(ext: &str) -> bool {
    matches!(
        mime_from_extension(ext).as_str(),
        "image/png" | "image/jpeg" | "image/gif"
    )
}

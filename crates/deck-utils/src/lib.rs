//! Shared helpers: text decoding, line normalization, and file housekeeping.

pub mod encoding;
pub mod files;
pub mod mime;
pub mod text;

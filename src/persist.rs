//! Writing fetched documents to disk
//!
//! Output is pretty-printed JSON with two-space indentation. Non-ASCII text is
//! written as UTF-8 rather than escaped, and existing files are overwritten.

use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when saving a document
#[derive(Debug, Error)]
pub enum PersistError {
    /// The value could not be serialized
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Directory creation or file write failed
    #[error("failed to write file: {0}")]
    Io(#[from] std::io::Error),
}

/// Saves `data` as indented JSON at `path`
///
/// Missing parent directories are created first.
///
/// # Returns
/// * `Ok(())` on success
/// * `Err(PersistError)` if serialization, directory creation or writing fails
pub fn save<T: Serialize + ?Sized>(data: &T, path: &Path) -> Result<(), PersistError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    Ok(())
}

//! Plain text I/O

use crate::{Error, NormalizedPath, Result};
use std::fs;
use std::io::ErrorKind;

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read text content from a file, returning `None` if it does not exist.
///
/// Any other I/O failure (permissions, a directory in place of the file)
/// is still an error.
pub fn read_text_if_exists(path: &NormalizedPath) -> Result<Option<String>> {
    let native_path = path.to_native();
    match fs::read_to_string(&native_path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::trace!(path = %path, "File not present");
            Ok(None)
        }
        Err(e) => Err(Error::io(&native_path, e)),
    }
}

/// Write text content to a file, creating parent directories as needed.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    let native_path = path.to_native();
    if let Some(parent) = native_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(&native_path, content).map_err(|e| Error::io(&native_path, e))
}

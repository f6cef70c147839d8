//! Parsed data file cache
//!
//! An engine lives for the whole process, so data files are parsed once and
//! re-read only when their modification time or size changes.
//!
//! The cache is unbounded: it holds one entry per data file path read,
//! and paths are interpolated from the scope, so it grows with the number
//! of distinct nodes and fact values seen. An entry is dropped as soon as
//! its file is found missing.

use crate::Result;
use hiera_fs::{Error as FsError, NormalizedPath};
use serde_json::Value;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Stamp {
    modified: Option<SystemTime>,
    len: u64,
}

#[derive(Debug)]
struct Entry {
    stamp: Stamp,
    data: Option<Arc<Value>>,
}

#[derive(Debug, Default)]
pub struct DataCache {
    entries: Mutex<HashMap<NormalizedPath, Entry>>,
}

impl DataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsed contents of the file at `path`.
    ///
    /// Returns `None` when the file does not exist or `parse` yields nothing.
    /// `parse` runs only when the file changed since it was last read.
    pub fn read<F>(&self, path: &NormalizedPath, parse: F) -> Result<Option<Arc<Value>>>
    where
        F: FnOnce(&NormalizedPath) -> Result<Option<Value>>,
    {
        let native = path.to_native();
        let metadata = match std::fs::metadata(&native) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.lock().remove(path);
                return Ok(None);
            }
            Err(e) => return Err(FsError::io(native, e).into()),
        };
        let stamp = Stamp {
            modified: metadata.modified().ok(),
            len: metadata.len(),
        };

        if let Some(entry) = self.lock().get(path) {
            if entry.stamp == stamp {
                return Ok(entry.data.clone());
            }
        }

        let data = parse(path)?.map(Arc::new);
        self.lock().insert(
            path.clone(),
            Entry {
                stamp,
                data: data.clone(),
            },
        );
        Ok(data)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<NormalizedPath, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

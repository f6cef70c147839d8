//! Normalized path handling for data directories and config files

use std::path::{Path, PathBuf};

/// A filesystem path kept with forward slashes.
///
/// Hierarchy levels are written with forward slashes (`nodes/%{fqdn}`), so
/// data file paths are assembled in this form and only converted to a
/// platform-native path at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            inner: path.as_ref().to_string_lossy().replace('\\', "/"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Platform-native form, for handing to `std::fs`.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Append a relative segment, which may span several components
    /// (`nodes/web01`).
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let base = self.inner.trim_end_matches('/');
        let inner = match (base.is_empty(), self.inner.starts_with('/')) {
            (true, true) => format!("/{segment}"),
            (true, false) => segment,
            (false, _) => format!("{base}/{segment}"),
        };
        Self { inner }
    }

    /// Data file for hierarchy level `stem` under this directory.
    ///
    /// `data_file("nodes/web01", "yaml")` on `/var/lib/hiera` yields
    /// `/var/lib/hiera/nodes/web01.yaml`.
    pub fn data_file(&self, stem: &str, extension: &str) -> Self {
        self.join(&format!("{stem}.{extension}"))
    }

    /// Last component, ignoring trailing slashes.
    pub fn file_name(&self) -> Option<&str> {
        self.inner
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
    }

    /// Extension of the last component; dotfiles have none.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(0) | None => None,
            Some(idx) => Some(&name[idx + 1..]),
        }
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

//! [`TestHiera`] builder for lookup scenarios.

use hiera_fs::{ConfigStore, NormalizedPath, io};
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

/// A temporary directory holding a `hiera.yaml` and a `data/` directory.
///
/// # Example
///
/// ```rust,no_run
/// use hiera_test_utils::TestHiera;
/// use serde_json::json;
///
/// let hiera = TestHiera::new();
/// hiera.write_config(&["nodes/%{fqdn}", "common"]);
/// hiera.write_data("common", json!({"ntp::servers": ["pool.ntp.org"]}));
/// ```
pub struct TestHiera {
    temp_dir: TempDir,
}

impl Default for TestHiera {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHiera {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("TestHiera::new: failed to create temp dir"),
        }
    }

    /// Root of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the fixture's `hiera.yaml`.
    pub fn config_path(&self) -> NormalizedPath {
        NormalizedPath::new(self.root()).join("hiera.yaml")
    }

    /// Path of the default data directory, `<root>/data`.
    pub fn datadir(&self) -> NormalizedPath {
        NormalizedPath::new(self.root()).join("data")
    }

    /// Path of a named alternative data directory, `<root>/<name>`.
    pub fn alt_datadir(&self, name: &str) -> NormalizedPath {
        NormalizedPath::new(self.root()).join(name)
    }

    /// Write a `hiera.yaml` with the yaml backend, the given hierarchy and
    /// `<root>/data` as data directory.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn write_config(&self, hierarchy: &[&str]) {
        let levels = hierarchy
            .iter()
            .map(|level| format!("  - \"{}\"\n", level))
            .collect::<String>();
        let config = format!(
            ":backends:\n  - yaml\n:hierarchy:\n{levels}:yaml:\n  :datadir: \"{}\"\n",
            self.datadir()
        );
        self.write_raw_config(&config);
    }

    /// Write `content` verbatim as `hiera.yaml`.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn write_raw_config(&self, content: &str) {
        io::write_text(&self.config_path(), content)
            .unwrap_or_else(|e| panic!("TestHiera::write_raw_config: {e}"));
    }

    /// Write `data` as `<root>/data/<level>.yaml`.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn write_data(&self, level: &str, data: Value) {
        self.write_data_in(&self.datadir(), level, "yaml", data);
    }

    /// Write `data` as `<dir>/<level>.<extension>`, in the format of the extension.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn write_data_in(&self, dir: &NormalizedPath, level: &str, extension: &str, data: Value) {
        let path = dir.data_file(level, extension);
        ConfigStore::new()
            .save(&path, &data)
            .unwrap_or_else(|e| panic!("TestHiera::write_data_in: {e}"));
    }

    /// Write raw text as `<root>/data/<level>.yaml`.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn write_raw_data(&self, level: &str, content: &str) {
        io::write_text(&self.datadir().data_file(level, "yaml"), content)
            .unwrap_or_else(|e| panic!("TestHiera::write_raw_data: {e}"));
    }
}

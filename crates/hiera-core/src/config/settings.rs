//! `hiera.yaml` model and loading

use crate::{Error, Result};
use hiera_fs::{ConfigFormat, ConfigStore, HieraPath, NormalizedPath, io};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

fn default_backends() -> Vec<String> {
    vec!["yaml".to_string()]
}

fn default_hierarchy() -> Vec<String> {
    vec!["common".to_string()]
}

fn default_logger() -> String {
    "console".to_string()
}

/// Accepts either a single string or a list of strings.
fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(item) => vec![item],
        OneOrMany::Many(items) => items,
    })
}

/// How hash resolution combines mappings found at several levels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeBehavior {
    /// Top-level keys only; a higher level's key replaces the whole entry
    #[default]
    #[serde(alias = ":native")]
    Native,
    /// Recursive merge of nested mappings
    #[serde(alias = ":deep")]
    Deep,
    /// Recursive merge that also unions arrays
    #[serde(alias = ":deeper")]
    Deeper,
}

/// Per-backend settings (`:yaml:` and `:json:` sections)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Directory holding the backend's data files; may contain `%{...}`
    #[serde(alias = ":datadir", skip_serializing_if = "Option::is_none")]
    pub datadir: Option<String>,
}

/// Engine configuration parsed from `hiera.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HieraConfig {
    /// Backends consulted in order
    #[serde(alias = ":backends", deserialize_with = "one_or_many")]
    pub backends: Vec<String>,

    /// Hierarchy levels, most specific first
    #[serde(alias = ":hierarchy", deserialize_with = "one_or_many")]
    pub hierarchy: Vec<String>,

    /// Name attached to the engine's log events
    #[serde(alias = ":logger")]
    pub logger: String,

    #[serde(alias = ":merge_behavior")]
    pub merge_behavior: MergeBehavior,

    #[serde(alias = ":yaml", skip_serializing_if = "Option::is_none")]
    pub yaml: Option<BackendSettings>,

    #[serde(alias = ":json", skip_serializing_if = "Option::is_none")]
    pub json: Option<BackendSettings>,
}

impl Default for HieraConfig {
    fn default() -> Self {
        Self {
            backends: default_backends(),
            hierarchy: default_hierarchy(),
            logger: default_logger(),
            merge_behavior: MergeBehavior::default(),
            yaml: None,
            json: None,
        }
    }
}

impl HieraConfig {
    /// Load the configuration at `path`.
    ///
    /// The format follows the file extension; any other extension is read
    /// as YAML. A missing file or a file without content yields the defaults. Any
    /// other read failure, a syntax error or a document of the wrong shape
    /// is an error.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let Some(content) = io::read_text_if_exists(path)? else {
            tracing::debug!(%path, "No Hiera config file, using defaults");
            return Ok(Self::default());
        };

        // Config files without a recognized extension are read as YAML
        let format = ConfigFormat::of(path).unwrap_or(ConfigFormat::Yaml);
        Self::parse(path, format, &content)
    }

    /// Parse configuration text that was read from `path`.
    pub fn parse(path: &NormalizedPath, format: ConfigFormat, content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let document: Value = ConfigStore::new().parse(path, format, content)?;
        if document.is_null() {
            return Ok(Self::default());
        }

        let config: Self =
            serde_json::from_value(document).map_err(|e| Error::InvalidConfig {
                path: path.to_native(),
                message: e.to_string(),
            })?;
        tracing::debug!(
            %path,
            backends = ?config.backends,
            hierarchy = ?config.hierarchy,
            "Loaded Hiera config"
        );
        Ok(config)
    }

    /// Settings of the named backend, if the config has a section for it.
    pub fn backend_settings(&self, backend: &str) -> Option<&BackendSettings> {
        match backend {
            "yaml" => self.yaml.as_ref(),
            "json" => self.json.as_ref(),
            _ => None,
        }
    }

    /// Configured data directory of `backend`, falling back to `/var/lib/hiera`.
    ///
    /// The result is uninterpolated.
    pub fn datadir(&self, backend: &str) -> String {
        self.backend_settings(backend)
            .and_then(|settings| settings.datadir.clone())
            .unwrap_or_else(|| HieraPath::DataDir.as_str().to_string())
    }

    /// Force the YAML backend's data directory.
    pub fn set_yaml_datadir(&mut self, datadir: impl Into<String>) {
        self.yaml.get_or_insert_with(BackendSettings::default).datadir = Some(datadir.into());
    }
}

//! Engine configuration for bridged lookups
//!
//! The engine is configured from a discovered `hiera.yaml`, with two scope
//! variables able to redirect a single call:
//!
//! - `override_hieradata_dir` replaces the YAML data directory
//! - `override_hiera_config` replaces the config file
//!
//! Precedence for the data directory is: scope override, then the config
//! file's `:yaml: :datadir:`, then the engine default.

use hiera_core::{HieraConfig, Scope};
use hiera_fs::{HieraPath, NormalizedPath};
use serde_json::{Map, Value};

/// Scope variable naming an alternative YAML data directory
pub const OVERRIDE_DATADIR_VAR: &str = "override_hieradata_dir";

/// Scope variable naming an alternative config file
pub const OVERRIDE_CONFIG_VAR: &str = "override_hiera_config";

/// Logger name forced onto every engine built by the bridge
pub const LOGGER_TAG: &str = "puppet";

/// Per-call overrides read from the scope's bindings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOverrides {
    pub data_dir: Option<String>,
    pub config_file: Option<String>,
}

impl EngineOverrides {
    pub fn from_scope(scope: &dyn Scope) -> Self {
        Self::from_bindings(&scope.to_mapping())
    }

    /// Only non-empty string bindings count as overrides.
    pub fn from_bindings(bindings: &Map<String, Value>) -> Self {
        let text = |name: &str| match bindings.get(name) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        };

        Self {
            data_dir: text(OVERRIDE_DATADIR_VAR),
            config_file: text(OVERRIDE_CONFIG_VAR),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data_dir.is_none() && self.config_file.is_none()
    }
}

/// Inputs for constructing one engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Config file to load; `None` means engine defaults
    pub config_file: Option<NormalizedPath>,
    /// YAML data directory forced over the config file's value
    pub data_dir: Option<String>,
    /// Logger name forced over the config file's value
    pub logger: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            data_dir: None,
            logger: LOGGER_TAG.to_string(),
        }
    }
}

impl EngineConfig {
    /// Combine per-call overrides with config file discovery over `candidates`.
    pub fn resolve(overrides: &EngineOverrides, candidates: &[NormalizedPath]) -> Self {
        let config_file = match &overrides.config_file {
            Some(path) => Some(NormalizedPath::new(path)),
            None => discover_config_file(candidates),
        };

        Self {
            config_file,
            data_dir: overrides.data_dir.clone(),
            logger: LOGGER_TAG.to_string(),
        }
    }

    /// Load the config file (if any) and apply the forced settings.
    pub fn to_hiera_config(&self) -> hiera_core::Result<HieraConfig> {
        let mut config = match &self.config_file {
            Some(path) => HieraConfig::load(path)?,
            None => HieraConfig::default(),
        };

        config.logger = self.logger.clone();
        if let Some(data_dir) = &self.data_dir {
            config.set_yaml_datadir(data_dir.clone());
        }
        Ok(config)
    }
}

/// First candidate that exists as a file.
pub fn discover_config_file(candidates: &[NormalizedPath]) -> Option<NormalizedPath> {
    let found = candidates.iter().find(|path| path.is_file()).cloned();
    match &found {
        Some(path) => tracing::debug!(%path, "Discovered Hiera config file"),
        None => tracing::debug!(?candidates, "No Hiera config file found"),
    }
    found
}

/// The conventional config file candidates.
pub fn default_candidates() -> Vec<NormalizedPath> {
    HieraPath::config_candidates()
}

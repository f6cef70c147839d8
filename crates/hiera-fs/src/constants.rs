//! Well-known Hiera filesystem locations.

use crate::NormalizedPath;
use std::path::Path;

/// Conventional locations used when nothing more specific is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HieraPath {
    /// `/etc/puppet/hiera.yaml`, preferred when present
    PuppetConfig,
    /// `/etc/hiera.yaml`, the system-wide fallback
    SystemConfig,
    /// `/var/lib/hiera`, the data directory when a backend names none
    DataDir,
}

impl HieraPath {
    /// Config file candidates in discovery order.
    pub const CONFIG_CANDIDATES: [HieraPath; 2] = [HieraPath::PuppetConfig, HieraPath::SystemConfig];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PuppetConfig => "/etc/puppet/hiera.yaml",
            Self::SystemConfig => "/etc/hiera.yaml",
            Self::DataDir => "/var/lib/hiera",
        }
    }

    pub fn to_path(&self) -> NormalizedPath {
        NormalizedPath::new(self.as_str())
    }

    /// The default config file candidates as paths.
    pub fn config_candidates() -> Vec<NormalizedPath> {
        Self::CONFIG_CANDIDATES.iter().map(HieraPath::to_path).collect()
    }
}

impl AsRef<Path> for HieraPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl std::fmt::Display for HieraPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

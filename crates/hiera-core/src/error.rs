//! Error types for hiera-core

use std::path::PathBuf;

/// Result type for hiera-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the lookup engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The config file parsed but does not describe a valid configuration
    #[error("Invalid Hiera configuration at {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    /// A backend named in the configuration is not available
    #[error("Cannot find backend {name}")]
    UnknownBackend { name: String },

    /// A data file does not hold a mapping at its top level
    #[error("Data file {path} must contain a mapping, found {found}")]
    InvalidDataFile { path: PathBuf, found: &'static str },

    /// A value found during array or hash resolution has the wrong type
    #[error("Hiera type mismatch for key {key}: expected {expected} and got {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A `%{` without its closing brace
    #[error("Unterminated interpolation in {input:?}")]
    Interpolation { input: String },

    /// A resolution type name that is not one of priority, array or hash
    #[error("Unknown resolution type: {name}")]
    UnknownResolutionType { name: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem or data parse error from hiera-fs
    #[error(transparent)]
    Fs(#[from] hiera_fs::Error),
}

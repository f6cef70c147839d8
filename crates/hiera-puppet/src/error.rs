//! Error types for hiera-puppet

/// Result type for hiera-puppet operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the host as evaluation errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The call carried no key
    #[error("A key parameter is required to perform a Hiera lookup")]
    MissingArgument,

    /// No level holds the key and the call gave no default
    #[error("Could not find data item {key} in any Hiera data file and no default supplied")]
    LookupNotFound { key: String },

    /// `hiera_include` resolved to something other than class names
    #[error("Invalid class name {value} in {key}")]
    InvalidClassName { key: String, value: String },

    /// A host function name that this bridge does not provide
    #[error("Unknown Hiera function: {name}")]
    UnknownFunction { name: String },

    // Transparent wrapper for engine failures, passed through unmodified
    /// Error raised by the lookup engine
    #[error(transparent)]
    Engine(#[from] hiera_core::Error),
}

//! Filesystem abstraction for the Hiera lookup bridge
//!
//! Provides normalized paths, plain text I/O, format-agnostic config
//! parsing and the well-known locations of Hiera configuration files.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::{ConfigFormat, ConfigStore};
pub use constants::HieraPath;
pub use error::{Error, Result};
pub use path::NormalizedPath;

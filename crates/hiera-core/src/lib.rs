//! Hierarchical key-value lookup engine
//!
//! This crate implements the lookup engine consumed by the manifest bridge:
//!
//! - **Configuration**: `hiera.yaml` parsing with defaults and legacy symbol keys
//! - **Scopes**: variable bindings used to interpolate hierarchy levels and data
//! - **Backends**: YAML and JSON data directories walked level by level
//! - **Resolution**: first-match, array-merge and hash-merge strategies
//!
//! # Architecture
//!
//! ```text
//!                 hiera-puppet
//!                      |
//!                  hiera-core
//!        +--------+----+-----+----------+
//!        |        |          |          |
//!     config    scope     backend   resolution
//!                      |
//!                  hiera-fs
//! ```
//!
//! # Example
//!
//! ```ignore
//! use hiera_core::{Hiera, HieraConfig, LookupEngine, ResolutionType, ScopeAdapter};
//!
//! let engine = Hiera::new(HieraConfig::load(&"/etc/hiera.yaml".into())?)?;
//! let scope = ScopeAdapter::new(serde_json::Map::new());
//! let ntp = engine.lookup("ntp::servers", None, &scope, None, ResolutionType::Array)?;
//! ```

pub mod backend;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod interpolate;
pub mod logger;
pub mod merge;
pub mod resolution;
pub mod scope;

pub use backend::{Backend, FileBackend};
pub use config::{BackendSettings, HieraConfig, MergeBehavior};
pub use engine::{Hiera, LookupEngine};
pub use error::{Error, Result};
pub use logger::HieraLogger;
pub use resolution::ResolutionType;
pub use scope::{KeyAddressable, Scope, ScopeAdapter, ScopeView};

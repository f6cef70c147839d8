//! Bridge from a manifest interpreter to the Hiera lookup engine
//!
//! The host evaluates `hiera(...)` style calls through this crate:
//!
//! - **Argument normalization**: positional or array-wrapped call payloads
//!   become a canonical `(key, default, override)` triple
//! - **Engine provider**: one lazily built engine per process, guarded
//!   against concurrent first calls, with per-call data directory and config
//!   file overrides taken from the scope
//! - **Lookup resolution**: value, explicit default, or a `LookupNotFound`
//!   naming the key
//! - **Host functions**: `hiera`, `hiera_array`, `hiera_hash`, `hiera_include`
//!
//! # Example
//!
//! ```ignore
//! use hiera_puppet::{ResolutionType, lookup, parse_args};
//!
//! let args = parse_args(&[json!(["ntp::servers", ["pool.ntp.org"]])])?;
//! let servers = lookup(
//!     &args.key,
//!     args.default.as_ref(),
//!     &scope,
//!     args.order_override.as_deref(),
//!     ResolutionType::Array,
//! )?;
//! ```

pub mod args;
pub mod config;
pub mod error;
pub mod functions;
pub mod logging;
pub mod lookup;
pub mod provider;

pub use args::{CallArgs, LookupArgs, parse_args};
pub use config::{EngineConfig, EngineOverrides};
pub use error::{Error, Result};
pub use functions::{HieraFunction, hiera, hiera_array, hiera_hash, hiera_include};
pub use hiera_core::{KeyAddressable, ResolutionType, Scope, ScopeAdapter};
pub use lookup::{LookupResolver, lookup};
pub use provider::{EngineHandle, LookupEngineProvider, global};

//! Engine configuration
//!
//! The engine is configured from a single `hiera.yaml`:
//!
//! ```yaml
//! :backends:
//!   - yaml
//!   - json
//! :hierarchy:
//!   - "nodes/%{fqdn}"
//!   - "%{environment}"
//!   - common
//! :merge_behavior: deeper
//! :yaml:
//!   :datadir: /etc/puppet/hieradata
//! ```
//!
//! Keys may be written with or without the leading colon. A missing or
//! empty file yields the defaults: the `yaml` backend, a single `common`
//! level, the `console` logger and `/var/lib/hiera` as data directory.

mod settings;

pub use settings::{BackendSettings, HieraConfig, MergeBehavior};

//! Data backends
//!
//! A backend walks the hierarchy for one key and accumulates what it finds
//! according to the resolution type. The engine then combines the answers
//! of all configured backends the same way.

mod file;

pub use file::FileBackend;

use crate::config::HieraConfig;
use crate::interpolate::interpolate;
use crate::logger::HieraLogger;
use crate::resolution::ResolutionType;
use crate::scope::KeyAddressable;
use crate::{Error, Result};
use serde_json::Value;

/// A source of hierarchical data
pub trait Backend: Send + Sync + std::fmt::Debug {
    /// Name used in the `backends` list of the config.
    fn name(&self) -> &'static str;

    /// Resolve `key` across this backend's hierarchy.
    ///
    /// Returns `None` when no level holds the key.
    fn lookup(
        &self,
        key: &str,
        scope: &dyn KeyAddressable,
        order_override: Option<&str>,
        resolution: ResolutionType,
    ) -> Result<Option<Value>>;
}

/// Build the backend called `name`.
pub fn build(name: &str, config: &HieraConfig, logger: &HieraLogger) -> Result<Box<dyn Backend>> {
    match name {
        "yaml" => Ok(Box::new(FileBackend::yaml(config, logger.clone()))),
        "json" => Ok(Box::new(FileBackend::json(config, logger.clone()))),
        _ => Err(Error::UnknownBackend {
            name: name.to_string(),
        }),
    }
}

/// Interpolated hierarchy levels to visit, most specific first.
///
/// An order override replaces the configured hierarchy with that single
/// level. Levels that interpolate to nothing, or to a path with an empty
/// component, are skipped.
pub fn datasources(
    hierarchy: &[String],
    order_override: Option<&str>,
    scope: &dyn KeyAddressable,
    logger: &HieraLogger,
) -> Result<Vec<String>> {
    let levels: Vec<&str> = match order_override {
        Some(level) => vec![level],
        None => hierarchy.iter().map(String::as_str).collect(),
    };

    let mut sources = Vec::with_capacity(levels.len());
    for level in levels {
        let source = interpolate(level, scope)?;
        if is_usable_source(&source) {
            sources.push(source);
        } else {
            logger.debug(format_args!(
                "Ignoring hierarchy level {level:?}: interpolates to {source:?}"
            ));
        }
    }
    Ok(sources)
}

fn is_usable_source(source: &str) -> bool {
    !source.is_empty() && !source.starts_with('/') && !source.ends_with('/') && !source.contains("//")
}

//! The lookup engine

use crate::backend::{self, Backend};
use crate::config::HieraConfig;
use crate::interpolate::interpolate;
use crate::logger::HieraLogger;
use crate::resolution::{self, Answer, ResolutionType};
use crate::scope::KeyAddressable;
use crate::Result;
use serde_json::Value;

/// Something that can resolve keys against a hierarchy.
///
/// Implementations are shared across threads for the life of the process.
pub trait LookupEngine: Send + Sync {
    /// Resolve `key`, falling back to `default` when no level holds it.
    ///
    /// Returns `None` only when nothing was found and no default was given.
    fn lookup(
        &self,
        key: &str,
        default: Option<&Value>,
        scope: &dyn KeyAddressable,
        order_override: Option<&str>,
        resolution: ResolutionType,
    ) -> Result<Option<Value>>;
}

/// Engine consulting the configured backends in order.
#[derive(Debug)]
pub struct Hiera {
    config: HieraConfig,
    backends: Vec<Box<dyn Backend>>,
    logger: HieraLogger,
}

impl Hiera {
    /// Build an engine and its backends from `config`.
    pub fn new(config: HieraConfig) -> Result<Self> {
        let logger = HieraLogger::new(config.logger.clone());
        let backends = config
            .backends
            .iter()
            .map(|name| backend::build(name, &config, &logger))
            .collect::<Result<Vec<_>>>()?;

        logger.debug(format_args!(
            "Hiera engine ready with backends {:?} and hierarchy {:?}",
            config.backends, config.hierarchy
        ));
        Ok(Self {
            config,
            backends,
            logger,
        })
    }

    pub fn config(&self) -> &HieraConfig {
        &self.config
    }

    pub fn logger(&self) -> &HieraLogger {
        &self.logger
    }
}

impl LookupEngine for Hiera {
    fn lookup(
        &self,
        key: &str,
        default: Option<&Value>,
        scope: &dyn KeyAddressable,
        order_override: Option<&str>,
        resolution: ResolutionType,
    ) -> Result<Option<Value>> {
        let mut answer = Answer::new(key, resolution, self.config.merge_behavior);

        for backend in &self.backends {
            let Some(found) = backend.lookup(key, scope, order_override, resolution)? else {
                continue;
            };
            if answer.add(found)? {
                break;
            }
        }

        if let Some(value) = answer.into_inner() {
            return Ok(Some(resolution::finish(value, resolution)));
        }

        match default {
            None | Some(Value::Null) => {
                self.logger.debug(format_args!("No answer for {key} and no default"));
                Ok(None)
            }
            Some(Value::String(s)) => Ok(Some(Value::String(interpolate(s, scope)?))),
            Some(value) => Ok(Some(value.clone())),
        }
    }
}

//! Lookup resolution for the host

use crate::config::EngineOverrides;
use crate::provider::{LookupEngineProvider, global};
use crate::{Error, Result};
use hiera_core::{ResolutionType, Scope, ScopeView};
use serde_json::Value;

/// Resolves keys through the engines of one provider.
#[derive(Debug, Clone, Copy)]
pub struct LookupResolver<'a> {
    provider: &'a LookupEngineProvider,
}

impl LookupResolver<'static> {
    /// Resolver backed by the process-wide provider.
    pub fn global() -> Self {
        Self::new(global())
    }
}

impl<'a> LookupResolver<'a> {
    pub fn new(provider: &'a LookupEngineProvider) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &'a LookupEngineProvider {
        self.provider
    }

    /// Resolve `key` to a value.
    ///
    /// Returns the engine's answer, or `default` when no level holds the key.
    /// Fails with [`Error::LookupNotFound`] when neither exists; engine
    /// errors pass through as [`Error::Engine`].
    pub fn lookup(
        &self,
        key: &str,
        default: Option<&Value>,
        scope: &dyn Scope,
        order_override: Option<&str>,
        resolution: ResolutionType,
    ) -> Result<Value> {
        let overrides = EngineOverrides::from_scope(scope);
        let view = ScopeView::of(scope);
        let engine = self.provider.get(&overrides)?;

        tracing::debug!(
            key,
            %resolution,
            ?order_override,
            adapted_scope = view.is_adapted(),
            "Resolving lookup"
        );
        let answer = engine.lookup(key, default, &view, order_override, resolution)?;

        answer.ok_or_else(|| Error::LookupNotFound {
            key: key.to_string(),
        })
    }
}

/// Resolve `key` through the process-wide provider.
///
/// See [`LookupResolver::lookup`].
pub fn lookup(
    key: &str,
    default: Option<&Value>,
    scope: &dyn Scope,
    order_override: Option<&str>,
    resolution: ResolutionType,
) -> Result<Value> {
    LookupResolver::global().lookup(key, default, scope, order_override, resolution)
}

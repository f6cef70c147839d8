//! Process-wide lookup engine provider
//!
//! Building an engine reads and parses the config file and sets up every
//! backend, so the engine for plain calls is built once and reused. Calls
//! whose scope carries an override get an engine built for that call alone;
//! the cached engine is never reconfigured by them.
//!
//! ```text
//!   Uninitialized --(first get without overrides, or init)--> Initialized
//!   Initialized   --(reset)--> Uninitialized
//! ```

use crate::config::{EngineConfig, EngineOverrides, default_candidates};
use crate::Result;
use hiera_core::{Hiera, LookupEngine};
use hiera_fs::NormalizedPath;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

/// Shared handle to a constructed engine
pub type EngineHandle = Arc<dyn LookupEngine>;

type EngineBuilder = dyn Fn(&EngineConfig) -> hiera_core::Result<EngineHandle> + Send + Sync;

static GLOBAL: LazyLock<LookupEngineProvider> = LazyLock::new(LookupEngineProvider::new);

/// The provider shared by the whole process.
pub fn global() -> &'static LookupEngineProvider {
    &GLOBAL
}

/// Build a [`Hiera`] engine from `config`.
pub fn build_hiera(config: &EngineConfig) -> hiera_core::Result<EngineHandle> {
    let engine = Hiera::new(config.to_hiera_config()?)?;
    Ok(Arc::new(engine))
}

/// Owns the cached engine and knows how to build new ones.
pub struct LookupEngineProvider {
    builder: Box<EngineBuilder>,
    candidates: Vec<NormalizedPath>,
    cached: Mutex<Option<EngineHandle>>,
    constructions: AtomicUsize,
}

impl Default for LookupEngineProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LookupEngineProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupEngineProvider")
            .field("candidates", &self.candidates)
            .field("initialized", &self.is_initialized())
            .field("constructions", &self.constructions())
            .finish()
    }
}

impl LookupEngineProvider {
    /// Provider building [`Hiera`] engines, discovering the config file
    /// among `/etc/puppet/hiera.yaml` and `/etc/hiera.yaml`.
    pub fn new() -> Self {
        Self::with_builder(build_hiera)
    }

    /// Provider using a custom engine constructor.
    pub fn with_builder<F>(builder: F) -> Self
    where
        F: Fn(&EngineConfig) -> hiera_core::Result<EngineHandle> + Send + Sync + 'static,
    {
        Self {
            builder: Box::new(builder),
            candidates: default_candidates(),
            cached: Mutex::new(None),
            constructions: AtomicUsize::new(0),
        }
    }

    /// Replace the config file candidates, in discovery order.
    pub fn with_candidates(mut self, candidates: Vec<NormalizedPath>) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn candidates(&self) -> &[NormalizedPath] {
        &self.candidates
    }

    /// Engine configuration for a call carrying `overrides`.
    pub fn engine_config(&self, overrides: &EngineOverrides) -> EngineConfig {
        EngineConfig::resolve(overrides, &self.candidates)
    }

    /// Build an engine from `config` and cache it, replacing any cached engine.
    pub fn init(&self, config: &EngineConfig) -> Result<EngineHandle> {
        let mut cached = self.lock();
        let engine = self.construct(config)?;
        *cached = Some(Arc::clone(&engine));
        tracing::debug!(?config, "Lookup engine initialized explicitly");
        Ok(engine)
    }

    /// Engine for a call carrying `overrides`.
    ///
    /// Without overrides the cached engine is returned, building it on first
    /// use. Concurrent first calls build it exactly once. With overrides a
    /// fresh engine is built for this call and not cached.
    pub fn get(&self, overrides: &EngineOverrides) -> Result<EngineHandle> {
        if !overrides.is_empty() {
            let config = self.engine_config(overrides);
            tracing::debug!(?config, "Building per-call lookup engine for overrides");
            return self.construct(&config);
        }

        let mut cached = self.lock();
        if let Some(engine) = cached.as_ref() {
            return Ok(Arc::clone(engine));
        }

        let config = self.engine_config(overrides);
        let engine = self.construct(&config)?;
        *cached = Some(Arc::clone(&engine));
        tracing::debug!(?config, "Lookup engine initialized");
        Ok(engine)
    }

    /// Drop the cached engine; the next plain call builds a new one.
    pub fn reset(&self) {
        if self.lock().take().is_some() {
            tracing::debug!("Lookup engine reset");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().is_some()
    }

    /// Number of engines built by this provider so far.
    pub fn constructions(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }

    fn construct(&self, config: &EngineConfig) -> Result<EngineHandle> {
        let engine = (self.builder)(config)?;
        self.constructions.fetch_add(1, Ordering::SeqCst);
        Ok(engine)
    }

    fn lock(&self) -> MutexGuard<'_, Option<EngineHandle>> {
        self.cached.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

//! Tagged logging for the lookup engine
//!
//! The engine's config names a logger. Events are emitted through `tracing`
//! with that name attached as the `logger` field, so a host can tell engine
//! output apart from its own. The name `noop` silences the engine.

use std::fmt::Display;

const NOOP: &str = "noop";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HieraLogger {
    name: String,
}

impl HieraLogger {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enabled(&self) -> bool {
        self.name != NOOP
    }

    pub fn debug(&self, message: impl Display) {
        if self.is_enabled() {
            tracing::debug!(logger = %self.name, "{}", message);
        }
    }
}

impl Default for HieraLogger {
    fn default() -> Self {
        Self::new("console")
    }
}

//! Host-callable lookup functions
//!
//! Each function normalizes its call payload, then resolves the key with a
//! fixed resolution type:
//!
//! | function        | resolution |
//! |-----------------|------------|
//! | `hiera`         | priority   |
//! | `hiera_array`   | array      |
//! | `hiera_hash`    | hash       |
//! | `hiera_include` | array      |

use crate::args::parse_args;
use crate::lookup::LookupResolver;
use crate::{Error, Result};
use hiera_core::interpolate::render_scalar;
use hiera_core::{ResolutionType, Scope};
use serde_json::Value;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HieraFunction {
    Hiera,
    HieraArray,
    HieraHash,
    HieraInclude,
}

impl HieraFunction {
    pub const ALL: [HieraFunction; 4] = [
        HieraFunction::Hiera,
        HieraFunction::HieraArray,
        HieraFunction::HieraHash,
        HieraFunction::HieraInclude,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Hiera => "hiera",
            Self::HieraArray => "hiera_array",
            Self::HieraHash => "hiera_hash",
            Self::HieraInclude => "hiera_include",
        }
    }

    pub fn resolution(&self) -> ResolutionType {
        match self {
            Self::Hiera => ResolutionType::Priority,
            Self::HieraArray | Self::HieraInclude => ResolutionType::Array,
            Self::HieraHash => ResolutionType::Hash,
        }
    }
}

impl FromStr for HieraFunction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|function| function.name() == s)
            .ok_or_else(|| Error::UnknownFunction { name: s.to_string() })
    }
}

impl std::fmt::Display for HieraFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl LookupResolver<'_> {
    /// Evaluate `function` for a raw call payload.
    pub fn call(&self, function: HieraFunction, scope: &dyn Scope, raw: &[Value]) -> Result<Value> {
        let args = parse_args(raw)?;
        tracing::trace!(function = %function, key = %args.key, "Evaluating host function");
        self.lookup(
            &args.key,
            args.default.as_ref(),
            scope,
            args.order_override.as_deref(),
            function.resolution(),
        )
    }

    /// Class names to include, resolved as an array lookup.
    ///
    /// A string answer (from a string default) is a single class.
    pub fn include_classes(&self, scope: &dyn Scope, raw: &[Value]) -> Result<Vec<String>> {
        let args = parse_args(raw)?;
        let answer = self.lookup(
            &args.key,
            args.default.as_ref(),
            scope,
            args.order_override.as_deref(),
            HieraFunction::HieraInclude.resolution(),
        )?;

        let items = match answer {
            Value::Array(items) => items,
            other => vec![other],
        };
        items
            .into_iter()
            .map(|item| match item {
                Value::String(class) if !class.is_empty() => Ok(class),
                other => Err(Error::InvalidClassName {
                    key: args.key.clone(),
                    value: render_scalar(&other),
                }),
            })
            .collect()
    }
}

/// `hiera(key, default, override)` through the process-wide provider.
pub fn hiera(scope: &dyn Scope, raw: &[Value]) -> Result<Value> {
    LookupResolver::global().call(HieraFunction::Hiera, scope, raw)
}

/// `hiera_array(key, default, override)` through the process-wide provider.
pub fn hiera_array(scope: &dyn Scope, raw: &[Value]) -> Result<Value> {
    LookupResolver::global().call(HieraFunction::HieraArray, scope, raw)
}

/// `hiera_hash(key, default, override)` through the process-wide provider.
pub fn hiera_hash(scope: &dyn Scope, raw: &[Value]) -> Result<Value> {
    LookupResolver::global().call(HieraFunction::HieraHash, scope, raw)
}

/// `hiera_include(key, default, override)` through the process-wide provider.
pub fn hiera_include(scope: &dyn Scope, raw: &[Value]) -> Result<Vec<String>> {
    LookupResolver::global().include_classes(scope, raw)
}

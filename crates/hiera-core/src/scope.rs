//! Variable-binding scopes
//!
//! A scope supplies the values used to interpolate hierarchy levels and
//! data. Every scope can present its full binding set as a mapping; some
//! scopes can also answer key-based lookups directly. Scopes that cannot
//! are wrapped in a [`ScopeAdapter`] built from their mapping.

use serde_json::{Map, Value};

/// Key-based access to bound variables.
pub trait KeyAddressable {
    /// Value bound to `name`, or `None` when the variable is unbound.
    fn lookup_var(&self, name: &str) -> Option<Value>;
}

/// A variable-binding context supplied by the host.
pub trait Scope {
    /// The full set of bindings visible in this scope.
    fn to_mapping(&self) -> Map<String, Value>;

    /// Key-based access, when the scope supports it natively.
    fn key_addressable(&self) -> Option<&dyn KeyAddressable> {
        None
    }
}

/// Key-based access over a full binding mapping.
///
/// Null and empty-string bindings read as unbound, matching how the host
/// reports undefined variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeAdapter {
    bindings: Map<String, Value>,
}

impl ScopeAdapter {
    pub fn new(bindings: Map<String, Value>) -> Self {
        Self { bindings }
    }

    /// Adapt any scope through its full binding view.
    pub fn from_scope(scope: &dyn Scope) -> Self {
        Self::new(scope.to_mapping())
    }

    pub fn bindings(&self) -> &Map<String, Value> {
        &self.bindings
    }
}

impl KeyAddressable for ScopeAdapter {
    fn lookup_var(&self, name: &str) -> Option<Value> {
        match self.bindings.get(name) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(value) => Some(value.clone()),
        }
    }
}

impl Scope for ScopeAdapter {
    fn to_mapping(&self) -> Map<String, Value> {
        self.bindings.clone()
    }

    fn key_addressable(&self) -> Option<&dyn KeyAddressable> {
        Some(self)
    }
}

/// A plain mapping is a scope without key-based access.
impl Scope for Map<String, Value> {
    fn to_mapping(&self) -> Map<String, Value> {
        self.clone()
    }
}

/// Key-based view of a scope: the scope itself when it is addressable,
/// otherwise an adapter over its mapping.
pub enum ScopeView<'a> {
    Native(&'a dyn KeyAddressable),
    Adapted(ScopeAdapter),
}

impl<'a> ScopeView<'a> {
    pub fn of(scope: &'a dyn Scope) -> Self {
        match scope.key_addressable() {
            Some(native) => Self::Native(native),
            None => {
                tracing::trace!("Scope lacks key-based lookup, adapting its bindings");
                Self::Adapted(ScopeAdapter::from_scope(scope))
            }
        }
    }

    pub fn is_adapted(&self) -> bool {
        matches!(self, Self::Adapted(_))
    }
}

impl KeyAddressable for ScopeView<'_> {
    fn lookup_var(&self, name: &str) -> Option<Value> {
        match self {
            Self::Native(scope) => scope.lookup_var(name),
            Self::Adapted(adapter) => adapter.lookup_var(name),
        }
    }
}

//! Hierarchical configuration collaborator.
//!
//! [`ParameterList`] is the narrow interface the registry initializes
//! itself through: flat key→value lookups (`"Gravity x"`,
//! `"Constant Temperature"`, `"Number of mesh blocks"`) plus named
//! sublists for per-mesh-block overrides (`"Mesh block 2"`). How the
//! list is populated — file parsing, a driver building it in code — is
//! outside this crate's scope.

use indexmap::IndexMap;

use crate::error::StateError;

/// A single configuration value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParameterValue {
    /// A physical constant or coordinate.
    Scalar(f64),
    /// A count or id.
    Integer(i64),
}

/// Ordered, hierarchical key→value configuration.
///
/// Entries and sublists iterate in insertion order (`IndexMap`), which
/// keeps initialization deterministic across runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterList {
    entries: IndexMap<String, ParameterValue>,
    sublists: IndexMap<String, ParameterList>,
}

impl ParameterList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a scalar entry.
    pub fn set_scalar(&mut self, key: impl Into<String>, value: f64) -> &mut Self {
        self.entries.insert(key.into(), ParameterValue::Scalar(value));
        self
    }

    /// Insert or replace an integer entry.
    pub fn set_integer(&mut self, key: impl Into<String>, value: i64) -> &mut Self {
        self.entries.insert(key.into(), ParameterValue::Integer(value));
        self
    }

    /// Access (creating if absent) a named sublist.
    pub fn sublist_mut(&mut self, name: impl Into<String>) -> &mut ParameterList {
        self.sublists.entry(name.into()).or_default()
    }

    /// Whether a flat entry with this key exists.
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Look up a scalar entry. Integer entries are widened to `f64`.
    pub fn scalar(&self, key: &str) -> Option<f64> {
        match self.entries.get(key) {
            Some(ParameterValue::Scalar(v)) => Some(*v),
            Some(ParameterValue::Integer(v)) => Some(*v as f64),
            None => None,
        }
    }

    /// Look up a scalar entry, failing with [`StateError::MissingParameter`].
    pub fn require_scalar(&self, key: &str) -> Result<f64, StateError> {
        self.scalar(key).ok_or_else(|| StateError::MissingParameter {
            key: key.to_string(),
        })
    }

    /// Look up an integer entry.
    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.entries.get(key) {
            Some(ParameterValue::Integer(v)) => Some(*v),
            _ => None,
        }
    }

    /// Look up an integer entry, failing with [`StateError::MissingParameter`].
    pub fn require_integer(&self, key: &str) -> Result<i64, StateError> {
        self.integer(key).ok_or_else(|| StateError::MissingParameter {
            key: key.to_string(),
        })
    }

    /// Look up a named sublist.
    pub fn sublist(&self, name: &str) -> Option<&ParameterList> {
        self.sublists.get(name)
    }
}

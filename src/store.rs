//! Per-frame variable environment

use std::fmt;

use crate::error::EslError;
use crate::prelude::FxHashMap;
use crate::value::Value;

/// Mapping from variable name to value for the active function frame
///
/// A store is created per call, moved into the call stack while the callee
/// runs, and moved back out when the callee returns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Store {
    bindings: FxHashMap<String, Value>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh store binding `params` positionally to `args`
    pub fn bind(params: &[String], args: Vec<Value>) -> Result<Store, EslError> {
        if params.len() != args.len() {
            return Err(EslError::arity_mismatch(params.len(), args.len()));
        }
        Ok(Store {
            bindings: params.iter().cloned().zip(args).collect(),
        })
    }

    pub fn get(&self, name: &str) -> Result<&Value, EslError> {
        self.bindings
            .get(name)
            .ok_or_else(|| EslError::unbound(name))
    }

    /// Insert or overwrite a binding
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.bindings.iter()
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Sorted so that dumps are stable across runs
        let mut names: Vec<&String> = self.bindings.keys().collect();
        names.sort();
        write!(f, "{{")?;
        for (i, name) in names.into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if let Some(value) = self.bindings.get(name) {
                write!(f, "{}: {}", name, value)?;
            }
        }
        write!(f, "}}")
    }
}

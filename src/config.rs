//! Run configuration

use serde::Deserialize;

use crate::error::EslError;
use crate::value::Value;

/// What to run and how
///
/// Deserializes from JSON with every field optional:
///
/// ```
/// use ecmasl::{RunConfig, Value};
///
/// let run = RunConfig::from_json(r#"{"args": [{"Primitive": 4}]}"#).unwrap();
/// assert_eq!(run.entry, "main");
/// assert_eq!(run.args, vec![Value::int(4)]);
/// assert!(!run.trace_steps);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Function to call first
    pub entry: String,
    /// Arguments bound to the entry function's parameters
    pub args: Vec<Value>,
    /// Emit a `trace` event for every step
    pub trace_steps: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            entry: "main".to_string(),
            args: Vec::new(),
            trace_steps: false,
        }
    }
}

impl RunConfig {
    pub fn new(entry: impl Into<String>) -> Self {
        Self {
            entry: entry.into(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, EslError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }

    pub fn with_trace_steps(mut self, trace_steps: bool) -> Self {
        self.trace_steps = trace_steps;
        self
    }
}

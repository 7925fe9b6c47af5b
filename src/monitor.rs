//! Security-label monitor protocol
//!
//! The monitor runs in lock-step with the interpreter: after every main step
//! it receives that step's label together with its own shadow configuration
//! and returns the next shadow configuration. It never reads the main
//! configuration; the label is the only channel between the two.
//!
//! What a monitor does with the labels (its analysis policy) is up to the
//! implementation. This module provides the shadow state, the trait and a
//! few stock monitors.

use crate::label::SecurityLabel;
use crate::prelude::FxHashMap;
use crate::value::Location;

/// Security level attached to shadow bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum SecurityLevel {
    #[default]
    Low,
    High,
}

impl SecurityLevel {
    /// Least upper bound
    pub fn join(self, other: SecurityLevel) -> SecurityLevel {
        self.max(other)
    }
}

/// Levels of the variables of the active frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShadowStore {
    levels: FxHashMap<String, SecurityLevel>,
}

impl ShadowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Level of a variable; unknown variables are `Low`
    pub fn level(&self, name: &str) -> SecurityLevel {
        self.levels.get(name).copied().unwrap_or_default()
    }

    pub fn set(&mut self, name: impl Into<String>, level: SecurityLevel) {
        self.levels.insert(name.into(), level);
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Levels of heap objects and their fields
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShadowHeap {
    objects: FxHashMap<Location, FxHashMap<String, SecurityLevel>>,
}

impl ShadowHeap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror an allocation of the main heap
    pub fn allocate(&mut self, location: Location) {
        self.objects.entry(location).or_default();
    }

    pub fn contains(&self, location: Location) -> bool {
        self.objects.contains_key(&location)
    }

    pub fn field_level(&self, location: Location, field: &str) -> SecurityLevel {
        self.objects
            .get(&location)
            .and_then(|fields| fields.get(field))
            .copied()
            .unwrap_or_default()
    }

    pub fn set_field_level(&mut self, location: Location, field: impl Into<String>, level: SecurityLevel) {
        self.objects
            .entry(location)
            .or_default()
            .insert(field.into(), level);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// A suspended shadow frame, mirroring [`CallStackFrame`](crate::CallStackFrame)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShadowFrame {
    pub destination: Option<String>,
    pub store: ShadowStore,
}

/// The monitor's own mirrored state
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowConfiguration {
    pub store: ShadowStore,
    pub heap: ShadowHeap,
    pub call_stack: Vec<ShadowFrame>,
}

impl ShadowConfiguration {
    /// Initial shadow state: empty store and heap, one sentinel frame
    pub fn new() -> Self {
        Self {
            store: ShadowStore::new(),
            heap: ShadowHeap::new(),
            call_stack: vec![ShadowFrame::default()],
        }
    }
}

impl Default for ShadowConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

/// Consumer of the label stream
pub trait Monitor {
    /// Advance the shadow configuration by one main step
    fn interpret(&mut self, label: SecurityLabel, shadow: ShadowConfiguration) -> ShadowConfiguration;
}

impl<F> Monitor for F
where
    F: FnMut(SecurityLabel, ShadowConfiguration) -> ShadowConfiguration,
{
    fn interpret(&mut self, label: SecurityLabel, shadow: ShadowConfiguration) -> ShadowConfiguration {
        self(label, shadow)
    }
}

/// Monitor that leaves the shadow configuration untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMonitor;

impl Monitor for NullMonitor {
    fn interpret(&mut self, _label: SecurityLabel, shadow: ShadowConfiguration) -> ShadowConfiguration {
        shadow
    }
}

/// Records every label it sees, then delegates to an inner monitor
#[derive(Debug, Clone, Default)]
pub struct LabelLog<M = NullMonitor> {
    labels: Vec<SecurityLabel>,
    inner: M,
}

impl LabelLog<NullMonitor> {
    pub fn new() -> Self {
        Self::wrap(NullMonitor)
    }
}

impl<M: Monitor> LabelLog<M> {
    pub fn wrap(inner: M) -> Self {
        Self {
            labels: Vec::new(),
            inner,
        }
    }

    /// Labels in the order they were emitted
    pub fn labels(&self) -> &[SecurityLabel] {
        &self.labels
    }

    /// Label kinds in order, handy for assertions
    pub fn kinds(&self) -> Vec<&'static str> {
        self.labels.iter().map(SecurityLabel::kind).collect()
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn into_labels(self) -> Vec<SecurityLabel> {
        self.labels
    }
}

impl<M: Monitor> Monitor for LabelLog<M> {
    fn interpret(&mut self, label: SecurityLabel, shadow: ShadowConfiguration) -> ShadowConfiguration {
        self.labels.push(label.clone());
        self.inner.interpret(label, shadow)
    }
}

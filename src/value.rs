//! ECMA-SL value representation
//!
//! Values are immutable once constructed. Composite values own their
//! elements, so copying a value never creates shared mutable state; the only
//! identity-carrying value is [`Location`], which names a heap object.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle of a heap-allocated object
///
/// Locations are handed out by a monotonic counter and are never reused
/// within a run, so ordering on locations is allocation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(usize);

impl Location {
    pub fn new(index: usize) -> Self {
        Location(index)
    }

    /// Position of the object in the heap arena
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$loc_{}", self.0)
    }
}

/// Scalar values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Primitive {
    Undefined,
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl Primitive {
    pub fn type_name(&self) -> &'static str {
        match self {
            Primitive::Undefined => "undefined",
            Primitive::Int(_) => "int",
            Primitive::Float(_) => "float",
            Primitive::Bool(_) => "bool",
            Primitive::Str(_) => "string",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Undefined => write!(f, "undefined"),
            Primitive::Int(n) => write!(f, "{}", n),
            Primitive::Float(n) => fmt_float(*n, f),
            Primitive::Bool(b) => write!(f, "{}", b),
            Primitive::Str(s) => write!(f, "{}", s),
        }
    }
}

fn fmt_float(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_finite() && n.fract() == 0.0 {
        write!(f, "{:.1}", n)
    } else {
        write!(f, "{}", n)
    }
}

/// A runtime value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Primitive(Primitive),
    Location(Location),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Symbol(String),
    /// Result of looking up a field that the object does not have
    Absent,
}

impl Value {
    pub fn int(n: i64) -> Self {
        Value::Primitive(Primitive::Int(n))
    }

    pub fn float(n: f64) -> Self {
        Value::Primitive(Primitive::Float(n))
    }

    pub fn bool(b: bool) -> Self {
        Value::Primitive(Primitive::Bool(b))
    }

    pub fn str(s: impl Into<String>) -> Self {
        Value::Primitive(Primitive::Str(s.into()))
    }

    pub fn undefined() -> Self {
        Value::Primitive(Primitive::Undefined)
    }

    pub fn symbol(s: impl Into<String>) -> Self {
        Value::Symbol(s.into())
    }

    /// Name of the variant, as reported by `Typeof`
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Primitive(p) => p.type_name(),
            Value::Location(_) => "location",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Symbol(_) => "symbol",
            Value::Absent => "absent",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Primitive(Primitive::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Primitive(Primitive::Int(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Primitive(Primitive::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_location(&self) -> Option<Location> {
        match self {
            Value::Location(loc) => Some(*loc),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::undefined()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Primitive(Primitive::Str(s)) => write!(f, "\"{}\"", s),
            Value::Primitive(p) => write!(f, "{}", p),
            Value::Location(loc) => write!(f, "{}", loc),
            Value::List(items) => {
                write!(f, "[")?;
                fmt_items(items, f)?;
                write!(f, "]")
            }
            Value::Tuple(items) => {
                write!(f, "(")?;
                fmt_items(items, f)?;
                write!(f, ")")
            }
            Value::Symbol(s) => write!(f, "'{}", s),
            Value::Absent => write!(f, "absent"),
        }
    }
}

fn fmt_items(items: &[Value], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

// Conversions from Rust types

impl From<Primitive> for Value {
    fn from(p: Primitive) -> Self {
        Value::Primitive(p)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::str(s)
    }
}

impl From<Location> for Value {
    fn from(loc: Location) -> Self {
        Value::Location(loc)
    }
}

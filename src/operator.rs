//! Operators and their evaluation
//!
//! Operators form a closed enumeration shared by interpretation and code
//! generation. Evaluation is pure over values; the only operators that look
//! at the heap (`InObj`, `ObjToList`) read it without mutating it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EslError;
use crate::heap::Heap;
use crate::value::{Primitive, Value};

/// Number of operands an operator takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Unary,
    Binary,
    Nary,
}

/// An ECMA-SL operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operator {
    // Binary
    Plus,
    Minus,
    Times,
    Div,
    Equal,
    Gt,
    Lt,
    Egt,
    Elt,
    LogAnd,
    LogOr,
    InObj,
    InList,
    Lnth,
    Tnth,
    Ladd,
    Lconcat,
    // Unary
    Neg,
    Not,
    Typeof,
    ListLen,
    TupleLen,
    Head,
    Tail,
    First,
    Second,
    IntToFloat,
    FloatToString,
    ObjToList,
    Sconcat,
    // N-ary
    ListExpr,
    TupleExpr,
    NaryAnd,
    NaryOr,
}

impl Operator {
    pub const ALL: [Operator; 34] = [
        Operator::Plus,
        Operator::Minus,
        Operator::Times,
        Operator::Div,
        Operator::Equal,
        Operator::Gt,
        Operator::Lt,
        Operator::Egt,
        Operator::Elt,
        Operator::LogAnd,
        Operator::LogOr,
        Operator::InObj,
        Operator::InList,
        Operator::Lnth,
        Operator::Tnth,
        Operator::Ladd,
        Operator::Lconcat,
        Operator::Neg,
        Operator::Not,
        Operator::Typeof,
        Operator::ListLen,
        Operator::TupleLen,
        Operator::Head,
        Operator::Tail,
        Operator::First,
        Operator::Second,
        Operator::IntToFloat,
        Operator::FloatToString,
        Operator::ObjToList,
        Operator::Sconcat,
        Operator::ListExpr,
        Operator::TupleExpr,
        Operator::NaryAnd,
        Operator::NaryOr,
    ];

    /// Tag used by the exchange format
    pub fn tag(self) -> &'static str {
        match self {
            Operator::Plus => "Plus",
            Operator::Minus => "Minus",
            Operator::Times => "Times",
            Operator::Div => "Div",
            Operator::Equal => "Equal",
            Operator::Gt => "Gt",
            Operator::Lt => "Lt",
            Operator::Egt => "Egt",
            Operator::Elt => "Elt",
            Operator::LogAnd => "Log_And",
            Operator::LogOr => "Log_Or",
            Operator::InObj => "InObj",
            Operator::InList => "InList",
            Operator::Lnth => "Lnth",
            Operator::Tnth => "Tnth",
            Operator::Ladd => "Ladd",
            Operator::Lconcat => "Lconcat",
            Operator::Neg => "Neg",
            Operator::Not => "Not",
            Operator::Typeof => "Typeof",
            Operator::ListLen => "ListLen",
            Operator::TupleLen => "TupleLen",
            Operator::Head => "Head",
            Operator::Tail => "Tail",
            Operator::First => "First",
            Operator::Second => "Second",
            Operator::IntToFloat => "IntToFloat",
            Operator::FloatToString => "FloatToString",
            Operator::ObjToList => "ObjToList",
            Operator::Sconcat => "Sconcat",
            Operator::ListExpr => "ListExpr",
            Operator::TupleExpr => "TupleExpr",
            Operator::NaryAnd => "NAry_And",
            Operator::NaryOr => "NAry_Or",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Operator::Plus
            | Operator::Minus
            | Operator::Times
            | Operator::Div
            | Operator::Equal
            | Operator::Gt
            | Operator::Lt
            | Operator::Egt
            | Operator::Elt
            | Operator::LogAnd
            | Operator::LogOr
            | Operator::InObj
            | Operator::InList
            | Operator::Lnth
            | Operator::Tnth
            | Operator::Ladd
            | Operator::Lconcat => Arity::Binary,
            Operator::Neg
            | Operator::Not
            | Operator::Typeof
            | Operator::ListLen
            | Operator::TupleLen
            | Operator::Head
            | Operator::Tail
            | Operator::First
            | Operator::Second
            | Operator::IntToFloat
            | Operator::FloatToString
            | Operator::ObjToList
            | Operator::Sconcat => Arity::Unary,
            Operator::ListExpr | Operator::TupleExpr | Operator::NaryAnd | Operator::NaryOr => {
                Arity::Nary
            }
        }
    }

    /// Surface symbol used when pretty-printing programs
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Times => "*",
            Operator::Div => "/",
            Operator::Equal => "=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Egt => ">=",
            Operator::Elt => "<=",
            Operator::LogAnd => "&&",
            Operator::LogOr => "||",
            Operator::InObj => "in_obj",
            Operator::InList => "in_list",
            Operator::Lnth => "l_nth",
            Operator::Tnth => "t_nth",
            Operator::Ladd => "l_add",
            Operator::Lconcat => "l_concat",
            Operator::Neg => "-",
            Operator::Not => "!",
            Operator::Typeof => "typeof",
            Operator::ListLen => "l_len",
            Operator::TupleLen => "t_len",
            Operator::Head => "hd",
            Operator::Tail => "tl",
            Operator::First => "fst",
            Operator::Second => "snd",
            Operator::IntToFloat => "int_to_float",
            Operator::FloatToString => "float_to_string",
            Operator::ObjToList => "obj_to_list",
            Operator::Sconcat => "s_concat",
            Operator::ListExpr => "list",
            Operator::TupleExpr => "tuple",
            Operator::NaryAnd => "&&&",
            Operator::NaryOr => "|||",
        }
    }

    fn expect_arity(self, arity: Arity) -> Result<(), EslError> {
        if self.arity() == arity {
            Ok(())
        } else {
            Err(EslError::unsupported_operator(self.tag()))
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Operator {
    type Err = EslError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .iter()
            .copied()
            .find(|op| op.tag() == tag)
            .ok_or_else(|| EslError::unsupported_operator(tag))
    }
}

impl TryFrom<String> for Operator {
    type Error = EslError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.tag().to_string()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Evaluation
// ═══════════════════════════════════════════════════════════════════════════════

/// Apply a unary operator
pub fn apply_unary(op: Operator, value: Value, heap: &Heap) -> Result<Value, EslError> {
    op.expect_arity(Arity::Unary)?;
    match op {
        Operator::Neg => match value {
            Value::Primitive(Primitive::Int(n)) => n
                .checked_neg()
                .map(Value::int)
                .ok_or_else(|| EslError::range_error("integer overflow in Neg")),
            Value::Primitive(Primitive::Float(n)) => Ok(Value::float(-n)),
            other => Err(operand_error(op, "a number", &other)),
        },
        Operator::Not => match value.as_bool() {
            Some(b) => Ok(Value::bool(!b)),
            None => Err(operand_error(op, "a boolean", &value)),
        },
        Operator::Typeof => Ok(Value::symbol(value.type_name())),
        Operator::ListLen => match value {
            Value::List(items) => Ok(length(items.len())),
            other => Err(operand_error(op, "a list", &other)),
        },
        Operator::TupleLen => match value {
            Value::Tuple(items) => Ok(length(items.len())),
            other => Err(operand_error(op, "a tuple", &other)),
        },
        Operator::Head => match value {
            Value::List(items) => items
                .into_iter()
                .next()
                .ok_or_else(|| EslError::range_error("Head of an empty list")),
            other => Err(operand_error(op, "a list", &other)),
        },
        Operator::Tail => match value {
            Value::List(items) => {
                if items.is_empty() {
                    return Err(EslError::range_error("Tail of an empty list"));
                }
                Ok(Value::List(items.into_iter().skip(1).collect()))
            }
            other => Err(operand_error(op, "a list", &other)),
        },
        Operator::First => match value {
            Value::Tuple(items) => items
                .into_iter()
                .next()
                .ok_or_else(|| EslError::range_error("First of an empty tuple")),
            other => Err(operand_error(op, "a tuple", &other)),
        },
        Operator::Second => match value {
            Value::Tuple(items) => {
                if items.is_empty() {
                    return Err(EslError::range_error("Second of an empty tuple"));
                }
                Ok(Value::Tuple(items.into_iter().skip(1).collect()))
            }
            other => Err(operand_error(op, "a tuple", &other)),
        },
        Operator::IntToFloat => match value {
            Value::Primitive(Primitive::Int(n)) => Ok(Value::float(n as f64)),
            other => Err(operand_error(op, "an int", &other)),
        },
        Operator::FloatToString => match value {
            Value::Primitive(p @ (Primitive::Float(_) | Primitive::Int(_))) => {
                Ok(Value::str(p.to_string()))
            }
            other => Err(operand_error(op, "a number", &other)),
        },
        Operator::ObjToList => match value {
            Value::Location(loc) => {
                let pairs = heap
                    .fields(loc)?
                    .map(|(name, v)| Value::Tuple(vec![Value::str(name), v.clone()]))
                    .collect();
                Ok(Value::List(pairs))
            }
            other => Err(operand_error(op, "a location", &other)),
        },
        Operator::Sconcat => match value {
            Value::List(items) => {
                let mut out = String::new();
                for item in &items {
                    match item {
                        Value::Primitive(p) => out.push_str(&p.to_string()),
                        other => return Err(operand_error(op, "a list of primitives", other)),
                    }
                }
                Ok(Value::str(out))
            }
            other => Err(operand_error(op, "a list", &other)),
        },
        _ => Err(EslError::unsupported_operator(op.tag())),
    }
}

/// Apply a binary operator
pub fn apply_binary(op: Operator, left: Value, right: Value, heap: &Heap) -> Result<Value, EslError> {
    op.expect_arity(Arity::Binary)?;
    match op {
        Operator::Plus | Operator::Minus | Operator::Times | Operator::Div => {
            arithmetic(op, &left, &right)
        }
        Operator::Equal => Ok(Value::bool(equal(&left, &right))),
        Operator::Gt | Operator::Lt | Operator::Egt | Operator::Elt => compare(op, &left, &right),
        Operator::LogAnd | Operator::LogOr => match (left.as_bool(), right.as_bool()) {
            (Some(a), Some(b)) => Ok(Value::bool(if op == Operator::LogAnd {
                a && b
            } else {
                a || b
            })),
            (None, _) => Err(operand_error(op, "a boolean", &left)),
            (_, None) => Err(operand_error(op, "a boolean", &right)),
        },
        Operator::InObj => match (&left, &right) {
            (Value::Location(loc), Value::Primitive(Primitive::Str(field))) => {
                Ok(Value::bool(heap.has_field(*loc, field)?))
            }
            (Value::Location(_), other) => Err(operand_error(op, "a field name", other)),
            (other, _) => Err(operand_error(op, "a location", other)),
        },
        Operator::InList => match left {
            Value::List(items) => Ok(Value::bool(items.contains(&right))),
            other => Err(operand_error(op, "a list", &other)),
        },
        Operator::Lnth => match left {
            Value::List(items) => nth(op, items, &right),
            other => Err(operand_error(op, "a list", &other)),
        },
        Operator::Tnth => match left {
            Value::Tuple(items) => nth(op, items, &right),
            other => Err(operand_error(op, "a tuple", &other)),
        },
        Operator::Ladd => match left {
            Value::List(mut items) => {
                items.push(right);
                Ok(Value::List(items))
            }
            other => Err(operand_error(op, "a list", &other)),
        },
        Operator::Lconcat => match (left, right) {
            (Value::List(mut a), Value::List(b)) => {
                a.extend(b);
                Ok(Value::List(a))
            }
            (Value::List(_), other) | (other, _) => Err(operand_error(op, "a list", &other)),
        },
        _ => Err(EslError::unsupported_operator(op.tag())),
    }
}

/// Apply an n-ary operator
pub fn apply_nary(op: Operator, values: Vec<Value>) -> Result<Value, EslError> {
    op.expect_arity(Arity::Nary)?;
    match op {
        Operator::ListExpr => Ok(Value::List(values)),
        Operator::TupleExpr => Ok(Value::Tuple(values)),
        Operator::NaryAnd | Operator::NaryOr => {
            let identity = op == Operator::NaryAnd;
            values.iter().try_fold(Value::bool(identity), |acc, v| {
                let (Some(a), Some(b)) = (acc.as_bool(), v.as_bool()) else {
                    return Err(operand_error(op, "a boolean", v));
                };
                Ok(Value::bool(if identity { a && b } else { a || b }))
            })
        }
        _ => Err(EslError::unsupported_operator(op.tag())),
    }
}

fn operand_error(op: Operator, expected: &str, found: &Value) -> EslError {
    EslError::type_error(format!(
        "{} expects {}, found {} {}",
        op.tag(),
        expected,
        found.type_name(),
        found
    ))
}

fn length(len: usize) -> Value {
    Value::int(i64::try_from(len).unwrap_or(i64::MAX))
}

fn nth(op: Operator, items: Vec<Value>, index: &Value) -> Result<Value, EslError> {
    let Some(i) = index.as_int() else {
        return Err(operand_error(op, "an int index", index));
    };
    let len = items.len();
    usize::try_from(i)
        .ok()
        .and_then(|i| items.into_iter().nth(i))
        .ok_or_else(|| {
            EslError::range_error(format!("{} index {} out of range for length {}", op.tag(), i, len))
        })
}

fn arithmetic(op: Operator, left: &Value, right: &Value) -> Result<Value, EslError> {
    match (left, right) {
        (Value::Primitive(Primitive::Int(a)), Value::Primitive(Primitive::Int(b))) => {
            let (a, b) = (*a, *b);
            let result = match op {
                Operator::Plus => a.checked_add(b),
                Operator::Minus => a.checked_sub(b),
                Operator::Times => a.checked_mul(b),
                _ => {
                    if b == 0 {
                        return Err(EslError::range_error("division by zero"));
                    }
                    a.checked_div(b)
                }
            };
            result
                .map(Value::int)
                .ok_or_else(|| EslError::range_error(format!("integer overflow in {}", op.tag())))
        }
        _ => {
            let a = as_number(op, left)?;
            let b = as_number(op, right)?;
            Ok(Value::float(match op {
                Operator::Plus => a + b,
                Operator::Minus => a - b,
                Operator::Times => a * b,
                _ => a / b,
            }))
        }
    }
}

fn as_number(op: Operator, value: &Value) -> Result<f64, EslError> {
    match value {
        Value::Primitive(Primitive::Int(n)) => Ok(*n as f64),
        Value::Primitive(Primitive::Float(n)) => Ok(*n),
        other => Err(operand_error(op, "a number", other)),
    }
}

/// Structural equality, except that an Int and a Float compare numerically
fn equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Primitive(Primitive::Int(a)), Value::Primitive(Primitive::Float(b)))
        | (Value::Primitive(Primitive::Float(b)), Value::Primitive(Primitive::Int(a))) => {
            *a as f64 == *b
        }
        _ => left == right,
    }
}

fn compare(op: Operator, left: &Value, right: &Value) -> Result<Value, EslError> {
    let ordering = match (left, right) {
        (Value::Primitive(Primitive::Str(a)), Value::Primitive(Primitive::Str(b))) => {
            Some(a.cmp(b))
        }
        (Value::Primitive(Primitive::Int(a)), Value::Primitive(Primitive::Int(b))) => {
            Some(a.cmp(b))
        }
        _ => as_number(op, left)?.partial_cmp(&as_number(op, right)?),
    };
    // NaN compares false under every ordering
    let Some(ordering) = ordering else {
        return Ok(Value::bool(false));
    };
    Ok(Value::bool(match op {
        Operator::Gt => ordering.is_gt(),
        Operator::Lt => ordering.is_lt(),
        Operator::Egt => ordering.is_ge(),
        _ => ordering.is_le(),
    }))
}

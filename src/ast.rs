//! Abstract syntax of ECMA-SL programs
//!
//! The node shapes follow the JSON exchange format produced by the front-end:
//! every node carries a `type` discriminator plus type-specific fields (see
//! [`crate::ingest`]). Statement trees are shared through `Rc` so that pushing
//! a function body or a branch onto the continuation never deep-copies it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EslError;
use crate::heap::Heap;
use crate::operator::{self, Operator};
use crate::prelude::{IndexMap, Rc, index_map_new};
use crate::store::Store;
use crate::value::Value;

// ============ EXPRESSIONS ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expr {
    /// Literal value
    #[serde(rename = "Val")]
    Literal { value: Value },

    /// Variable reference, resolved against the current store
    #[serde(rename = "Var")]
    Var { name: String },

    /// Reference to a function by name; evaluates to the name as a string
    #[serde(rename = "FuncRef")]
    FunctionRef { name: String },

    #[serde(rename = "UnOpt")]
    Unary { op: Operator, rhs: Box<Expr> },

    #[serde(rename = "BinOpt")]
    Binary {
        op: Operator,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    #[serde(rename = "NOpt")]
    Nary { op: Operator, args: Vec<Expr> },
}

impl Expr {
    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::Literal {
            value: value.into(),
        }
    }

    pub fn int(n: i64) -> Self {
        Expr::literal(Value::int(n))
    }

    pub fn bool(b: bool) -> Self {
        Expr::literal(Value::bool(b))
    }

    pub fn str(s: &str) -> Self {
        Expr::literal(Value::str(s))
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var { name: name.into() }
    }

    pub fn function_ref(name: impl Into<String>) -> Self {
        Expr::FunctionRef { name: name.into() }
    }

    pub fn unary(op: Operator, rhs: Expr) -> Self {
        Expr::Unary {
            op,
            rhs: Box::new(rhs),
        }
    }

    pub fn binary(op: Operator, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn nary(op: Operator, args: Vec<Expr>) -> Self {
        Expr::Nary { op, args }
    }

    /// Evaluate against the current store; the heap is only read
    pub fn eval(&self, store: &Store, heap: &Heap) -> Result<Value, EslError> {
        match self {
            Expr::Literal { value } => Ok(value.clone()),
            Expr::Var { name } => store.get(name).cloned(),
            Expr::FunctionRef { name } => Ok(Value::str(name.as_str())),
            Expr::Unary { op, rhs } => {
                let v = rhs.eval(store, heap)?;
                operator::apply_unary(*op, v, heap)
            }
            Expr::Binary { op, lhs, rhs } => {
                let l = lhs.eval(store, heap)?;
                let r = rhs.eval(store, heap)?;
                operator::apply_binary(*op, l, r, heap)
            }
            Expr::Nary { op, args } => {
                let values = args
                    .iter()
                    .map(|arg| arg.eval(store, heap))
                    .collect::<Result<Vec<_>, _>>()?;
                operator::apply_nary(*op, values)
            }
        }
    }

    /// Variables read by this expression, in order of first occurrence
    pub fn vars(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_vars(&mut out);
        out
    }

    fn collect_vars<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Var { name } => {
                if !out.contains(&name.as_str()) {
                    out.push(name.as_str());
                }
            }
            Expr::Literal { .. } | Expr::FunctionRef { .. } => {}
            Expr::Unary { rhs, .. } => rhs.collect_vars(out),
            Expr::Binary { lhs, rhs, .. } => {
                lhs.collect_vars(out);
                rhs.collect_vars(out);
            }
            Expr::Nary { args, .. } => {
                for arg in args {
                    arg.collect_vars(out);
                }
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal { value } => write!(f, "{}", value),
            Expr::Var { name } => write!(f, "{}", name),
            Expr::FunctionRef { name } => write!(f, "{}", name),
            Expr::Unary { op, rhs } => write!(f, "({} {})", op.symbol(), rhs),
            Expr::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
            Expr::Nary { op, args } => {
                write!(f, "{}(", op.symbol())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

// ============ STATEMENTS ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Stmt {
    Skip,

    /// Marks the point where the branches of a conditional rejoin
    Merge,

    Block { stmts: Vec<Rc<Stmt>> },

    /// `x := e`
    Assign {
        #[serde(rename = "lhs")]
        target: String,
        #[serde(rename = "expr")]
        value: Expr,
    },

    /// `x := f(e1, ..., en)`
    AssignCall {
        #[serde(rename = "lhs")]
        target: String,
        func: Expr,
        args: Vec<Expr>,
    },

    /// `x := {}`
    AssignNewObj {
        #[serde(rename = "lhs")]
        target: String,
    },

    /// `x := o[f]`
    FieldLookup {
        #[serde(rename = "lhs")]
        target: String,
        #[serde(rename = "obj")]
        object: Expr,
        field: Expr,
    },

    /// `o[f] := e`
    FieldAssign {
        #[serde(rename = "obj")]
        object: Expr,
        field: Expr,
        #[serde(rename = "expr")]
        value: Expr,
    },

    /// `delete o[f]`
    FieldDelete {
        #[serde(rename = "obj")]
        object: Expr,
        field: Expr,
    },

    Condition {
        #[serde(rename = "expr")]
        guard: Expr,
        then: Rc<Stmt>,
        #[serde(rename = "else", default, skip_serializing_if = "Option::is_none")]
        otherwise: Option<Rc<Stmt>>,
    },

    While {
        #[serde(rename = "expr")]
        guard: Expr,
        body: Rc<Stmt>,
    },

    Return {
        #[serde(rename = "expr")]
        value: Expr,
    },
}

impl Stmt {
    pub fn block(stmts: Vec<Stmt>) -> Self {
        Stmt::Block {
            stmts: stmts.into_iter().map(Rc::new).collect(),
        }
    }

    pub fn assign(target: impl Into<String>, value: Expr) -> Self {
        Stmt::Assign {
            target: target.into(),
            value,
        }
    }

    /// Call a function named by a literal, the common case
    pub fn call(target: impl Into<String>, function: &str, args: Vec<Expr>) -> Self {
        Stmt::AssignCall {
            target: target.into(),
            func: Expr::function_ref(function),
            args,
        }
    }

    pub fn new_object(target: impl Into<String>) -> Self {
        Stmt::AssignNewObj {
            target: target.into(),
        }
    }

    pub fn lookup(target: impl Into<String>, object: Expr, field: Expr) -> Self {
        Stmt::FieldLookup {
            target: target.into(),
            object,
            field,
        }
    }

    pub fn field_assign(object: Expr, field: Expr, value: Expr) -> Self {
        Stmt::FieldAssign {
            object,
            field,
            value,
        }
    }

    pub fn field_delete(object: Expr, field: Expr) -> Self {
        Stmt::FieldDelete { object, field }
    }

    pub fn if_then(guard: Expr, then: Stmt) -> Self {
        Stmt::Condition {
            guard,
            then: Rc::new(then),
            otherwise: None,
        }
    }

    pub fn if_else(guard: Expr, then: Stmt, otherwise: Stmt) -> Self {
        Stmt::Condition {
            guard,
            then: Rc::new(then),
            otherwise: Some(Rc::new(otherwise)),
        }
    }

    pub fn while_loop(guard: Expr, body: Stmt) -> Self {
        Stmt::While {
            guard,
            body: Rc::new(body),
        }
    }

    pub fn ret(value: Expr) -> Self {
        Stmt::Return { value }
    }

    /// Name of the statement form, as used in traces
    pub fn kind(&self) -> &'static str {
        match self {
            Stmt::Skip => "Skip",
            Stmt::Merge => "Merge",
            Stmt::Block { .. } => "Block",
            Stmt::Assign { .. } => "Assign",
            Stmt::AssignCall { .. } => "AssignCall",
            Stmt::AssignNewObj { .. } => "AssignNewObj",
            Stmt::FieldLookup { .. } => "FieldLookup",
            Stmt::FieldAssign { .. } => "FieldAssign",
            Stmt::FieldDelete { .. } => "FieldDelete",
            Stmt::Condition { .. } => "Condition",
            Stmt::While { .. } => "While",
            Stmt::Return { .. } => "Return",
        }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        match self {
            Stmt::Skip => write!(f, "{}skip", pad),
            Stmt::Merge => write!(f, "{}merge", pad),
            Stmt::Block { stmts } => {
                writeln!(f, "{}{{", pad)?;
                for stmt in stmts {
                    stmt.fmt_indented(f, depth + 1)?;
                    writeln!(f, ";")?;
                }
                write!(f, "{}}}", pad)
            }
            Stmt::Assign { target, value } => write!(f, "{}{} := {}", pad, target, value),
            Stmt::AssignCall { target, func, args } => {
                write!(f, "{}{} := {}(", pad, target, func)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Stmt::AssignNewObj { target } => write!(f, "{}{} := {{}}", pad, target),
            Stmt::FieldLookup {
                target,
                object,
                field,
            } => write!(f, "{}{} := {}[{}]", pad, target, object, field),
            Stmt::FieldAssign {
                object,
                field,
                value,
            } => write!(f, "{}{}[{}] := {}", pad, object, field, value),
            Stmt::FieldDelete { object, field } => write!(f, "{}delete {}[{}]", pad, object, field),
            Stmt::Condition {
                guard,
                then,
                otherwise,
            } => {
                writeln!(f, "{}if ({})", pad, guard)?;
                then.fmt_indented(f, depth + 1)?;
                if let Some(otherwise) = otherwise {
                    writeln!(f)?;
                    writeln!(f, "{}else", pad)?;
                    otherwise.fmt_indented(f, depth + 1)?;
                }
                Ok(())
            }
            Stmt::While { guard, body } => {
                writeln!(f, "{}while ({})", pad, guard)?;
                body.fmt_indented(f, depth + 1)
            }
            Stmt::Return { value } => write!(f, "{}return {}", pad, value),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

// ============ FUNCTIONS & PROGRAMS ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub params: Vec<String>,
    pub body: Rc<Stmt>,
}

impl Function {
    pub fn new(name: impl Into<String>, params: &[&str], body: Stmt) -> Self {
        Self {
            name: name.into(),
            params: params.iter().map(|p| p.to_string()).collect(),
            body: Rc::new(body),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "function {}({})", self.name, self.params.join(", "))?;
        write!(f, "{}", self.body)
    }
}

/// An immutable table of functions, keyed by unique name
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    functions: IndexMap<String, Function>,
}

impl Program {
    /// Build a program, rejecting duplicate function or parameter names
    pub fn new(functions: Vec<Function>) -> Result<Self, EslError> {
        let mut table = index_map_new();
        for function in functions {
            if table.contains_key(&function.name) {
                return Err(EslError::ingest(format!(
                    "duplicate function '{}'",
                    function.name
                )));
            }
            let mut seen: Vec<&str> = Vec::with_capacity(function.params.len());
            for param in &function.params {
                if seen.contains(&param.as_str()) {
                    return Err(EslError::ingest(format!(
                        "duplicate parameter '{}' in function '{}'",
                        param, function.name
                    )));
                }
                seen.push(param);
            }
            table.insert(function.name.clone(), function);
        }
        Ok(Self { functions: table })
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    /// Functions in declaration order
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.functions.values()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, function) in self.functions().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", function)?;
        }
        Ok(())
    }
}

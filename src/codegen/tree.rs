//! Host-language syntax trees produced by translation

use crate::operator::{Arity, Operator};
use crate::value::Value;

/// Constant operand a host form appends to the translated operands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostConst {
    Int(i64),
    Str(&'static str),
}

/// How an operator is spelled in the host language
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostForm {
    /// `a op b`
    Infix(&'static str),
    /// `a op b` with short-circuit semantics
    Logical(&'static str),
    /// `op a`
    Prefix(&'static str),
    /// `a.name(b, ..)`, optionally with a trailing constant argument
    Method(&'static str, Option<HostConst>),
    /// `a[b]`
    Index,
    /// `a[k]`
    IndexConst(i64),
    /// `a.name`
    Property(&'static str),
    /// `f(a, ..)` for a global or dotted function
    Call(&'static str),
    /// `[a, b, ..]`
    Array,
    /// `[...a, b]`
    Append,
    /// `a op b op ..`, or the identity when there are no operands
    Fold { op: &'static str, identity: bool },
}

/// The host form of an operator
pub fn host_form(op: Operator) -> HostForm {
    match op {
        Operator::Plus => HostForm::Infix("+"),
        Operator::Minus => HostForm::Infix("-"),
        Operator::Times => HostForm::Infix("*"),
        Operator::Div => HostForm::Infix("/"),
        Operator::Equal => HostForm::Infix("==="),
        Operator::Gt => HostForm::Infix(">"),
        Operator::Lt => HostForm::Infix("<"),
        Operator::Egt => HostForm::Infix(">="),
        Operator::Elt => HostForm::Infix("<="),
        Operator::LogAnd => HostForm::Logical("&&"),
        Operator::LogOr => HostForm::Logical("||"),
        Operator::InObj => HostForm::Method("hasOwnProperty", None),
        Operator::InList => HostForm::Method("includes", None),
        Operator::Lnth | Operator::Tnth => HostForm::Index,
        Operator::Ladd => HostForm::Append,
        Operator::Lconcat => HostForm::Method("concat", None),
        Operator::Neg => HostForm::Prefix("-"),
        Operator::Not => HostForm::Prefix("!"),
        Operator::Typeof => HostForm::Prefix("typeof"),
        Operator::ListLen | Operator::TupleLen => HostForm::Property("length"),
        Operator::Head | Operator::First => HostForm::IndexConst(0),
        Operator::Second | Operator::Tail => HostForm::Method("slice", Some(HostConst::Int(1))),
        Operator::IntToFloat => HostForm::Call("Number"),
        Operator::FloatToString => HostForm::Call("String"),
        Operator::ObjToList => HostForm::Call("Object.entries"),
        Operator::Sconcat => HostForm::Method("join", Some(HostConst::Str(""))),
        Operator::ListExpr | Operator::TupleExpr => HostForm::Array,
        Operator::NaryAnd => HostForm::Fold {
            op: "&&",
            identity: true,
        },
        Operator::NaryOr => HostForm::Fold {
            op: "||",
            identity: false,
        },
    }
}

/// Whether `count` operands fit the operator's arity
pub(crate) fn accepts(op: Operator, count: usize) -> bool {
    match op.arity() {
        Arity::Unary => count == 1,
        Arity::Binary => count == 2,
        Arity::Nary => true,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostExpr {
    Literal(Value),
    Identifier(String),
    /// A function referenced by name
    FunctionName(String),
    Operation {
        operator: Operator,
        form: HostForm,
        operands: Vec<HostExpr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostStmt {
    Skip,
    Assign {
        target: String,
        value: HostExpr,
    },
    Call {
        target: String,
        callee: HostExpr,
        args: Vec<HostExpr>,
    },
    NewObject {
        target: String,
    },
    FieldLookup {
        target: String,
        object: HostExpr,
        field: HostExpr,
    },
    FieldAssign {
        object: HostExpr,
        field: HostExpr,
        value: HostExpr,
    },
    FieldDelete {
        object: HostExpr,
        field: HostExpr,
    },
    If {
        guard: HostExpr,
        then: Box<HostStmt>,
        otherwise: Option<Box<HostStmt>>,
    },
    While {
        guard: HostExpr,
        body: Box<HostStmt>,
    },
    Return(HostExpr),
    Block(Vec<HostStmt>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HostFunction {
    pub name: String,
    pub params: Vec<String>,
    pub body: HostStmt,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HostProgram {
    pub functions: Vec<HostFunction>,
}

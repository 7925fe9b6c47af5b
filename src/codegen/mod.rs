//! Translation of ECMA-SL programs into host-language syntax trees
//!
//! This module backs the "compile instead of interpret" mode: every
//! expression and statement has a host tree form carrying the operator
//! identity and the translated operands. The trees can be lifted back
//! into ECMA-SL, or rendered as ESTree JSON for an external printer.
//!
//! Translation is total except for operators placed in a node whose
//! operand count does not match their arity, which fail with
//! `UnsupportedOperator`.

mod estree;
mod translate_expr;
mod translate_stmt;
mod tree;

pub use translate_expr::{lift_expr, translate_expr};
pub use translate_stmt::{
    lift_function, lift_program, lift_stmt, translate_function, translate_program, translate_stmt,
};
pub use tree::{HostConst, HostExpr, HostForm, HostFunction, HostProgram, HostStmt, host_form};

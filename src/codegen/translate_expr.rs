//! Expression translation and lifting

use super::tree::{HostExpr, accepts, host_form};
use crate::ast::Expr;
use crate::error::EslError;
use crate::operator::{Arity, Operator};

/// Translate an expression into its host tree
///
/// Fails with `UnsupportedOperator` when an operator appears in a node
/// whose operand count does not match its arity.
pub fn translate_expr(expr: &Expr) -> Result<HostExpr, EslError> {
    match expr {
        Expr::Literal { value } => Ok(HostExpr::Literal(value.clone())),
        Expr::Var { name } => Ok(HostExpr::Identifier(name.clone())),
        Expr::FunctionRef { name } => Ok(HostExpr::FunctionName(name.clone())),
        Expr::Unary { op, rhs } => operation(*op, [rhs.as_ref()]),
        Expr::Binary { op, lhs, rhs } => operation(*op, [lhs.as_ref(), rhs.as_ref()]),
        Expr::Nary { op, args } => operation(*op, args),
    }
}

fn operation<'a, I>(op: Operator, operands: I) -> Result<HostExpr, EslError>
where
    I: IntoIterator<Item = &'a Expr>,
    I::IntoIter: ExactSizeIterator,
{
    let operands = operands.into_iter();
    if !accepts(op, operands.len()) {
        return Err(EslError::unsupported_operator(op.tag()));
    }
    Ok(HostExpr::Operation {
        operator: op,
        form: host_form(op),
        operands: operands.map(translate_expr).collect::<Result<_, _>>()?,
    })
}

/// Rebuild an expression from its host tree
pub fn lift_expr(host: &HostExpr) -> Result<Expr, EslError> {
    match host {
        HostExpr::Literal(value) => Ok(Expr::literal(value.clone())),
        HostExpr::Identifier(name) => Ok(Expr::var(name.as_str())),
        HostExpr::FunctionName(name) => Ok(Expr::function_ref(name.as_str())),
        HostExpr::Operation {
            operator, operands, ..
        } => {
            let mut lifted = operands
                .iter()
                .map(lift_expr)
                .collect::<Result<Vec<_>, _>>()?;
            let op = *operator;
            match (op.arity(), lifted.len()) {
                (Arity::Unary, 1) => match lifted.pop() {
                    Some(rhs) => Ok(Expr::unary(op, rhs)),
                    None => Err(EslError::arity_mismatch(1, 0)),
                },
                (Arity::Binary, 2) => {
                    let rhs = lifted.pop();
                    let lhs = lifted.pop();
                    match (lhs, rhs) {
                        (Some(lhs), Some(rhs)) => Ok(Expr::binary(op, lhs, rhs)),
                        _ => Err(EslError::arity_mismatch(2, 0)),
                    }
                }
                (Arity::Nary, _) => Ok(Expr::nary(op, lifted)),
                (Arity::Unary, n) => Err(EslError::arity_mismatch(1, n)),
                (Arity::Binary, n) => Err(EslError::arity_mismatch(2, n)),
            }
        }
    }
}

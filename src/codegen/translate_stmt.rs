//! Statement, function and program translation and lifting

use super::translate_expr::{lift_expr, translate_expr};
use super::tree::{HostExpr, HostFunction, HostProgram, HostStmt};
use crate::ast::{Expr, Function, Program, Stmt};
use crate::error::EslError;
use crate::prelude::Rc;

/// Translate a statement into its host tree
///
/// `Merge` only marks a rejoin point during execution and becomes `Skip`.
pub fn translate_stmt(stmt: &Stmt) -> Result<HostStmt, EslError> {
    Ok(match stmt {
        Stmt::Skip | Stmt::Merge => HostStmt::Skip,
        Stmt::Block { stmts } => HostStmt::Block(
            stmts
                .iter()
                .map(|s| translate_stmt(s))
                .collect::<Result<_, _>>()?,
        ),
        Stmt::Assign { target, value } => HostStmt::Assign {
            target: target.clone(),
            value: translate_expr(value)?,
        },
        Stmt::AssignCall { target, func, args } => HostStmt::Call {
            target: target.clone(),
            callee: translate_expr(func)?,
            args: translate_all(args)?,
        },
        Stmt::AssignNewObj { target } => HostStmt::NewObject {
            target: target.clone(),
        },
        Stmt::FieldLookup {
            target,
            object,
            field,
        } => HostStmt::FieldLookup {
            target: target.clone(),
            object: translate_expr(object)?,
            field: translate_expr(field)?,
        },
        Stmt::FieldAssign {
            object,
            field,
            value,
        } => HostStmt::FieldAssign {
            object: translate_expr(object)?,
            field: translate_expr(field)?,
            value: translate_expr(value)?,
        },
        Stmt::FieldDelete { object, field } => HostStmt::FieldDelete {
            object: translate_expr(object)?,
            field: translate_expr(field)?,
        },
        Stmt::Condition {
            guard,
            then,
            otherwise,
        } => HostStmt::If {
            guard: translate_expr(guard)?,
            then: Box::new(translate_stmt(then)?),
            otherwise: match otherwise {
                Some(otherwise) => Some(Box::new(translate_stmt(otherwise)?)),
                None => None,
            },
        },
        Stmt::While { guard, body } => HostStmt::While {
            guard: translate_expr(guard)?,
            body: Box::new(translate_stmt(body)?),
        },
        Stmt::Return { value } => HostStmt::Return(translate_expr(value)?),
    })
}

fn translate_all(exprs: &[Expr]) -> Result<Vec<HostExpr>, EslError> {
    exprs.iter().map(translate_expr).collect()
}

pub fn translate_function(function: &Function) -> Result<HostFunction, EslError> {
    Ok(HostFunction {
        name: function.name.clone(),
        params: function.params.clone(),
        body: translate_stmt(&function.body)?,
    })
}

/// Translate every function, in declaration order
pub fn translate_program(program: &Program) -> Result<HostProgram, EslError> {
    Ok(HostProgram {
        functions: program
            .functions()
            .map(translate_function)
            .collect::<Result<_, _>>()?,
    })
}

/// Rebuild a statement from its host tree
pub fn lift_stmt(host: &HostStmt) -> Result<Stmt, EslError> {
    Ok(match host {
        HostStmt::Skip => Stmt::Skip,
        HostStmt::Block(stmts) => Stmt::Block {
            stmts: stmts
                .iter()
                .map(|s| lift_stmt(s).map(Rc::new))
                .collect::<Result<_, _>>()?,
        },
        HostStmt::Assign { target, value } => Stmt::assign(target.as_str(), lift_expr(value)?),
        HostStmt::Call {
            target,
            callee,
            args,
        } => Stmt::AssignCall {
            target: target.clone(),
            func: lift_expr(callee)?,
            args: args.iter().map(lift_expr).collect::<Result<_, _>>()?,
        },
        HostStmt::NewObject { target } => Stmt::new_object(target.as_str()),
        HostStmt::FieldLookup {
            target,
            object,
            field,
        } => Stmt::lookup(target.as_str(), lift_expr(object)?, lift_expr(field)?),
        HostStmt::FieldAssign {
            object,
            field,
            value,
        } => Stmt::field_assign(lift_expr(object)?, lift_expr(field)?, lift_expr(value)?),
        HostStmt::FieldDelete { object, field } => {
            Stmt::field_delete(lift_expr(object)?, lift_expr(field)?)
        }
        HostStmt::If {
            guard,
            then,
            otherwise,
        } => Stmt::Condition {
            guard: lift_expr(guard)?,
            then: Rc::new(lift_stmt(then)?),
            otherwise: match otherwise {
                Some(otherwise) => Some(Rc::new(lift_stmt(otherwise)?)),
                None => None,
            },
        },
        HostStmt::While { guard, body } => Stmt::while_loop(lift_expr(guard)?, lift_stmt(body)?),
        HostStmt::Return(value) => Stmt::ret(lift_expr(value)?),
    })
}

pub fn lift_function(host: &HostFunction) -> Result<Function, EslError> {
    Ok(Function {
        name: host.name.clone(),
        params: host.params.clone(),
        body: Rc::new(lift_stmt(&host.body)?),
    })
}

pub fn lift_program(host: &HostProgram) -> Result<Program, EslError> {
    let functions = host
        .functions
        .iter()
        .map(lift_function)
        .collect::<Result<Vec<_>, _>>()?;
    Program::new(functions)
}

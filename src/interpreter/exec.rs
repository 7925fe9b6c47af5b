//! Single-statement execution
//!
//! [`execute`] runs the statement that was just popped off the head of the
//! continuation and returns the security label of that step. On error the
//! configuration is left exactly as it was before the statement ran (apart
//! from the popped head), so the caller can restore the head and snapshot a
//! consistent state.

use crate::ast::{Expr, Program, Stmt};
use crate::error::EslError;
use crate::heap::Heap;
use crate::label::SecurityLabel;
use crate::prelude::Rc;
use crate::store::Store;
use crate::value::{Location, Primitive, Value};

use super::Configuration;
use super::interceptor::{Interception, Interceptor};
use super::stack::{CallStackFrame, Continuation};

pub(crate) fn execute(
    program: &Program,
    interceptor: &mut Option<Box<dyn Interceptor>>,
    stmt: &Rc<Stmt>,
    config: &mut Configuration,
) -> Result<SecurityLabel, EslError> {
    match stmt.as_ref() {
        // ═══════════════════════════════════════════════════════════════
        // Structural
        // ═══════════════════════════════════════════════════════════════
        Stmt::Skip | Stmt::Merge => Ok(SecurityLabel::Empty),

        Stmt::Block { stmts } => {
            config.continuation.prepend(stmts.iter().cloned());
            Ok(SecurityLabel::Empty)
        }

        // ═══════════════════════════════════════════════════════════════
        // Assignment
        // ═══════════════════════════════════════════════════════════════
        Stmt::Assign { target, value } => {
            let v = value.eval(&config.store, &config.heap)?;
            config.store.set(target.as_str(), v);
            Ok(SecurityLabel::Empty)
        }

        Stmt::AssignCall { target, func, args } => {
            exec_call(program, interceptor, target, func, args, config)
        }

        Stmt::AssignNewObj { target } => {
            let location = config.heap.allocate_object();
            config.store.set(target.as_str(), Value::Location(location));
            Ok(SecurityLabel::AllocateObject {
                variable: target.clone(),
                location,
            })
        }

        // ═══════════════════════════════════════════════════════════════
        // Heap access
        // ═══════════════════════════════════════════════════════════════
        Stmt::FieldLookup {
            target,
            object,
            field,
        } => {
            let (location, field) = object_field(object, field, &config.store, &config.heap)?;
            let v = config.heap.get_field(location, &field)?;
            config.store.set(target.as_str(), v);
            Ok(SecurityLabel::Empty)
        }

        Stmt::FieldAssign {
            object,
            field,
            value,
        } => {
            let (location, field) = object_field(object, field, &config.store, &config.heap)?;
            let v = value.eval(&config.store, &config.heap)?;
            config.heap.set_field(location, field, v)?;
            Ok(SecurityLabel::Empty)
        }

        Stmt::FieldDelete { object, field } => {
            let (location, field) = object_field(object, field, &config.store, &config.heap)?;
            config.heap.delete_field(location, &field)?;
            Ok(SecurityLabel::Empty)
        }

        // ═══════════════════════════════════════════════════════════════
        // Control flow
        // ═══════════════════════════════════════════════════════════════
        Stmt::Condition {
            guard,
            then,
            otherwise,
        } => {
            let taken = guard_value(guard, config)?;
            let branch = if taken { Some(then) } else { otherwise.as_ref() };
            match branch {
                Some(branch) => {
                    config
                        .continuation
                        .prepend([Rc::clone(branch), Rc::new(Stmt::Merge)]);
                    Ok(SecurityLabel::Branch(guard.clone()))
                }
                None => Ok(SecurityLabel::Empty),
            }
        }

        Stmt::While { guard, body } => {
            if guard_value(guard, config)? {
                config
                    .continuation
                    .prepend([Rc::clone(body), Rc::new(Stmt::Merge), Rc::clone(stmt)]);
                Ok(SecurityLabel::Branch(guard.clone()))
            } else {
                Ok(SecurityLabel::Empty)
            }
        }

        Stmt::Return { value } => {
            let v = value.eval(&config.store, &config.heap)?;
            match config.call_stack.pop() {
                Some(frame) => {
                    config.store = frame.store;
                    config.continuation = frame.continuation;
                    if let Some(destination) = frame.destination {
                        config.store.set(destination, v);
                    }
                    Ok(SecurityLabel::Return(value.clone()))
                }
                None => {
                    config.continuation.clear();
                    config.final_return = Some(v);
                    Ok(SecurityLabel::Empty)
                }
            }
        }
    }
}

fn exec_call(
    program: &Program,
    interceptor: &mut Option<Box<dyn Interceptor>>,
    target: &str,
    func: &Expr,
    args: &[Expr],
    config: &mut Configuration,
) -> Result<SecurityLabel, EslError> {
    let callee = func.eval(&config.store, &config.heap)?;
    let name = match callee {
        Value::Primitive(Primitive::Str(name)) => name,
        other => {
            return Err(EslError::type_error(format!(
                "callee must be a function name, got {}",
                other.type_name()
            )));
        }
    };
    let values = args
        .iter()
        .map(|arg| arg.eval(&config.store, &config.heap))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(function) = program.function(&name) {
        let callee_store = Store::bind(&function.params, values)?;
        let caller_store = std::mem::replace(&mut config.store, callee_store);
        let rest = std::mem::replace(
            &mut config.continuation,
            Continuation::single(Rc::clone(&function.body)),
        );
        config
            .call_stack
            .push(CallStackFrame::new(target, rest, caller_store));
        return Ok(SecurityLabel::Empty);
    }

    let handled = match interceptor {
        Some(interceptor) => interceptor.intercept(&name, &values),
        None => Interception::Declined,
    };
    match handled {
        Interception::Handled(v) => {
            config.store.set(target, v);
            Ok(SecurityLabel::Empty)
        }
        Interception::Declined => Err(EslError::unknown_function(name)),
    }
}

fn guard_value(guard: &Expr, config: &Configuration) -> Result<bool, EslError> {
    let v = guard.eval(&config.store, &config.heap)?;
    v.as_bool().ok_or_else(|| {
        EslError::type_error(format!("guard must be a boolean, got {}", v.type_name()))
    })
}

fn object_field(
    object: &Expr,
    field: &Expr,
    store: &Store,
    heap: &Heap,
) -> Result<(Location, String), EslError> {
    let obj = object.eval(store, heap)?;
    let location = obj.as_location().ok_or_else(|| {
        EslError::type_error(format!("expected an object location, got {}", obj.type_name()))
    })?;
    let key = field.eval(store, heap)?;
    match key {
        Value::Primitive(Primitive::Str(name)) => Ok((location, name)),
        other => Err(EslError::type_error(format!(
            "field name must be a string, got {}",
            other.type_name()
        ))),
    }
}

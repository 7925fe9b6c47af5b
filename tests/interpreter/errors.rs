//! Error tests: every failing step faults the run with a snapshot

use super::{eval_result, init_tracing, main_only, program};
use ecmasl::{EslError, Expr, Interpreter, Operator, RunConfig, Status, Stmt, Value};
use serde_json::json;

#[test]
fn test_undefined_function_without_interceptor() {
    let p = program(json!({"funcs": [{
        "name": "main", "params": [],
        "body": {"type": "AssignCall", "lhs": "r",
                 "func": {"type": "FuncRef", "name": "nowhere"}, "args": []}
    }]}));
    init_tracing();
    let mut interp = Interpreter::new(p);
    interp.prepare(&RunConfig::default()).unwrap();
    let fault = interp.run().unwrap_err();
    assert_eq!(fault.error, EslError::unknown_function("nowhere"));
    assert_eq!(interp.status(), Status::Faulted);
    assert_eq!(interp.last_fault().map(|f| f.kind()), Some("UnknownFunction"));
}

#[test]
fn test_unbound_variable() {
    let p = main_only(Stmt::ret(Expr::var("ghost")));
    let fault = eval_result(p).unwrap_err();
    assert_eq!(fault.error, EslError::unbound("ghost"));
    assert_eq!(fault.statement.as_deref(), Some(&Stmt::ret(Expr::var("ghost"))));
}

#[test]
fn test_non_boolean_guard() {
    let p = main_only(Stmt::if_then(Expr::int(1), Stmt::Skip));
    assert_eq!(eval_result(p).unwrap_err().kind(), "TypeError");

    let p = main_only(Stmt::while_loop(Expr::str("yes"), Stmt::Skip));
    assert_eq!(eval_result(p).unwrap_err().kind(), "TypeError");
}

#[test]
fn test_non_string_callee() {
    let p = main_only(Stmt::AssignCall {
        target: "r".to_string(),
        func: Expr::int(3),
        args: vec![],
    });
    assert_eq!(eval_result(p).unwrap_err().kind(), "TypeError");
}

#[test]
fn test_operator_failures() {
    let div = main_only(Stmt::ret(Expr::binary(Operator::Div, Expr::int(1), Expr::int(0))));
    assert_eq!(eval_result(div).unwrap_err().kind(), "RangeError");

    let misplaced = main_only(Stmt::ret(Expr::unary(Operator::Plus, Expr::int(1))));
    assert_eq!(
        eval_result(misplaced).unwrap_err().error,
        EslError::unsupported_operator("Plus")
    );

    let bad_operand = main_only(Stmt::ret(Expr::unary(Operator::Not, Expr::int(1))));
    assert_eq!(eval_result(bad_operand).unwrap_err().kind(), "TypeError");
}

#[test]
fn test_fault_snapshot_reflects_state_before_failure() {
    let p = main_only(Stmt::block(vec![
        Stmt::assign("x", Expr::int(1)),
        Stmt::new_object("o"),
        Stmt::assign("y", Expr::var("missing")),
        Stmt::assign("z", Expr::int(3)),
    ]));
    let fault = eval_result(p).unwrap_err();
    let config = &fault.configuration;
    assert_eq!(config.store.get("x"), Ok(&Value::int(1)));
    assert!(!config.store.contains("y"));
    assert_eq!(config.heap.len(), 1);
    // failing statement first, then the rest
    assert_eq!(config.continuation.len(), 2);
    assert_eq!(config.continuation.head().map(|s| s.kind()), Some("Assign"));
}

#[test]
fn test_fault_is_sticky() {
    let p = main_only(Stmt::block(vec![
        Stmt::assign("y", Expr::var("missing")),
        Stmt::ret(Expr::int(1)),
    ]));
    let mut interp = Interpreter::new(p);
    interp.prepare(&RunConfig::default()).unwrap();
    let first = interp.run().unwrap_err();
    let steps = interp.steps();
    let second = interp.step().unwrap_err();
    assert_eq!(first.error, second.error);
    assert_eq!(interp.steps(), steps);

    // a fresh prepare clears the fault
    interp.prepare(&RunConfig::default()).unwrap();
    assert_eq!(interp.status(), Status::Running);
    assert!(interp.last_fault().is_none());
}

#[test]
fn test_ingest_errors() {
    let err = ecmasl::Program::from_json(r#"{"funcs": [{"name": "main"}]}"#).unwrap_err();
    assert_eq!(err.kind(), "IngestError");

    let dup = json!({"funcs": [
        {"name": "f", "params": [], "body": {"type": "Skip"}},
        {"name": "f", "params": [], "body": {"type": "Skip"}}
    ]});
    let err = ecmasl::ingest::program_from_value(dup).unwrap_err();
    assert!(err.to_string().contains("duplicate function 'f'"));
}

//! Security label tests: one label per step, in execution order

use super::{init_tracing, kinds, main_only, program, run_logged};
use ecmasl::{
    Expr, Function, Interpreter, LabelLog, Location, Operator, Program, RunConfig,
    SecurityLabel, SecurityLevel, ShadowConfiguration, Stmt, Value,
};
use serde_json::json;

#[test]
fn test_else_branch_labels() {
    // main() { if (false) { return 1 } else { return 2 } }
    let p = program(json!({"funcs": [{
        "name": "main", "params": [],
        "body": {"type": "Condition",
            "expr": {"type": "Val", "value": {"Primitive": false}},
            "then": {"type": "Return", "expr": {"type": "Val", "value": {"Primitive": 1}}},
            "else": {"type": "Return", "expr": {"type": "Val", "value": {"Primitive": 2}}}}
    }]}));
    let (result, labels) = run_logged(p);
    assert_eq!(result.unwrap(), Some(Value::int(2)));

    // condition, then the top-level return (which ends the run)
    assert_eq!(kinds(&labels), vec!["Branch", "Empty"]);
    assert_eq!(labels[0], SecurityLabel::Branch(Expr::bool(false)));
    let branches = labels.iter().filter(|l| matches!(l, SecurityLabel::Branch(_))).count();
    assert_eq!(branches, 1);
}

#[test]
fn test_return_label_carries_the_expression() {
    let p = Program::new(vec![
        Function::new(
            "main",
            &[],
            Stmt::block(vec![
                Stmt::call("r", "helper", vec![Expr::int(5)]),
                Stmt::ret(Expr::var("r")),
            ]),
        ),
        Function::new(
            "helper",
            &["n"],
            Stmt::ret(Expr::binary(Operator::Times, Expr::var("n"), Expr::int(2))),
        ),
    ])
    .unwrap();
    let (result, labels) = run_logged(p);
    assert_eq!(result.unwrap(), Some(Value::int(10)));
    assert_eq!(kinds(&labels), vec!["Empty", "Empty", "Return", "Empty"]);
    assert_eq!(
        labels[2],
        SecurityLabel::Return(Expr::binary(Operator::Times, Expr::var("n"), Expr::int(2)))
    );
}

#[test]
fn test_allocation_label() {
    let p = main_only(Stmt::block(vec![Stmt::new_object("obj"), Stmt::ret(Expr::var("obj"))]));
    let (_, labels) = run_logged(p);
    assert_eq!(
        labels[1],
        SecurityLabel::AllocateObject {
            variable: "obj".to_string(),
            location: Location::new(0),
        }
    );
    assert_eq!(labels[1].to_string(), "AssignNewObjLab(obj, $loc_0)");
}

#[test]
fn test_label_stream_is_complete() {
    let p = main_only(Stmt::block(vec![
        Stmt::assign("i", Expr::int(0)),
        Stmt::while_loop(
            Expr::binary(Operator::Lt, Expr::var("i"), Expr::int(4)),
            Stmt::block(vec![
                Stmt::if_else(
                    Expr::binary(Operator::Equal, Expr::var("i"), Expr::int(2)),
                    Stmt::new_object("o"),
                    Stmt::Skip,
                ),
                Stmt::assign("i", Expr::binary(Operator::Plus, Expr::var("i"), Expr::int(1))),
            ]),
        ),
    ]));
    init_tracing();
    let mut interp = Interpreter::with_monitor(p, LabelLog::new());
    interp.prepare(&RunConfig::default()).unwrap();
    interp.run().unwrap();

    let steps = interp.steps() as usize;
    let log = interp.monitor();
    assert_eq!(log.labels().len(), steps);
    // while guard 4 times true, if guard 4 times true
    assert_eq!(log.kinds().iter().filter(|k| **k == "Branch").count(), 8);
    assert_eq!(log.kinds().iter().filter(|k| **k == "AllocateObject").count(), 1);
}

#[test]
fn test_closure_monitor_advances_shadow() {
    let p = main_only(Stmt::block(vec![
        Stmt::new_object("a"),
        Stmt::new_object("b"),
        Stmt::if_then(Expr::bool(true), Stmt::Skip),
        Stmt::ret(Expr::var("a")),
    ]));

    let mut seen = 0usize;
    let monitor = move |label: SecurityLabel, mut shadow: ShadowConfiguration| {
        seen += 1;
        match label {
            SecurityLabel::AllocateObject { variable, location } => {
                shadow.heap.allocate(location);
                shadow.store.set(variable, SecurityLevel::Low);
            }
            SecurityLabel::Branch(guard) => {
                for var in guard.vars() {
                    shadow.store.set(var, SecurityLevel::High);
                }
                shadow.store.set(format!("branch{}", seen), SecurityLevel::High);
            }
            _ => {}
        }
        shadow
    };

    let mut interp = Interpreter::with_monitor(p, monitor);
    interp.prepare(&RunConfig::default()).unwrap();
    interp.run().unwrap();

    let shadow = interp.shadow();
    assert!(shadow.heap.contains(Location::new(0)));
    assert!(shadow.heap.contains(Location::new(1)));
    assert_eq!(shadow.store.level("a"), SecurityLevel::Low);
    // block, a, b, condition
    assert_eq!(shadow.store.level("branch4"), SecurityLevel::High);
    assert_eq!(shadow.call_stack.len(), 1);
}

#[test]
fn test_prepare_resets_shadow() {
    let p = main_only(Stmt::block(vec![Stmt::new_object("o"), Stmt::ret(Expr::var("o"))]));
    let monitor = |label: SecurityLabel, mut shadow: ShadowConfiguration| {
        if let SecurityLabel::AllocateObject { location, .. } = label {
            shadow.heap.allocate(location);
        }
        shadow
    };
    let mut interp = Interpreter::with_monitor(p, monitor);
    interp.prepare(&RunConfig::default()).unwrap();
    interp.run().unwrap();
    assert_eq!(interp.shadow().heap.len(), 1);

    interp.prepare(&RunConfig::default()).unwrap();
    assert!(interp.shadow().heap.is_empty());
}

//! Heap tests: allocation, field access, deletion

use super::{eval, eval_result, main_only, program, run_logged};
use ecmasl::{Expr, Location, Operator, SecurityLabel, Stmt, Value};
use serde_json::json;

#[test]
fn test_unset_field_is_absent() {
    // main() { o := new(); v := o.f; return v }
    let p = program(json!({"funcs": [{
        "name": "main", "params": [],
        "body": {"type": "Block", "stmts": [
            {"type": "AssignNewObj", "lhs": "o"},
            {"type": "FieldLookup", "lhs": "v", "obj": {"type": "Var", "name": "o"},
             "field": {"type": "Val", "value": {"Primitive": "f"}}},
            {"type": "Return", "expr": {"type": "Var", "name": "v"}}
        ]}
    }]}));
    assert_eq!(eval(p), Some(Value::Absent));
}

#[test]
fn test_field_assign_lookup_delete() {
    let p = main_only(Stmt::block(vec![
        Stmt::new_object("o"),
        Stmt::field_assign(Expr::var("o"), Expr::str("k"), Expr::int(42)),
        Stmt::lookup("before", Expr::var("o"), Expr::str("k")),
        Stmt::assign("had", Expr::binary(Operator::InObj, Expr::var("o"), Expr::str("k"))),
        Stmt::field_delete(Expr::var("o"), Expr::str("k")),
        Stmt::lookup("after", Expr::var("o"), Expr::str("k")),
        Stmt::ret(Expr::nary(
            Operator::TupleExpr,
            vec![
                Expr::var("before"),
                Expr::var("had"),
                Expr::var("after"),
                Expr::binary(Operator::InObj, Expr::var("o"), Expr::str("k")),
            ],
        )),
    ]));
    assert_eq!(
        eval(p),
        Some(Value::Tuple(vec![
            Value::int(42),
            Value::bool(true),
            Value::Absent,
            Value::bool(false),
        ]))
    );
}

#[test]
fn test_obj_to_list_keeps_insertion_order() {
    let p = main_only(Stmt::block(vec![
        Stmt::new_object("o"),
        Stmt::field_assign(Expr::var("o"), Expr::str("z"), Expr::int(1)),
        Stmt::field_assign(Expr::var("o"), Expr::str("a"), Expr::int(2)),
        Stmt::field_assign(Expr::var("o"), Expr::str("z"), Expr::int(3)),
        Stmt::ret(Expr::unary(Operator::ObjToList, Expr::var("o"))),
    ]));
    assert_eq!(
        eval(p),
        Some(Value::List(vec![
            Value::Tuple(vec![Value::str("z"), Value::int(3)]),
            Value::Tuple(vec![Value::str("a"), Value::int(2)]),
        ]))
    );
}

#[test]
fn test_objects_are_shared_by_location() {
    let p = ecmasl::Program::new(vec![
        ecmasl::Function::new(
            "main",
            &[],
            Stmt::block(vec![
                Stmt::new_object("o"),
                Stmt::call("ignored", "fill", vec![Expr::var("o")]),
                Stmt::lookup("v", Expr::var("o"), Expr::str("filled")),
                Stmt::ret(Expr::var("v")),
            ]),
        ),
        ecmasl::Function::new(
            "fill",
            &["target"],
            Stmt::block(vec![
                Stmt::field_assign(Expr::var("target"), Expr::str("filled"), Expr::bool(true)),
                Stmt::ret(Expr::literal(Value::undefined())),
            ]),
        ),
    ])
    .unwrap();
    assert_eq!(eval(p), Some(Value::bool(true)));
}

#[test]
fn test_allocations_are_unique_and_increasing() {
    let p = main_only(Stmt::block(vec![
        Stmt::assign("i", Expr::int(0)),
        Stmt::while_loop(
            Expr::binary(Operator::Lt, Expr::var("i"), Expr::int(5)),
            Stmt::block(vec![
                Stmt::new_object("o"),
                Stmt::assign("i", Expr::binary(Operator::Plus, Expr::var("i"), Expr::int(1))),
            ]),
        ),
        Stmt::ret(Expr::var("o")),
    ]));
    let (result, labels) = run_logged(p);
    let locations: Vec<Location> = labels
        .iter()
        .filter_map(|l| match l {
            SecurityLabel::AllocateObject { location, .. } => Some(*location),
            _ => None,
        })
        .collect();
    assert_eq!(locations.len(), 5);
    assert!(locations.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(result.unwrap(), Some(Value::Location(locations[4])));
}

#[test]
fn test_lookup_on_non_object_is_type_error() {
    let p = main_only(Stmt::lookup("v", Expr::int(3), Expr::str("f")));
    assert_eq!(eval_result(p).unwrap_err().kind(), "TypeError");

    let p = main_only(Stmt::block(vec![
        Stmt::new_object("o"),
        Stmt::lookup("v", Expr::var("o"), Expr::int(1)),
    ]));
    assert_eq!(eval_result(p).unwrap_err().kind(), "TypeError");
}

#[test]
fn test_unknown_location() {
    let p = main_only(Stmt::lookup(
        "v",
        Expr::literal(Value::Location(Location::new(17))),
        Expr::str("f"),
    ));
    let fault = eval_result(p).unwrap_err();
    assert_eq!(fault.kind(), "UnknownLocation");
    assert!(fault.to_string().contains("$loc_17"));
}

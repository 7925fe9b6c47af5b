//! Basic tests: assignment, operators, return values

use super::{eval, eval_result, main_only, program};
use ecmasl::{Expr, Operator, Stmt, Value};
use serde_json::json;

fn val(v: serde_json::Value) -> serde_json::Value {
    json!({"type": "Val", "value": {"Primitive": v}})
}

fn var(name: &str) -> serde_json::Value {
    json!({"type": "Var", "name": name})
}

#[test]
fn test_assign_and_add() {
    // main() { x := 3; y := 4; z := x + y; return z }
    let p = program(json!({"funcs": [{
        "name": "main", "params": [],
        "body": {"type": "Block", "stmts": [
            {"type": "Assign", "lhs": "x", "expr": val(json!(3))},
            {"type": "Assign", "lhs": "y", "expr": val(json!(4))},
            {"type": "Assign", "lhs": "z",
             "expr": {"type": "BinOpt", "op": "Plus", "lhs": var("x"), "rhs": var("y")}},
            {"type": "Return", "expr": var("z")}
        ]}
    }]}));
    assert_eq!(eval(p), Some(Value::int(7)));
}

#[test]
fn test_reassignment_overwrites() {
    let p = main_only(Stmt::block(vec![
        Stmt::assign("x", Expr::int(1)),
        Stmt::assign("x", Expr::binary(Operator::Times, Expr::var("x"), Expr::int(10))),
        Stmt::ret(Expr::var("x")),
    ]));
    assert_eq!(eval(p), Some(Value::int(10)));
}

#[test]
fn test_standard_arithmetic() {
    let cases = [
        (Operator::Minus, 10, 4, Value::int(6)),
        (Operator::Div, 10, 4, Value::int(2)),
        (Operator::Times, -3, 4, Value::int(-12)),
    ];
    for (op, a, b, expected) in cases {
        let p = main_only(Stmt::ret(Expr::binary(op, Expr::int(a), Expr::int(b))));
        assert_eq!(eval(p), Some(expected), "{}", op);
    }

    let p = main_only(Stmt::ret(Expr::binary(
        Operator::Plus,
        Expr::literal(Value::float(1.5)),
        Expr::int(1),
    )));
    assert_eq!(eval(p), Some(Value::float(2.5)));
}

#[test]
fn test_list_and_tuple_operators() {
    let p = main_only(Stmt::block(vec![
        Stmt::assign(
            "l",
            Expr::nary(Operator::ListExpr, vec![Expr::int(1), Expr::int(2)]),
        ),
        Stmt::assign("l", Expr::binary(Operator::Ladd, Expr::var("l"), Expr::int(3))),
        Stmt::assign(
            "t",
            Expr::nary(
                Operator::TupleExpr,
                vec![Expr::unary(Operator::ListLen, Expr::var("l")), Expr::str("x")],
            ),
        ),
        Stmt::ret(Expr::nary(
            Operator::TupleExpr,
            vec![
                Expr::unary(Operator::Head, Expr::var("l")),
                Expr::binary(Operator::Lnth, Expr::var("l"), Expr::int(2)),
                Expr::unary(Operator::First, Expr::var("t")),
                Expr::binary(Operator::InList, Expr::var("l"), Expr::int(2)),
            ],
        )),
    ]));
    assert_eq!(
        eval(p),
        Some(Value::Tuple(vec![
            Value::int(1),
            Value::int(3),
            Value::int(3),
            Value::bool(true),
        ]))
    );
}

#[test]
fn test_typeof_yields_symbol() {
    let p = main_only(Stmt::ret(Expr::unary(Operator::Typeof, Expr::str("s"))));
    assert_eq!(eval(p), Some(Value::symbol("string")));
}

#[test]
fn test_falling_off_the_end_has_no_value() {
    let p = main_only(Stmt::block(vec![Stmt::assign("x", Expr::int(1)), Stmt::Skip]));
    assert_eq!(eval(p), None);
}

#[test]
fn test_entry_point_and_arguments_from_config() {
    let p = program(json!({"funcs": [{
        "name": "square", "params": ["n"],
        "body": {"type": "Return",
                 "expr": {"type": "BinOpt", "op": "Times", "lhs": var("n"), "rhs": var("n")}}
    }]}));
    let run = ecmasl::RunConfig::from_json(r#"{"entry": "square", "args": [{"Primitive": 9}]}"#)
        .unwrap();
    assert_eq!(super::eval_with(p, &run).unwrap(), Some(Value::int(81)));
}

#[test]
fn test_run_program_convenience() {
    let p = main_only(Stmt::ret(Expr::str("done")));
    assert_eq!(
        ecmasl::run_program(p, &ecmasl::RunConfig::default()).unwrap(),
        Some(Value::str("done"))
    );

    let missing = ecmasl::run_program(main_only(Stmt::Skip), &ecmasl::RunConfig::new("start"));
    assert_eq!(missing.unwrap_err().kind(), "UnknownFunction");
    assert!(eval_result(main_only(Stmt::Skip)).is_ok());
}

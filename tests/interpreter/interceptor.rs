//! Interceptor tests: calls to functions the program does not define

use super::{init_tracing, main_only, run_to_completion};
use ecmasl::{
    Expr, Function, Interception, InterceptorChain, Interpreter, Operator, Program, RunConfig,
    Stmt, Value,
};
use std::cell::RefCell;
use std::rc::Rc;

fn calls_native(name: &str, args: Vec<Expr>) -> Program {
    main_only(Stmt::block(vec![
        Stmt::call("r", name, args),
        Stmt::ret(Expr::var("r")),
    ]))
}

#[test]
fn test_interceptor_supplies_value() {
    init_tracing();
    let mut interp = Interpreter::new(calls_native("max", vec![Expr::int(3), Expr::int(9)]))
        .with_interceptor(|name: &str, args: &[Value]| match name {
            "max" => Interception::Handled(
                args.iter()
                    .filter_map(Value::as_int)
                    .max()
                    .map(Value::int)
                    .unwrap_or_default(),
            ),
            _ => Interception::Declined,
        });
    interp.prepare(&RunConfig::default()).unwrap();
    assert_eq!(run_to_completion(&mut interp).unwrap(), Some(Value::int(9)));
    // the call never pushed a frame
    assert_eq!(interp.call_depth(), 1);
}

#[test]
fn test_declined_call_is_unknown_function() {
    let mut interp = Interpreter::new(calls_native("missing", vec![]))
        .with_interceptor(|_: &str, _: &[Value]| Interception::Declined);
    interp.prepare(&RunConfig::default()).unwrap();
    let fault = interp.run().unwrap_err();
    assert_eq!(fault.kind(), "UnknownFunction");
}

#[test]
fn test_program_functions_shadow_interceptor() {
    let hits = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&hits);
    let p = Program::new(vec![
        Function::new(
            "main",
            &[],
            Stmt::block(vec![
                Stmt::call("a", "double", vec![Expr::int(4)]),
                Stmt::call("b", "native", vec![Expr::var("a")]),
                Stmt::ret(Expr::binary(Operator::Plus, Expr::var("a"), Expr::var("b"))),
            ]),
        ),
        Function::new(
            "double",
            &["n"],
            Stmt::ret(Expr::binary(Operator::Times, Expr::var("n"), Expr::int(2))),
        ),
    ])
    .unwrap();

    let mut interp = Interpreter::new(p).with_interceptor(move |name: &str, args: &[Value]| {
        seen.borrow_mut().push(name.to_string());
        Interception::Handled(args.first().cloned().unwrap_or_default())
    });
    interp.prepare(&RunConfig::default()).unwrap();
    assert_eq!(interp.run().unwrap(), Some(Value::int(16)));
    assert_eq!(*hits.borrow(), vec!["native".to_string()]);
}

#[test]
fn test_chain_of_interceptors() {
    let chain = InterceptorChain::new()
        .with(|name: &str, _: &[Value]| {
            if name == "pi" {
                Interception::Handled(Value::float(3.25))
            } else {
                Interception::Declined
            }
        })
        .with(|name: &str, args: &[Value]| {
            if name == "count" {
                Interception::Handled(Value::int(args.len() as i64))
            } else {
                Interception::Declined
            }
        });

    let p = main_only(Stmt::block(vec![
        Stmt::call("a", "pi", vec![]),
        Stmt::call("b", "count", vec![Expr::int(0), Expr::int(0)]),
        Stmt::ret(Expr::nary(Operator::ListExpr, vec![Expr::var("a"), Expr::var("b")])),
    ]));
    let mut interp = Interpreter::new(p).with_interceptor(chain);
    interp.prepare(&RunConfig::default()).unwrap();
    assert_eq!(
        interp.run().unwrap(),
        Some(Value::List(vec![Value::float(3.25), Value::int(2)]))
    );
}

//! Reference interpreter for ECMA-SL
//!
//! ECMA-SL is a small imperative language used as the target of a
//! JavaScript-to-ECMA-SL compiler. Programs are tables of functions whose
//! bodies are statement trees over a value model of primitives, lists,
//! tuples, symbols and heap locations.
//!
//! The interpreter runs over an explicit configuration (store, heap, call
//! stack and continuation) one statement at a time. Every step emits a
//! [`SecurityLabel`] that a [`Monitor`] consumes in lock-step, advancing its
//! own [`ShadowConfiguration`].
//!
//! # Example
//!
//! ```
//! use ecmasl::{Program, RunConfig, Value, run_program};
//!
//! let program = Program::from_json(r#"{"funcs": [{
//!     "name": "main", "params": [],
//!     "body": {"type": "Return", "expr": {"type": "BinOpt", "op": "Times",
//!         "lhs": {"type": "Val", "value": {"Primitive": 6}},
//!         "rhs": {"type": "Val", "value": {"Primitive": 7}}}}
//! }]}"#).unwrap();
//!
//! let result = run_program(program, &RunConfig::default()).unwrap();
//! assert_eq!(result, Some(Value::int(42)));
//! ```

pub mod ast;
pub mod codegen;
pub mod config;
pub mod error;
pub mod heap;
pub mod ingest;
pub mod interpreter;
pub mod label;
pub mod monitor;
pub mod operator;
pub mod prelude;
pub mod store;
pub mod value;

pub use ast::{Expr, Function, Program, Stmt};
pub use config::RunConfig;
pub use error::EslError;
pub use heap::{Heap, Object};
pub use interpreter::{
    CallStack, CallStackFrame, Configuration, Continuation, Fault, Interception, Interceptor,
    InterceptorChain, Interpreter, Status, StepResult,
};
pub use label::SecurityLabel;
pub use monitor::{
    LabelLog, Monitor, NullMonitor, SecurityLevel, ShadowConfiguration, ShadowFrame, ShadowHeap,
    ShadowStore,
};
pub use operator::{Arity, Operator};
pub use store::Store;
pub use value::{Location, Primitive, Value};

/// Run a program to completion with no monitor and no interceptor
pub fn run_program(program: Program, run: &RunConfig) -> Result<Option<Value>, Fault> {
    let mut interp = Interpreter::new(program);
    interp.prepare(run).map_err(|error| Fault {
        error,
        statement: None,
        configuration: Box::default(),
    })?;
    interp.run()
}

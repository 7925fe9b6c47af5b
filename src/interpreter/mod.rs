//! The ECMA-SL interpreter
//!
//! Execution is a loop over an explicit [`Configuration`]: each call to
//! [`Interpreter::step`] pops the head of the continuation, executes it,
//! and hands the resulting [`SecurityLabel`] to the [`Monitor`] before the
//! next step may begin. Nothing recurses on the Rust stack, so deeply
//! recursive ECMA-SL programs only grow the heap-allocated call stack.
//!
//! ```
//! use ecmasl::{Expr, Function, Interpreter, Operator, Program, RunConfig, Stmt, Value};
//!
//! let program = Program::new(vec![Function::new(
//!     "main",
//!     &[],
//!     Stmt::ret(Expr::binary(Operator::Plus, Expr::int(1), Expr::int(2))),
//! )])
//! .unwrap();
//!
//! let mut interp = Interpreter::new(program);
//! interp.prepare(&RunConfig::default()).unwrap();
//! assert_eq!(interp.run().unwrap(), Some(Value::int(3)));
//! ```

mod exec;
pub mod interceptor;
pub mod stack;

use thiserror::Error;

use crate::ast::{Expr, Program, Stmt};
use crate::config::RunConfig;
use crate::error::EslError;
use crate::heap::Heap;
use crate::label::SecurityLabel;
use crate::monitor::{Monitor, NullMonitor, ShadowConfiguration};
use crate::prelude::Rc;
use crate::store::Store;
use crate::value::Value;

pub use interceptor::{Interception, Interceptor, InterceptorChain};
pub use stack::{CallStack, CallStackFrame, Continuation};

/// Complete interpreter state between two steps
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Configuration {
    /// Variables of the active frame
    pub store: Store,
    pub heap: Heap,
    /// Saved caller frames, sentinel at the bottom
    pub call_stack: CallStack,
    /// Statements still to run in the active frame
    pub continuation: Continuation,
    /// Value of the outermost `return`, once it has run
    pub final_return: Option<Value>,
}

/// Lifecycle of an [`Interpreter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Nothing prepared yet
    Ready,
    Running,
    /// The outermost continuation ran empty
    Halted,
    /// A statement failed; terminal
    Faulted,
}

/// Result of executing one step
#[derive(Debug, Clone, PartialEq)]
pub enum StepResult {
    /// More statements are pending
    Continue,
    /// Execution complete with the value of the outermost `return`, if any
    Complete(Option<Value>),
}

/// A run aborted by a failing statement
#[derive(Debug, Clone, Error)]
#[error("{error}")]
pub struct Fault {
    pub error: EslError,
    /// The statement that failed, `None` if the run never started
    pub statement: Option<Rc<Stmt>>,
    /// State at the point of failure, with the failing statement at the head
    pub configuration: Box<Configuration>,
}

impl Fault {
    pub fn kind(&self) -> &'static str {
        self.error.kind()
    }
}

/// Step-driven interpreter, generic over the monitor it feeds
pub struct Interpreter<M: Monitor = NullMonitor> {
    program: Rc<Program>,
    config: Configuration,
    shadow: ShadowConfiguration,
    monitor: M,
    interceptor: Option<Box<dyn Interceptor>>,
    status: Status,
    fault: Option<Fault>,
    steps: u64,
    trace_steps: bool,
}

impl Interpreter<NullMonitor> {
    pub fn new(program: impl Into<Rc<Program>>) -> Self {
        Self::with_monitor(program, NullMonitor)
    }
}

impl<M: Monitor> Interpreter<M> {
    pub fn with_monitor(program: impl Into<Rc<Program>>, monitor: M) -> Self {
        Self {
            program: program.into(),
            config: Configuration::default(),
            shadow: ShadowConfiguration::new(),
            monitor,
            interceptor: None,
            status: Status::Ready,
            fault: None,
            steps: 0,
            trace_steps: false,
        }
    }

    /// Install the handler for calls to functions the program does not define
    pub fn with_interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.set_interceptor(interceptor);
        self
    }

    pub fn set_interceptor(&mut self, interceptor: impl Interceptor + 'static) {
        self.interceptor = Some(Box::new(interceptor));
    }

    /// Seed a fresh configuration that calls the entry function
    ///
    /// Any previous run state is discarded, including the shadow configuration.
    pub fn prepare(&mut self, run: &RunConfig) -> Result<(), EslError> {
        let function = self
            .program
            .function(&run.entry)
            .ok_or_else(|| EslError::unknown_function(run.entry.as_str()))?;
        let store = Store::bind(&function.params, run.args.clone())?;

        tracing::debug!(
            entry = %run.entry,
            arity = function.params.len(),
            functions = self.program.len(),
            "prepared run"
        );

        self.config = Configuration {
            store,
            continuation: Continuation::single(Rc::clone(&function.body)),
            ..Configuration::default()
        };
        self.shadow = ShadowConfiguration::new();
        self.status = Status::Running;
        self.fault = None;
        self.steps = 0;
        self.trace_steps = run.trace_steps;
        Ok(())
    }

    /// Execute exactly one statement and feed its label to the monitor
    ///
    /// Stepping an interpreter that was never prepared completes with no value.
    pub fn step(&mut self) -> Result<StepResult, Fault> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }
        if self.status != Status::Running {
            return Ok(StepResult::Complete(self.config.final_return.clone()));
        }

        let stmt = match self.config.continuation.pop_front() {
            Some(stmt) => stmt,
            // a callee that runs off its end returns undefined to its caller
            None if !self.config.call_stack.is_outermost() => {
                Rc::new(Stmt::ret(Expr::literal(Value::undefined())))
            }
            None => {
                self.status = Status::Halted;
                return Ok(StepResult::Complete(self.config.final_return.clone()));
            }
        };

        let label = match exec::execute(&self.program, &mut self.interceptor, &stmt, &mut self.config) {
            Ok(label) => label,
            Err(error) => return Err(self.fault(error, stmt)),
        };
        self.steps += 1;

        if self.trace_steps {
            tracing::trace!(
                step = self.steps,
                stmt = stmt.kind(),
                depth = self.config.call_stack.depth(),
                label = %label,
                "step"
            );
        }

        let shadow = std::mem::take(&mut self.shadow);
        self.shadow = self.monitor.interpret(label, shadow);

        if self.config.continuation.is_empty() && self.config.call_stack.is_outermost() {
            self.status = Status::Halted;
            return Ok(StepResult::Complete(self.config.final_return.clone()));
        }
        Ok(StepResult::Continue)
    }

    /// Step until the program halts or faults
    pub fn run(&mut self) -> Result<Option<Value>, Fault> {
        loop {
            match self.step()? {
                StepResult::Continue => {}
                StepResult::Complete(value) => return Ok(value),
            }
        }
    }

    fn fault(&mut self, error: EslError, stmt: Rc<Stmt>) -> Fault {
        tracing::debug!(
            step = self.steps + 1,
            stmt = stmt.kind(),
            depth = self.config.call_stack.depth(),
            error = %error,
            "statement failed"
        );
        self.config.continuation.push_front(Rc::clone(&stmt));
        let fault = Fault {
            error,
            statement: Some(stmt),
            configuration: Box::new(self.config.clone()),
        };
        self.status = Status::Faulted;
        self.fault = Some(fault.clone());
        fault
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Number of statements executed since the last `prepare`
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn shadow(&self) -> &ShadowConfiguration {
        &self.shadow
    }

    pub fn monitor(&self) -> &M {
        &self.monitor
    }

    pub fn monitor_mut(&mut self) -> &mut M {
        &mut self.monitor
    }

    pub fn into_monitor(self) -> M {
        self.monitor
    }

    /// Frames on the call stack, sentinel included
    pub fn call_depth(&self) -> usize {
        self.config.call_stack.depth()
    }

    /// The last fault, if the run failed
    pub fn last_fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }
}

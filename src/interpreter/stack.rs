//! Explicit control state: the continuation and the call stack
//!
//! Neither intra-function control flow nor calls use the Rust call stack.
//! Blocks and branches are spliced onto the front of the [`Continuation`];
//! calls save the caller's state in a [`CallStackFrame`] and `return` restores
//! it.

use std::fmt;

use crate::ast::Stmt;
use crate::prelude::{Rc, VecDeque};
use crate::store::Store;

// ═══════════════════════════════════════════════════════════════════════════════
// Continuation
// ═══════════════════════════════════════════════════════════════════════════════

/// Pending statements, head first
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Continuation {
    stmts: VecDeque<Rc<Stmt>>,
}

impl Continuation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(stmt: Rc<Stmt>) -> Self {
        let mut stmts = VecDeque::with_capacity(1);
        stmts.push_back(stmt);
        Self { stmts }
    }

    pub fn pop_front(&mut self) -> Option<Rc<Stmt>> {
        self.stmts.pop_front()
    }

    pub fn push_front(&mut self, stmt: Rc<Stmt>) {
        self.stmts.push_front(stmt);
    }

    /// Splice statements onto the front, keeping their order
    pub fn prepend<I>(&mut self, stmts: I)
    where
        I: IntoIterator<Item = Rc<Stmt>>,
        I::IntoIter: DoubleEndedIterator,
    {
        for stmt in stmts.into_iter().rev() {
            self.stmts.push_front(stmt);
        }
    }

    pub fn head(&self) -> Option<&Rc<Stmt>> {
        self.stmts.front()
    }

    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }

    pub fn clear(&mut self) {
        self.stmts.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<Stmt>> {
        self.stmts.iter()
    }
}

impl fmt::Display for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, stmt) in self.stmts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", stmt.kind())?;
        }
        write!(f, "]")
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Call Stack
// ═══════════════════════════════════════════════════════════════════════════════

/// Caller state saved at a call site
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CallStackFrame {
    /// Caller variable receiving the return value; `None` only for the sentinel
    pub destination: Option<String>,
    /// Caller statements remaining after the call
    pub continuation: Continuation,
    /// Caller store
    pub store: Store,
}

impl CallStackFrame {
    /// The outermost frame; a `return` that reaches it ends the program
    pub fn sentinel() -> Self {
        Self::default()
    }

    pub fn new(destination: impl Into<String>, continuation: Continuation, store: Store) -> Self {
        Self {
            destination: Some(destination.into()),
            continuation,
            store,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.destination.is_none()
    }
}

/// LIFO of saved frames; always holds the sentinel at the bottom
#[derive(Debug, Clone, PartialEq)]
pub struct CallStack {
    frames: Vec<CallStackFrame>,
}

impl CallStack {
    pub fn new() -> Self {
        Self {
            frames: vec![CallStackFrame::sentinel()],
        }
    }

    pub fn push(&mut self, frame: CallStackFrame) {
        self.frames.push(frame);
    }

    /// Pop the innermost caller frame; the sentinel is never popped
    pub fn pop(&mut self) -> Option<CallStackFrame> {
        if self.is_outermost() {
            return None;
        }
        self.frames.pop()
    }

    /// Whether only the sentinel remains
    pub fn is_outermost(&self) -> bool {
        self.frames.len() <= 1
    }

    /// Number of frames including the sentinel
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn top(&self) -> Option<&CallStackFrame> {
        self.frames.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CallStackFrame> {
        self.frames.iter()
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new()
    }
}

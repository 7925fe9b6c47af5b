//! Security labels
//!
//! Every execution step emits exactly one label describing its observable
//! effect. Labels own copies of the expressions they mention, so the monitor
//! never sees into the main configuration.

use std::fmt;

use crate::ast::Expr;
use crate::value::Location;

#[derive(Debug, Clone, PartialEq)]
pub enum SecurityLabel {
    /// The step had no effect the monitor needs to see
    Empty,
    /// A branch was taken on this guard
    Branch(Expr),
    /// A callee returned this expression to its caller
    Return(Expr),
    /// A fresh object was allocated and bound to `variable`
    AllocateObject { variable: String, location: Location },
}

impl SecurityLabel {
    pub fn kind(&self) -> &'static str {
        match self {
            SecurityLabel::Empty => "Empty",
            SecurityLabel::Branch(_) => "Branch",
            SecurityLabel::Return(_) => "Return",
            SecurityLabel::AllocateObject { .. } => "AllocateObject",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SecurityLabel::Empty)
    }
}

impl fmt::Display for SecurityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityLabel::Empty => write!(f, "EmptyLab"),
            SecurityLabel::Branch(guard) => write!(f, "BranchLab({})", guard),
            SecurityLabel::Return(value) => write!(f, "ReturnLab({})", value),
            SecurityLabel::AllocateObject { variable, location } => {
                write!(f, "AssignNewObjLab({}, {})", variable, location)
            }
        }
    }
}

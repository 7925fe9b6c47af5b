//! Program ingestion from the JSON exchange format
//!
//! A program document looks like
//!
//! ```json
//! {"funcs": [{"name": "main", "params": [], "body": {"type": "Skip"}}]}
//! ```
//!
//! with statement and expression nodes discriminated by their `type` field
//! (the shapes are given by the serde attributes on [`Stmt`](crate::Stmt) and
//! [`Expr`](crate::Expr)). Anything that fails to parse, including an unknown
//! operator tag or a duplicated function or parameter name, is reported as
//! [`EslError::Ingest`].

use serde::{Deserialize, Serialize};

use crate::ast::{Function, Program};
use crate::error::EslError;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ProgramDocument {
    funcs: Vec<Function>,
}

#[derive(Serialize)]
struct ProgramDocumentRef<'a> {
    funcs: Vec<&'a Function>,
}

/// Parse a program document
pub fn program_from_json(json: &str) -> Result<Program, EslError> {
    let document: ProgramDocument = serde_json::from_str(json)?;
    Program::new(document.funcs)
}

/// Convert an already-parsed JSON document
pub fn program_from_value(value: serde_json::Value) -> Result<Program, EslError> {
    let document: ProgramDocument = serde_json::from_value(value)?;
    Program::new(document.funcs)
}

/// Serialize a program back into the exchange format
pub fn program_to_json(program: &Program) -> Result<String, EslError> {
    let document = ProgramDocumentRef {
        funcs: program.functions().collect(),
    };
    Ok(serde_json::to_string(&document)?)
}

impl Program {
    pub fn from_json(json: &str) -> Result<Program, EslError> {
        program_from_json(json)
    }

    pub fn to_json(&self) -> Result<String, EslError> {
        program_to_json(self)
    }
}

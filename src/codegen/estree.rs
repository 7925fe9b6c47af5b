//! ESTree rendering of host trees
//!
//! The output is plain `serde_json::Value` in ESTree shape, ready for an
//! external printer such as astring or escodegen.

use serde_json::{Value as Json, json};

use super::tree::{HostConst, HostExpr, HostForm, HostFunction, HostProgram, HostStmt};
use crate::value::{Primitive, Value};

fn identifier(name: &str) -> Json {
    json!({"type": "Identifier", "name": name})
}

fn literal(value: Json) -> Json {
    let raw = value.to_string();
    json!({"type": "Literal", "value": value, "raw": raw})
}

fn member(object: Json, property: Json, computed: bool) -> Json {
    json!({"type": "MemberExpression", "computed": computed, "object": object, "property": property})
}

fn call(callee: Json, arguments: Vec<Json>) -> Json {
    json!({"type": "CallExpression", "callee": callee, "arguments": arguments})
}

fn assign(left: Json, right: Json) -> Json {
    json!({
        "type": "ExpressionStatement",
        "expression": {"type": "AssignmentExpression", "operator": "=", "left": left, "right": right}
    })
}

/// `a.b.c` as nested member expressions
fn dotted(path: &str) -> Json {
    let mut parts = path.split('.');
    let mut expr = identifier(parts.next().unwrap_or_default());
    for part in parts {
        expr = member(expr, identifier(part), false);
    }
    expr
}

fn host_const(c: HostConst) -> Json {
    match c {
        HostConst::Int(n) => literal(json!(n)),
        HostConst::Str(s) => literal(json!(s)),
    }
}

fn value_to_estree(value: &Value) -> Json {
    match value {
        Value::Primitive(p) => match p {
            Primitive::Undefined => identifier("undefined"),
            Primitive::Int(n) => literal(json!(n)),
            Primitive::Float(n) => literal(json!(n)),
            Primitive::Bool(b) => literal(json!(b)),
            Primitive::Str(s) => literal(json!(s)),
        },
        Value::List(items) | Value::Tuple(items) => json!({
            "type": "ArrayExpression",
            "elements": items.iter().map(value_to_estree).collect::<Vec<_>>(),
        }),
        Value::Symbol(s) => literal(json!(s)),
        Value::Location(loc) => identifier(&loc.to_string()),
        Value::Absent => identifier("undefined"),
    }
}

impl HostExpr {
    pub fn to_estree(&self) -> Json {
        match self {
            HostExpr::Literal(value) => value_to_estree(value),
            HostExpr::Identifier(name) | HostExpr::FunctionName(name) => identifier(name),
            HostExpr::Operation { form, operands, .. } => {
                let mut args = operands.iter().map(HostExpr::to_estree);
                let first = args.next().unwrap_or(Json::Null);
                match *form {
                    HostForm::Infix(op) => json!({
                        "type": "BinaryExpression", "operator": op,
                        "left": first, "right": args.next().unwrap_or(Json::Null),
                    }),
                    HostForm::Logical(op) => json!({
                        "type": "LogicalExpression", "operator": op,
                        "left": first, "right": args.next().unwrap_or(Json::Null),
                    }),
                    HostForm::Prefix(op) => json!({
                        "type": "UnaryExpression", "operator": op,
                        "argument": first, "prefix": true,
                    }),
                    HostForm::Method(name, extra) => {
                        let mut arguments: Vec<Json> = args.collect();
                        arguments.extend(extra.map(host_const));
                        call(member(first, identifier(name), false), arguments)
                    }
                    HostForm::Index => member(first, args.next().unwrap_or(Json::Null), true),
                    HostForm::IndexConst(k) => member(first, literal(json!(k)), true),
                    HostForm::Property(name) => member(first, identifier(name), false),
                    HostForm::Call(path) => {
                        let mut arguments = vec![first];
                        arguments.extend(args);
                        call(dotted(path), arguments)
                    }
                    HostForm::Array => {
                        let elements: Vec<Json> = operands.iter().map(HostExpr::to_estree).collect();
                        json!({"type": "ArrayExpression", "elements": elements})
                    }
                    HostForm::Append => json!({
                        "type": "ArrayExpression",
                        "elements": [
                            {"type": "SpreadElement", "argument": first},
                            args.next().unwrap_or(Json::Null),
                        ],
                    }),
                    HostForm::Fold { op, identity } => {
                        let mut folded = operands.iter().map(HostExpr::to_estree);
                        match folded.next() {
                            None => literal(json!(identity)),
                            Some(head) => folded.fold(head, |left, right| {
                                json!({"type": "LogicalExpression", "operator": op, "left": left, "right": right})
                            }),
                        }
                    }
                }
            }
        }
    }
}

impl HostStmt {
    pub fn to_estree(&self) -> Json {
        match self {
            HostStmt::Skip => json!({"type": "EmptyStatement"}),
            HostStmt::Assign { target, value } => assign(identifier(target), value.to_estree()),
            HostStmt::Call {
                target,
                callee,
                args,
            } => {
                let arguments = args.iter().map(HostExpr::to_estree).collect();
                assign(identifier(target), call(callee.to_estree(), arguments))
            }
            HostStmt::NewObject { target } => assign(
                identifier(target),
                json!({"type": "ObjectExpression", "properties": []}),
            ),
            HostStmt::FieldLookup {
                target,
                object,
                field,
            } => assign(
                identifier(target),
                member(object.to_estree(), field.to_estree(), true),
            ),
            HostStmt::FieldAssign {
                object,
                field,
                value,
            } => assign(
                member(object.to_estree(), field.to_estree(), true),
                value.to_estree(),
            ),
            HostStmt::FieldDelete { object, field } => json!({
                "type": "ExpressionStatement",
                "expression": {
                    "type": "UnaryExpression", "operator": "delete", "prefix": true,
                    "argument": member(object.to_estree(), field.to_estree(), true),
                }
            }),
            HostStmt::If {
                guard,
                then,
                otherwise,
            } => json!({
                "type": "IfStatement",
                "test": guard.to_estree(),
                "consequent": then.to_estree(),
                "alternate": otherwise.as_ref().map(|s| s.to_estree()),
            }),
            HostStmt::While { guard, body } => json!({
                "type": "WhileStatement",
                "test": guard.to_estree(),
                "body": body.to_estree(),
            }),
            HostStmt::Return(value) => json!({"type": "ReturnStatement", "argument": value.to_estree()}),
            HostStmt::Block(stmts) => json!({
                "type": "BlockStatement",
                "body": stmts.iter().map(HostStmt::to_estree).collect::<Vec<_>>(),
            }),
        }
    }
}

impl HostFunction {
    pub fn to_estree(&self) -> Json {
        let body = match &self.body {
            block @ HostStmt::Block(_) => block.to_estree(),
            other => json!({"type": "BlockStatement", "body": [other.to_estree()]}),
        };
        json!({
            "type": "FunctionDeclaration",
            "id": identifier(&self.name),
            "params": self.params.iter().map(|p| identifier(p)).collect::<Vec<_>>(),
            "body": body,
        })
    }
}

impl HostProgram {
    pub fn to_estree(&self) -> Json {
        json!({
            "type": "Program",
            "sourceType": "script",
            "body": self.functions.iter().map(HostFunction::to_estree).collect::<Vec<_>>(),
        })
    }
}

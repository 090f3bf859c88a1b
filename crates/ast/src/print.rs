use crate::{NodeId, NodeKind, Tree};
use std::fmt::Write;

/// Renders the subtree rooted at `node` as compact source text, one statement
/// per line at the top level. Tests compare trees through this; it is also
/// handy in debugging output.
pub fn print(tree: &Tree, node: NodeId) -> String {
    let mut out = String::new();
    emit(tree, node, &mut out);
    out
}

fn emit(tree: &Tree, node: NodeId, out: &mut String) {
    let children = tree.children(node);
    match tree.kind(node) {
        NodeKind::Script => {
            for (i, &stmt) in children.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                emit(tree, stmt, out);
            }
        }
        NodeKind::ExprStmt => {
            if let Some(&expr) = children.first() {
                emit(tree, expr, out);
            }
            out.push(';');
        }
        NodeKind::Return => {
            out.push_str("return");
            if let Some(&expr) = children.first() {
                out.push(' ');
                emit(tree, expr, out);
            }
            out.push(';');
        }
        NodeKind::Assign => {
            emit(tree, children[0], out);
            out.push('=');
            emit(tree, children[1], out);
        }
        NodeKind::Call => {
            emit(tree, children[0], out);
            out.push('(');
            for (i, &arg) in children[1..].iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                emit(tree, arg, out);
            }
            out.push(')');
        }
        NodeKind::GetProp { prop } => {
            emit(tree, children[0], out);
            out.push('.');
            out.push_str(prop);
        }
        NodeKind::Name { sym } => out.push_str(sym),
        NodeKind::This => out.push_str("this"),
        NodeKind::Number { value } => {
            let _ = write!(out, "{}", value);
        }
        NodeKind::Function => {
            out.push_str("function");
            emit(tree, children[0], out);
            emit(tree, children[1], out);
        }
        NodeKind::ParamList => {
            out.push('(');
            for (i, &param) in children.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                emit(tree, param, out);
            }
            out.push(')');
        }
        NodeKind::Block => {
            out.push('{');
            for &stmt in children {
                emit(tree, stmt, out);
            }
            out.push('}');
        }
    }
}

use crate::Compiler;
use ast::{NodeId, QualifiedName, Tree};

/// Derives the qualified name a function declaration is assigned to. Only
/// `<name> = function` declarations have one; anything else yields `None`.
pub fn get_name(tree: &Tree, func: NodeId) -> Option<QualifiedName> {
    let assign = tree.parent(func)?;
    if !tree.kind(assign).is_assign() {
        return None;
    }
    let target = *tree.children(assign).first()?;
    QualifiedName::of(tree, target)
}

/// Reports every function literal inside `subtree` (inclusive) as deleted, so
/// that pass-external bookkeeping of function identities stays consistent.
pub fn mark_functions_deleted(tree: &Tree, subtree: NodeId, compiler: &mut Compiler) {
    if tree.kind(subtree).is_function() {
        compiler.mark_function_deleted(subtree);
    }
    for &child in tree.children(subtree) {
        mark_functions_deleted(tree, child, compiler);
    }
}

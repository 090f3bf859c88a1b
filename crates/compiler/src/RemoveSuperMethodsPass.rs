use ast::{
    traverse_post_order, Annotations, NodeId, NodeKind, PathSegment, PostOrderCallback,
    QualifiedName, SegmentKind, Tree,
};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::typing::TypeRegistry;
use crate::utils;
use crate::Compiler;

/// Deletes methods that only make a super call with no change in arguments.
/// This pass is useful for cleaning up methods that may become super-only
/// calls after other optimizations have run, such as removal of casts or
/// assertions. It must run after those optimizations, after the
/// closure-primitives and super desugarings, and after type checking.
pub struct RemoveSuperMethodsPass;

impl RemoveSuperMethodsPass {
    pub fn process(
        tree: &mut Tree,
        root: NodeId,
        registry: &TypeRegistry,
        compiler: &mut Compiler,
    ) {
        let mut remove_candidates = FxHashMap::default();
        traverse_post_order(
            tree,
            root,
            &mut CollectSuperMethods {
                registry,
                remove_candidates: &mut remove_candidates,
            },
        );
        traverse_post_order(
            tree,
            root,
            &mut FilterDuplicateMethods {
                remove_candidates: &mut remove_candidates,
            },
        );
        for (method_name, func) in remove_candidates {
            // The removal target is the whole `name = function(...){...};`
            // statement, so no dangling assignment target remains.
            let removal_target = tree.grandparent(func).unwrap();
            debug_assert!(tree.kind(removal_target).is_expr_stmt());
            let removal_parent = tree.parent(removal_target).unwrap();
            tree.detach(removal_target);
            utils::mark_functions_deleted(tree, removal_target, compiler);
            compiler.report_change_to_enclosing_scope(removal_parent);
            debug!(method = %method_name, "removed trivial super forward");
        }
    }
}

/// First traversal: records every `name = function` declaration whose body
/// trivially forwards to the same-named superclass method.
struct CollectSuperMethods<'a> {
    registry: &'a TypeRegistry,
    remove_candidates: &'a mut FxHashMap<QualifiedName, NodeId>,
}

impl PostOrderCallback for CollectSuperMethods<'_> {
    fn visit(&mut self, tree: &Tree, n: NodeId, parent: Option<NodeId>) {
        // Must be a function assignment where the function body has only one
        // statement.
        let parent = match parent {
            Some(parent) => parent,
            None => return,
        };
        if !tree.kind(n).is_function()
            || !tree.kind(parent).is_assign()
            || !tree
                .grandparent(n)
                .map_or(false, |gp| tree.kind(gp).is_expr_stmt())
        {
            return;
        }
        // Some declarations are intentionally kept as override points, so
        // bail out on the marker.
        if tree.annotations(parent).contains(Annotations::NO_REMOVE) {
            return;
        }
        let block = match tree.children(n).last() {
            Some(&block) => block,
            None => return,
        };
        let stmts = tree.children(block);
        if stmts.len() != 1 {
            return;
        }
        let statement = stmts[0];
        if !tree.kind(statement).is_expr_stmt() && !tree.kind(statement).is_return() {
            return;
        }
        if tree.children(statement).len() != 1 {
            return;
        }
        let call = tree.children(statement)[0];
        if !tree.kind(call).is_call() {
            return;
        }
        let method_name = match utils::get_name(tree, n) {
            Some(name) => name,
            None => return,
        };
        if self.arguments_match(tree, n, call)
            && self.return_matches(tree, call)
            && self.function_name_matches(&method_name, tree, call)
        {
            self.remove_candidates.insert(method_name, n);
        }
    }
}

impl CollectSuperMethods<'_> {
    /// Returns true if the arguments of the call are exactly the parameters
    /// of the enclosing method, in order, forwarded to an explicit `this`
    /// receiver.
    fn arguments_match(&self, tree: &Tree, func: NodeId, call: NodeId) -> bool {
        let param_list = match tree.children(func).first() {
            Some(&param_list) => param_list,
            None => return false,
        };
        let params = tree.children(param_list);
        let call_children = tree.children(call);

        // The call has two more children than the param list: the function
        // being called and the `this` argument.
        const NUM_EXTRA_CALL_CHILDREN: usize = 2;
        if params.len() + NUM_EXTRA_CALL_CHILDREN != call_children.len() {
            return false;
        }

        if !tree.kind(call_children[1]).is_this() {
            return false;
        }

        let args = &call_children[NUM_EXTRA_CALL_CHILDREN..];
        for (&param, &arg) in params.iter().zip(args.iter()) {
            match (tree.kind(param), tree.kind(arg)) {
                (NodeKind::Name { sym: param }, NodeKind::Name { sym: arg }) if param == arg => {}
                _ => return false,
            }
        }
        true
    }

    /// Returns true unless the called function's declared return type says
    /// the result matters and the call discards it.
    fn return_matches(&self, tree: &Tree, call: NodeId) -> bool {
        // No match if the function being called does not have a function
        // type.
        let callee = match tree.children(call).first() {
            Some(&callee) => callee,
            None => return false,
        };
        let callee_ty = match self.registry.get_type(callee) {
            Some(ty) => ty,
            None => return false,
        };
        let func_ty = match self.registry.as_function(callee_ty) {
            Some(func_ty) => func_ty,
            None => return false,
        };
        // No match if the function being called has a return value, but the
        // result of the call is not part of a return statement.
        if let Some(return_ty) = func_ty.return_ty {
            if !self.registry.is_void(return_ty) && !self.registry.is_unknown(return_ty) {
                return tree
                    .parent(call)
                    .map_or(false, |parent| tree.kind(parent).is_return());
            }
        }
        true
    }

    /// Returns true if the call has the same name as the enclosing method and
    /// the call dispatches to the superclass.
    fn function_name_matches(
        &self,
        enclosing_method_name: &QualifiedName,
        tree: &Tree,
        call: NodeId,
    ) -> bool {
        let callee = match tree.children(call).first() {
            Some(&callee) => callee,
            None => return false,
        };
        let call_name = match QualifiedName::of(tree, callee) {
            Some(name) => name,
            None => return false,
        };

        // The enclosing method name has the form `ns.Foo.prototype.bar`. The
        // callee is either `ns.Foo.superClass_.bar.call` or
        // `ns.FooBase.prototype.bar.call`.
        let (enclosing_class, method) = match enclosing_method_name.split_once(SegmentKind::Prototype)
        {
            Some(parts) => parts,
            None => return false,
        };

        if let Some((class_path, rest)) = call_name.split_once(SegmentKind::SuperClass) {
            if class_path == enclosing_class && is_method_call_path(rest, method) {
                // Matched the superClass_ accessor synthesized by the
                // closure-primitives desugaring. No further name checks
                // needed.
                return true;
            }
        }

        let (called_class, rest) = match call_name.split_once(SegmentKind::Prototype) {
            Some(parts) => parts,
            None => return false,
        };
        if !is_method_call_path(rest, method) {
            return false;
        }

        // Check that the call references the declared superclass.
        let subclass_ty = match self
            .registry
            .get_global_type(&ast::render_path(enclosing_class))
        {
            Some(ty) => ty,
            None => return false,
        };
        let called_class_ty = match self.registry.get_global_type(&ast::render_path(called_class))
        {
            Some(ty) => ty,
            None => return false,
        };
        let constructor = match self
            .registry
            .as_object(subclass_ty)
            .and_then(|o| o.constructor)
        {
            Some(constructor) => constructor,
            None => return false,
        };
        let superclass_ctor = match self
            .registry
            .as_function(constructor)
            .and_then(|f| f.superclass_ctor)
        {
            Some(superclass_ctor) => superclass_ctor,
            None => return false,
        };
        self.registry
            .as_function(superclass_ctor)
            .and_then(|f| f.instance_type)
            == Some(called_class_ty)
    }
}

/// True if `path` is `method` followed by a plain `.call` member access.
fn is_method_call_path(path: &[PathSegment], method: &[PathSegment]) -> bool {
    let (last, init) = match path.split_last() {
        Some(parts) => parts,
        None => return false,
    };
    init == method && last.kind == SegmentKind::Member && last.name == "call"
}

/// Second traversal: some projects intentionally declare the same qualified
/// name more than once, so any candidate whose name also resolves to a
/// different declaration is dropped.
struct FilterDuplicateMethods<'a> {
    remove_candidates: &'a mut FxHashMap<QualifiedName, NodeId>,
}

impl PostOrderCallback for FilterDuplicateMethods<'_> {
    fn visit(&mut self, tree: &Tree, n: NodeId, parent: Option<NodeId>) {
        let parent = match parent {
            Some(parent) => parent,
            None => return,
        };
        if tree.kind(n).is_function()
            && tree.kind(parent).is_assign()
            && tree
                .grandparent(n)
                .map_or(false, |gp| tree.kind(gp).is_expr_stmt())
        {
            let method_name = match utils::get_name(tree, n) {
                Some(name) => name,
                None => return,
            };
            if self
                .remove_candidates
                .get(&method_name)
                .map_or(false, |&candidate| candidate != n)
            {
                debug!(method = %method_name, "duplicate declaration, keeping all");
                self.remove_candidates.remove(&method_name);
            }
        }
    }
}

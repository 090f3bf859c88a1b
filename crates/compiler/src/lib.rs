// Pass modules are named after the closure passes they implement.
#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]
#![deny(non_shorthand_field_patterns)]

mod RemoveSuperMethodsPass;
pub mod typing;
mod utils;

#[cfg(test)]
mod testing;

use ast::{NodeId, Tree};
use rustc_hash::FxHashSet;
use serde::Deserialize;
use tracing::debug;
use typing::TypeRegistry;

/// Host handle shared by the optimization passes. Collects the change and
/// deletion notifications that pass-external bookkeeping consumes.
#[derive(Default)]
pub struct Compiler {
    changed_scopes: FxHashSet<NodeId>,
    deleted_functions: FxHashSet<NodeId>,
}

impl Compiler {
    pub fn new() -> Self {
        Default::default()
    }

    /// Records that the scope enclosing `node` has changed.
    pub fn report_change_to_enclosing_scope(&mut self, node: NodeId) {
        debug!(node = ?node, "scope changed");
        self.changed_scopes.insert(node);
    }

    /// Records that `func` is no longer part of the tree.
    pub fn mark_function_deleted(&mut self, func: NodeId) {
        debug!(func = ?func, "function deleted");
        self.deleted_functions.insert(func);
    }

    pub fn changed_scopes(&self) -> &FxHashSet<NodeId> {
        &self.changed_scopes
    }

    pub fn deleted_functions(&self) -> &FxHashSet<NodeId> {
        &self.deleted_functions
    }
}

/// Selects which optimization passes run. Embedders deserialize this from
/// their config file.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct PassConfig {
    pub remove_super_methods: bool,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            remove_super_methods: true,
        }
    }
}

/// Runs the configured optimization passes over the tree rooted at `root`.
/// Must run after the closure-primitives and super desugarings and after type
/// checking has populated `registry`.
pub fn run_passes(
    config: &PassConfig,
    tree: &mut Tree,
    root: NodeId,
    registry: &TypeRegistry,
    compiler: &mut Compiler,
) {
    if config.remove_super_methods {
        RemoveSuperMethodsPass::RemoveSuperMethodsPass::process(tree, root, registry, compiler);
    }
}

#[cfg(test)]
mod tests {
    use super::PassConfig;

    #[test]
    fn pass_config_defaults_and_overrides() {
        let config: PassConfig = serde_json::from_str("{}").unwrap();
        assert!(config.remove_super_methods);

        let config: PassConfig = serde_json::from_str(r#"{"removeSuperMethods":false}"#).unwrap();
        assert!(!config.remove_super_methods);
    }
}

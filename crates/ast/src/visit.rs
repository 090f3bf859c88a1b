use crate::{NodeId, Tree};

/// Callback for [`traverse_post_order`]: a node is visited only after all of
/// its children have been visited.
pub trait PostOrderCallback {
    fn visit(&mut self, tree: &Tree, node: NodeId, parent: Option<NodeId>);
}

/// Walks the subtree rooted at `root` in post order. The tree is not mutated
/// during traversal; callbacks collect into their own state.
pub fn traverse_post_order<C>(tree: &Tree, root: NodeId, callback: &mut C)
where
    C: PostOrderCallback,
{
    traverse(tree, root, None, callback);
}

fn traverse<C>(tree: &Tree, node: NodeId, parent: Option<NodeId>, callback: &mut C)
where
    C: PostOrderCallback,
{
    for &child in tree.children(node) {
        traverse(tree, child, Some(node), callback);
    }
    callback.visit(tree, node, parent);
}

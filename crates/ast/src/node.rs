use bitflags::bitflags;
use std::fmt;

/// Stable handle to a node in a [`Tree`]. Handles stay valid across
/// detachment; the arena never frees storage during a pass invocation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    fn from_usize(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize);
        NodeId(index as u32)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

bitflags! {
    /// Markers attached to nodes by earlier stages (the JSDoc-ish annotation
    /// surface the optimizations consult).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Annotations: u8 {
        /// Declarations carrying this marker are never removed by the
        /// optimizations, regardless of shape.
        const NO_REMOVE = 1 << 0;
    }
}

/// Node discriminant. Children orderings follow the usual rhino-style node
/// shapes: `Assign = [target, value]`, `Call = [callee, arg0, ..]` (an
/// explicit `this` receiver occupies the first argument slot),
/// `Function = [params, body]`, and `GetProp = [object]` with the property
/// name stored on the node itself.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Script,
    ExprStmt,
    Return,
    Assign,
    Call,
    GetProp { prop: String },
    Name { sym: String },
    This,
    Number { value: f64 },
    Function,
    ParamList,
    Block,
}

impl NodeKind {
    pub fn is_function(&self) -> bool {
        matches!(self, NodeKind::Function)
    }

    pub fn is_assign(&self) -> bool {
        matches!(self, NodeKind::Assign)
    }

    pub fn is_expr_stmt(&self) -> bool {
        matches!(self, NodeKind::ExprStmt)
    }

    pub fn is_return(&self) -> bool {
        matches!(self, NodeKind::Return)
    }

    pub fn is_call(&self) -> bool {
        matches!(self, NodeKind::Call)
    }

    pub fn is_this(&self) -> bool {
        matches!(self, NodeKind::This)
    }

    pub fn is_name(&self) -> bool {
        matches!(self, NodeKind::Name { .. })
    }
}

struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    annotations: Annotations,
}

/// Arena-allocated tree. Nodes are addressed by [`NodeId`]; parent links are
/// back-references used for navigation only. Detaching a subtree unlinks it
/// from its parent's child list without invalidating any handle.
#[derive(Default)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::from_usize(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
            annotations: Annotations::empty(),
        });
        id
    }

    /// Appends `child` to `parent`'s ordered child list. The child must not
    /// already be attached elsewhere.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes[child.index()].parent.is_none());
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.nodes[node.index()].kind
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].parent
    }

    pub fn grandparent(&self, node: NodeId) -> Option<NodeId> {
        self.parent(node).and_then(|p| self.parent(p))
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.index()].children
    }

    pub fn annotations(&self, node: NodeId) -> Annotations {
        self.nodes[node.index()].annotations
    }

    pub fn add_annotation(&mut self, node: NodeId, annotations: Annotations) {
        self.nodes[node.index()].annotations |= annotations;
    }

    /// Unlinks `node` from its parent's child list. The subtree below `node`
    /// is left intact and can still be walked through `node`.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.index()].parent {
            self.nodes[parent.index()].children.retain(|&c| c != node);
            self.nodes[node.index()].parent = None;
        }
    }
}

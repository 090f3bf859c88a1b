use crate::typing::{NominalClass, TypeId, TypeRegistry};
use crate::Compiler;
use ast::{Annotations, NodeId, NodeKind, Tree};

/// Single-statement method bodies, described in source shape. `"this"` in an
/// argument list becomes a this-reference, any other name a name-reference.
pub enum Body<'a> {
    /// `callee(args...);`
    Call {
        callee: &'a str,
        args: &'a [&'a str],
    },
    /// `return callee(args...);`
    ReturnCall {
        callee: &'a str,
        args: &'a [&'a str],
    },
    /// `return <value>;`
    ReturnNumber(f64),
}

/// Node handles for a `name = function(...) {...};` declaration built by
/// [`TestProgram::method`].
pub struct MethodDecl {
    pub stmt: NodeId,
    pub assign: NodeId,
    pub func: NodeId,
    pub block: NodeId,
    /// The callee chain of the body call, when the body is a call.
    pub callee: Option<NodeId>,
}

/// Builds arena trees in the post-desugaring shape the pass consumes and runs
/// the pass over them. The printed tree is the comparison surface for tests.
pub struct TestProgram {
    pub tree: Tree,
    pub root: NodeId,
    pub registry: TypeRegistry,
}

impl TestProgram {
    pub fn new() -> Self {
        let mut tree = Tree::new();
        let root = tree.alloc(NodeKind::Script);
        Self {
            tree,
            root,
            registry: TypeRegistry::new(),
        }
    }

    /// Appends a `name = function(params) { body };` statement to the script.
    pub fn method(&mut self, name: &str, params: &[&str], body: Body<'_>) -> MethodDecl {
        let stmt = self.tree.alloc(NodeKind::ExprStmt);
        let assign = self.tree.alloc(NodeKind::Assign);
        let target = self.name_chain(name);
        let func = self.tree.alloc(NodeKind::Function);
        let param_list = self.tree.alloc(NodeKind::ParamList);
        for &param in params {
            let param = self.tree.alloc(NodeKind::Name {
                sym: param.to_string(),
            });
            self.tree.add_child(param_list, param);
        }
        let block = self.tree.alloc(NodeKind::Block);

        let mut callee_id = None;
        let body_stmt = match body {
            Body::Call { callee, args } => {
                let wrapper = self.tree.alloc(NodeKind::ExprStmt);
                let (call, callee) = self.call_expr(callee, args);
                self.tree.add_child(wrapper, call);
                callee_id = Some(callee);
                wrapper
            }
            Body::ReturnCall { callee, args } => {
                let wrapper = self.tree.alloc(NodeKind::Return);
                let (call, callee) = self.call_expr(callee, args);
                self.tree.add_child(wrapper, call);
                callee_id = Some(callee);
                wrapper
            }
            Body::ReturnNumber(value) => {
                let wrapper = self.tree.alloc(NodeKind::Return);
                let number = self.tree.alloc(NodeKind::Number { value });
                self.tree.add_child(wrapper, number);
                wrapper
            }
        };
        self.tree.add_child(block, body_stmt);

        self.tree.add_child(func, param_list);
        self.tree.add_child(func, block);
        self.tree.add_child(assign, target);
        self.tree.add_child(assign, func);
        self.tree.add_child(stmt, assign);
        self.tree.add_child(self.root, stmt);

        MethodDecl {
            stmt,
            assign,
            func,
            block,
            callee: callee_id,
        }
    }

    /// Appends `return <value>;` to the method body, making it
    /// multi-statement.
    pub fn append_return_number(&mut self, decl: &MethodDecl, value: f64) {
        let stmt = self.tree.alloc(NodeKind::Return);
        let number = self.tree.alloc(NodeKind::Number { value });
        self.tree.add_child(stmt, number);
        self.tree.add_child(decl.block, stmt);
    }

    pub fn annotate_no_remove(&mut self, decl: &MethodDecl) {
        self.tree.add_annotation(decl.assign, Annotations::NO_REMOVE);
    }

    pub fn declare_class(&mut self, name: &str, superclass: Option<&NominalClass>) -> NominalClass {
        self.registry.declare_class(name, superclass)
    }

    /// Attaches a declared function type with the given return type to the
    /// body call's callee, as the upstream type checker would.
    pub fn set_callee_function_type(&mut self, decl: &MethodDecl, return_ty: Option<TypeId>) {
        let ty = self.registry.create_function_type(return_ty);
        self.set_callee_type(decl, ty);
    }

    pub fn set_callee_type(&mut self, decl: &MethodDecl, ty: TypeId) {
        let callee = decl.callee.expect("declaration body has no call");
        self.registry.set_type(callee, ty);
    }

    /// Runs the pass once, returning the host handle with the recorded
    /// notifications.
    pub fn process(&mut self) -> Compiler {
        let mut compiler = Compiler::new();
        crate::RemoveSuperMethodsPass::RemoveSuperMethodsPass::process(
            &mut self.tree,
            self.root,
            &self.registry,
            &mut compiler,
        );
        compiler
    }

    pub fn print(&self) -> String {
        ast::print(&self.tree, self.root)
    }

    fn name_chain(&mut self, dotted: &str) -> NodeId {
        let mut parts = dotted.split('.');
        let first = parts.next().unwrap();
        let mut node = self.tree.alloc(NodeKind::Name {
            sym: first.to_string(),
        });
        for part in parts {
            let getprop = self.tree.alloc(NodeKind::GetProp {
                prop: part.to_string(),
            });
            self.tree.add_child(getprop, node);
            node = getprop;
        }
        node
    }

    fn call_expr(&mut self, callee: &str, args: &[&str]) -> (NodeId, NodeId) {
        let call = self.tree.alloc(NodeKind::Call);
        let callee = self.name_chain(callee);
        self.tree.add_child(call, callee);
        for &arg in args {
            let arg = if arg == "this" {
                self.tree.alloc(NodeKind::This)
            } else {
                self.tree.alloc(NodeKind::Name {
                    sym: arg.to_string(),
                })
            };
            self.tree.add_child(call, arg);
        }
        (call, callee)
    }
}

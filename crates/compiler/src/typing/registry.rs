use super::types::{CommonTypes, FunctionType, ObjectType, Ty, TyKind, TypeId};
use ast::NodeId;
use rustc_hash::FxHashMap;

/// Handles to a declared nominal class: its constructor and instance type.
pub struct NominalClass {
    pub constructor: TypeId,
    pub instance_type: TypeId,
}

/// Lookup service for the type information the upstream type-checking stage
/// attached to the tree. Read-only while a pass runs: passes only compare the
/// types recorded here, they never create new ones.
pub struct TypeRegistry {
    types: Vec<Ty>,
    /// Declared type of a node, keyed by node handle.
    node_types: FxHashMap<NodeId, TypeId>,
    /// Globally declared nominal types, keyed by rendered qualified name.
    global_types: FxHashMap<String, TypeId>,
    pub common_types: CommonTypes,
}

impl TypeRegistry {
    pub fn new() -> Self {
        let mut types = Vec::new();
        let mut mk = |kind: TyKind| {
            let id = TypeId::from_usize(types.len());
            types.push(Ty { kind });
            id
        };
        let common_types = CommonTypes {
            VOID_TYPE: mk(TyKind::Void),
            UNKNOWN_TYPE: mk(TyKind::Unknown),
            NUMBER_TYPE: mk(TyKind::Number),
        };
        Self {
            types,
            node_types: FxHashMap::default(),
            global_types: FxHashMap::default(),
            common_types,
        }
    }

    pub fn ty(&self, id: TypeId) -> &Ty {
        &self.types[id.index()]
    }

    pub fn get_type(&self, node: NodeId) -> Option<TypeId> {
        self.node_types.get(&node).copied()
    }

    pub fn set_type(&mut self, node: NodeId, ty: TypeId) {
        self.node_types.insert(node, ty);
    }

    pub fn get_global_type(&self, name: &str) -> Option<TypeId> {
        self.global_types.get(name).copied()
    }

    pub fn register_global_type(&mut self, name: &str, ty: TypeId) {
        self.global_types.insert(name.to_string(), ty);
    }

    /// Interns a plain function type with the given declared return type.
    pub fn create_function_type(&mut self, return_ty: Option<TypeId>) -> TypeId {
        self.push(TyKind::Function(FunctionType {
            return_ty,
            instance_type: None,
            superclass_ctor: None,
        }))
    }

    /// Declares a nominal class: interns its constructor and instance types,
    /// links them to each other and to the superclass constructor, and
    /// registers the instance type under `name`.
    pub fn declare_class(&mut self, name: &str, superclass: Option<&NominalClass>) -> NominalClass {
        let constructor = self.push(TyKind::Function(FunctionType {
            return_ty: None,
            instance_type: None,
            superclass_ctor: superclass.map(|s| s.constructor),
        }));
        let instance_type = self.push(TyKind::Object(ObjectType {
            constructor: Some(constructor),
        }));
        if let TyKind::Function(f) = &mut self.types[constructor.index()].kind {
            f.instance_type = Some(instance_type);
        }
        self.global_types.insert(name.to_string(), instance_type);
        NominalClass {
            constructor,
            instance_type,
        }
    }

    pub fn as_function(&self, id: TypeId) -> Option<&FunctionType> {
        match &self.ty(id).kind {
            TyKind::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_object(&self, id: TypeId) -> Option<&ObjectType> {
        match &self.ty(id).kind {
            TyKind::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn is_void(&self, id: TypeId) -> bool {
        matches!(self.ty(id).kind, TyKind::Void)
    }

    pub fn is_unknown(&self, id: TypeId) -> bool {
        matches!(self.ty(id).kind, TyKind::Unknown)
    }

    fn push(&mut self, kind: TyKind) -> TypeId {
        let id = TypeId::from_usize(self.types.len());
        self.types.push(Ty { kind });
        id
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_classes_link_constructor_and_instance() {
        let mut registry = TypeRegistry::new();
        let base = registry.declare_class("ns.Base", None);
        let dog = registry.declare_class("ns.Dog", Some(&base));

        assert_eq!(registry.get_global_type("ns.Dog"), Some(dog.instance_type));
        let ctor = registry.as_function(dog.constructor).unwrap();
        assert_eq!(ctor.instance_type, Some(dog.instance_type));
        assert_eq!(ctor.superclass_ctor, Some(base.constructor));
        assert_eq!(
            registry.as_object(dog.instance_type).unwrap().constructor,
            Some(dog.constructor)
        );
        assert_eq!(
            registry.as_function(base.constructor).unwrap().superclass_ctor,
            None
        );
    }
}

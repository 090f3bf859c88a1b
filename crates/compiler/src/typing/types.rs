use std::fmt;

/// Stable handle to an interned [`Ty`] in the registry. Types are interned,
/// so two equal ids denote the same type and id equality is type identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(u32);

impl TypeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_usize(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize);
        TypeId(index as u32)
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

#[derive(Debug)]
pub struct Ty {
    pub kind: TyKind,
}

#[derive(Debug)]
pub enum TyKind {
    Void,
    Unknown,
    Number,
    Object(ObjectType),
    Function(FunctionType),
}

/// A nominal instance type.
#[derive(Debug)]
pub struct ObjectType {
    /// The constructor that declared this nominal type, when known.
    pub constructor: Option<TypeId>,
}

/// A declared function type. Constructors additionally carry their instance
/// type and, when one was declared, their superclass constructor.
#[derive(Debug)]
pub struct FunctionType {
    pub return_ty: Option<TypeId>,
    pub instance_type: Option<TypeId>,
    pub superclass_ctor: Option<TypeId>,
}

/// Types every pass needs, interned once at registry construction.
pub struct CommonTypes {
    pub VOID_TYPE: TypeId,
    pub UNKNOWN_TYPE: TypeId,
    pub NUMBER_TYPE: TypeId,
}

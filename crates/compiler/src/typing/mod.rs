mod registry;
mod types;

pub use registry::{NominalClass, TypeRegistry};
pub use types::{CommonTypes, FunctionType, ObjectType, Ty, TyKind, TypeId};

#![deny(unreachable_patterns)]
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
#![deny(unreachable_pub)]

mod node;
mod print;
mod qualified_name;
mod visit;

pub use node::{Annotations, NodeId, NodeKind, Tree};
pub use print::print;
pub use qualified_name::{render_path, PathSegment, QualifiedName, SegmentKind};
pub use visit::{traverse_post_order, PostOrderCallback};

use crate::{NodeId, NodeKind, Tree};
use std::fmt;

/// How a path segment was reached. `prototype` and `superClass_` property
/// accesses are tagged so that marker matching compares segments instead of
/// splitting dotted strings on substrings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Member,
    /// A literal `prototype` property access.
    Prototype,
    /// A literal `superClass_` property access, synthesized by the
    /// closure-primitives desugaring.
    SuperClass,
}

impl SegmentKind {
    fn of_property(name: &str) -> SegmentKind {
        match name {
            "prototype" => SegmentKind::Prototype,
            "superClass_" => SegmentKind::SuperClass,
            _ => SegmentKind::Member,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathSegment {
    pub name: String,
    pub kind: SegmentKind,
}

/// The fully dotted static path identifying a declaration, e.g.
/// `ns.Foo.prototype.bar`, kept as an ordered segment sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    segments: Vec<PathSegment>,
}

impl QualifiedName {
    /// Derives the qualified name of a name/property-access chain. Returns
    /// `None` for anything that is not a simple chain of name references.
    /// This is the same derivation the rest of the host uses for name-based
    /// linkage, so names compare consistently across passes.
    pub fn of(tree: &Tree, node: NodeId) -> Option<QualifiedName> {
        let mut segments = Vec::new();
        if collect(tree, node, &mut segments) {
            Some(QualifiedName { segments })
        } else {
            None
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Splits on the single interior segment with the given tag. This is the
    /// structured equivalent of splitting the dotted name on a `.marker.`
    /// substring into exactly two non-empty parts: more than one occurrence,
    /// or a marker in leading or trailing position, yields `None`.
    pub fn split_once(&self, kind: SegmentKind) -> Option<(&[PathSegment], &[PathSegment])> {
        let mut split = None;
        for (i, segment) in self.segments.iter().enumerate() {
            if segment.kind == kind {
                if split.is_some() {
                    return None;
                }
                split = Some(i);
            }
        }
        let i = split?;
        if i == 0 || i + 1 == self.segments.len() {
            return None;
        }
        Some((&self.segments[..i], &self.segments[i + 1..]))
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_path(&self.segments))
    }
}

/// Renders a run of path segments back to dotted source form.
pub fn render_path(segments: &[PathSegment]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(&segment.name);
    }
    out
}

fn collect(tree: &Tree, node: NodeId, out: &mut Vec<PathSegment>) -> bool {
    match tree.kind(node) {
        NodeKind::Name { sym } => {
            out.push(PathSegment {
                name: sym.clone(),
                kind: SegmentKind::Member,
            });
            true
        }
        NodeKind::GetProp { prop } => {
            let object = match tree.children(node).first() {
                Some(&object) => object,
                None => return false,
            };
            if !collect(tree, object, out) {
                return false;
            }
            out.push(PathSegment {
                name: prop.clone(),
                kind: SegmentKind::of_property(prop),
            });
            true
        }
        _ => false,
    }
}

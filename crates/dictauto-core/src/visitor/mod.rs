pub mod discover;
pub mod inject;

pub use discover::*;
pub use inject::*;

use crate::{
    model::FieldModel,
    traits::{DictRecord, Visitable},
};
use std::fmt::{self, Write};
use tracing::trace;

// ============================================================================
// Path
// ============================================================================

///
/// PathSegment
///
/// One step from a parent node to a child. `Root` marks the entry call
/// and never shows up in a rendered path.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PathSegment {
    Root,
    Field(&'static str),
    Index(usize),
}

impl PathSegment {
    #[must_use]
    pub const fn is_root(self) -> bool {
        matches!(self, Self::Root)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => Ok(()),
            Self::Field(name) => f.write_str(name),
            Self::Index(i) => write!(f, "[{i}]"),
        }
    }
}

// struct fields
impl From<&'static str> for PathSegment {
    fn from(name: &'static str) -> Self {
        Self::Field(name)
    }
}

// sequence positions
impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

///
/// VisitPath
///
/// Segments from the root to the node currently being visited.
/// Renders as `orders[2].customer.gender`.
///

#[derive(Clone, Debug, Default)]
pub struct VisitPath(Vec<PathSegment>);

impl VisitPath {
    pub fn push(&mut self, seg: PathSegment) {
        if !seg.is_root() {
            self.0.push(seg);
        }
    }

    pub fn pop(&mut self) {
        self.0.pop();
    }

    /// Render the path with one extra trailing field.
    #[must_use]
    pub fn join(&self, field: &str) -> String {
        let mut out = self.to_string();
        if !out.is_empty() {
            out.push('.');
        }
        out.push_str(field);

        out
    }
}

impl fmt::Display for VisitPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.0.iter().enumerate() {
            if i > 0 && matches!(seg, PathSegment::Field(_)) {
                f.write_char('.')?;
            }
            write!(f, "{seg}")?;
        }

        Ok(())
    }
}

// ============================================================================
// VisitorCore (immutable)
// ============================================================================

pub trait VisitorCore {
    /// Called once per coded field, in declaration order.
    fn visit_code(&mut self, record: &dyn DictRecord, field: &'static FieldModel);

    fn push(&mut self, _: PathSegment) {}
    fn pop(&mut self) {}
}

// ============================================================================
// VisitorMutCore (mutable)
// ============================================================================

pub trait VisitorMutCore {
    /// Called once per coded field, in declaration order.
    fn visit_code_mut(&mut self, record: &mut dyn DictRecord, field: &'static FieldModel);

    /// A halted visitor receives no further nodes.
    fn is_halted(&self) -> bool {
        false
    }

    /// The set at the current path held `before` elements and `after`
    /// remained once the visited elements were put back.
    fn set_collapsed(&mut self, _before: usize, _after: usize) {}

    fn push(&mut self, _: PathSegment) {}
    fn pop(&mut self) {}
}

// ============================================================================
// Traversal
// ============================================================================

pub fn perform_visit<S: Into<PathSegment>>(
    visitor: &mut dyn VisitorCore,
    node: &dyn Visitable,
    seg: S,
) {
    let kind = node.kind();
    let seg = seg.into();

    if kind.is_leaf() {
        trace!(?kind, ?seg, "dict visit: leaf");
        return;
    }

    let should_push = !seg.is_root();
    if should_push {
        visitor.push(seg);
    }

    node.drive(visitor);

    if should_push {
        visitor.pop();
    }
}

pub fn perform_visit_mut<S: Into<PathSegment>>(
    visitor: &mut dyn VisitorMutCore,
    node: &mut dyn Visitable,
    seg: S,
) {
    if visitor.is_halted() {
        return;
    }

    let kind = node.kind();
    let seg = seg.into();

    if kind.is_leaf() {
        trace!(?kind, ?seg, "dict visit: leaf");
        return;
    }

    let should_push = !seg.is_root();
    if should_push {
        visitor.push(seg);
    }

    node.drive_mut(visitor);

    if should_push {
        visitor.pop();
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_renders_fields_and_indices() {
        let mut path = VisitPath::default();
        path.push("orders".into());
        path.push(2usize.into());
        path.push(PathSegment::Root);
        path.push("customer".into());

        assert_eq!(path.to_string(), "orders[2].customer");
        assert_eq!(path.join("gender"), "orders[2].customer.gender");

        path.pop();
        path.pop();
        assert_eq!(path.to_string(), "orders");
    }

    #[test]
    fn root_path_joins_without_separator() {
        let path = VisitPath::default();

        assert_eq!(path.join("gender"), "gender");
    }

    #[test]
    fn leading_index_has_no_dot() {
        let mut path = VisitPath::default();
        path.push(0usize.into());
        path.push("city".into());

        assert_eq!(path.to_string(), "[0].city");
    }

    #[test]
    fn root_segment_renders_empty() {
        assert!(PathSegment::Root.is_root());
        assert_eq!(PathSegment::Root.to_string(), "");
        assert_eq!(PathSegment::from("city").to_string(), "city");
        assert_eq!(PathSegment::from(3usize).to_string(), "[3]");
    }

    #[test]
    fn consecutive_indices_render_without_dots() {
        let mut path = VisitPath::default();
        path.push("grid".into());
        path.push(1usize.into());
        path.push(4usize.into());

        assert_eq!(path.to_string(), "grid[1][4]");
    }
}

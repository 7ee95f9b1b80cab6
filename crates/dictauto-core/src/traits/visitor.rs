use crate::visitor::{VisitorCore, VisitorMutCore, perform_visit, perform_visit_mut};
use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    hash::{BuildHasher, Hash},
};

///
/// NodeKind
///
/// Shape of a graph node, decided once per node before any descent.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeKind {
    /// Scalar leaf (numbers, text, bool, enums).
    Base,

    /// Already-resolved dictionary row.
    Item,

    /// Ordered or unordered collection; every element is visited.
    Sequence,

    /// Map; only values are visited.
    Map,

    /// Structured type with a field model.
    Record,
}

impl NodeKind {
    /// Leaves end the descent without calling `drive`.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::Base | Self::Item)
    }
}

///
/// Visitable
///
/// A node the walker can classify and descend into. The defaults make a
/// type a `Base` leaf, so scalars only need an empty impl.
///

pub trait Visitable {
    fn kind(&self) -> NodeKind {
        NodeKind::Base
    }

    fn drive(&self, _: &mut dyn VisitorCore) {}

    fn drive_mut(&mut self, _: &mut dyn VisitorMutCore) {}
}

impl_base!(
    (),
    bool,
    char,
    str,
    String,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
);

// transparent wrappers

impl<T: Visitable> Visitable for Option<T> {
    fn kind(&self) -> NodeKind {
        self.as_ref().map_or(NodeKind::Base, Visitable::kind)
    }

    fn drive(&self, visitor: &mut dyn VisitorCore) {
        if let Some(inner) = self {
            inner.drive(visitor);
        }
    }

    fn drive_mut(&mut self, visitor: &mut dyn VisitorMutCore) {
        if let Some(inner) = self {
            inner.drive_mut(visitor);
        }
    }
}

impl<T: Visitable + ?Sized> Visitable for Box<T> {
    fn kind(&self) -> NodeKind {
        (**self).kind()
    }

    fn drive(&self, visitor: &mut dyn VisitorCore) {
        (**self).drive(visitor);
    }

    fn drive_mut(&mut self, visitor: &mut dyn VisitorMutCore) {
        (**self).drive_mut(visitor);
    }
}

// ordered sequences

impl<T: Visitable> Visitable for [T] {
    fn kind(&self) -> NodeKind {
        NodeKind::Sequence
    }

    fn drive(&self, visitor: &mut dyn VisitorCore) {
        for (i, item) in self.iter().enumerate() {
            perform_visit(visitor, item, i);
        }
    }

    fn drive_mut(&mut self, visitor: &mut dyn VisitorMutCore) {
        for (i, item) in self.iter_mut().enumerate() {
            perform_visit_mut(visitor, item, i);
        }
    }
}

impl<T: Visitable, const N: usize> Visitable for [T; N] {
    fn kind(&self) -> NodeKind {
        NodeKind::Sequence
    }

    fn drive(&self, visitor: &mut dyn VisitorCore) {
        self.as_slice().drive(visitor);
    }

    fn drive_mut(&mut self, visitor: &mut dyn VisitorMutCore) {
        self.as_mut_slice().drive_mut(visitor);
    }
}

impl<T: Visitable> Visitable for Vec<T> {
    fn kind(&self) -> NodeKind {
        NodeKind::Sequence
    }

    fn drive(&self, visitor: &mut dyn VisitorCore) {
        self.as_slice().drive(visitor);
    }

    fn drive_mut(&mut self, visitor: &mut dyn VisitorMutCore) {
        self.as_mut_slice().drive_mut(visitor);
    }
}

impl<T: Visitable> Visitable for VecDeque<T> {
    fn kind(&self) -> NodeKind {
        NodeKind::Sequence
    }

    fn drive(&self, visitor: &mut dyn VisitorCore) {
        for (i, item) in self.iter().enumerate() {
            perform_visit(visitor, item, i);
        }
    }

    fn drive_mut(&mut self, visitor: &mut dyn VisitorMutCore) {
        for (i, item) in self.iter_mut().enumerate() {
            perform_visit_mut(visitor, item, i);
        }
    }
}

// unordered sets
//
// Set elements cannot be borrowed mutably, so `drive_mut` drains the set,
// visits every element and refills the same instance. Elements that turn
// equal once their item fields are written merge on refill; the visitor
// is told through `set_collapsed` and fails the pass.

impl<T, S> Visitable for HashSet<T, S>
where
    T: Visitable + Eq + Hash,
    S: BuildHasher,
{
    fn kind(&self) -> NodeKind {
        NodeKind::Sequence
    }

    fn drive(&self, visitor: &mut dyn VisitorCore) {
        for (i, item) in self.iter().enumerate() {
            perform_visit(visitor, item, i);
        }
    }

    fn drive_mut(&mut self, visitor: &mut dyn VisitorMutCore) {
        let before = self.len();
        let mut items: Vec<T> = self.drain().collect();
        items.as_mut_slice().drive_mut(visitor);
        self.extend(items);

        if self.len() < before {
            visitor.set_collapsed(before, self.len());
        }
    }
}

impl<T: Visitable + Ord> Visitable for BTreeSet<T> {
    fn kind(&self) -> NodeKind {
        NodeKind::Sequence
    }

    fn drive(&self, visitor: &mut dyn VisitorCore) {
        for (i, item) in self.iter().enumerate() {
            perform_visit(visitor, item, i);
        }
    }

    fn drive_mut(&mut self, visitor: &mut dyn VisitorMutCore) {
        let before = self.len();
        let mut items: Vec<T> = std::mem::take(self).into_iter().collect();
        items.as_mut_slice().drive_mut(visitor);
        self.extend(items);

        if self.len() < before {
            visitor.set_collapsed(before, self.len());
        }
    }
}

// maps: values only, keys are never inspected

impl<K, V, S> Visitable for HashMap<K, V, S>
where
    V: Visitable,
{
    fn kind(&self) -> NodeKind {
        NodeKind::Map
    }

    fn drive(&self, visitor: &mut dyn VisitorCore) {
        for (i, value) in self.values().enumerate() {
            perform_visit(visitor, value, i);
        }
    }

    fn drive_mut(&mut self, visitor: &mut dyn VisitorMutCore) {
        for (i, value) in self.values_mut().enumerate() {
            perform_visit_mut(visitor, value, i);
        }
    }
}

impl<K, V: Visitable> Visitable for BTreeMap<K, V> {
    fn kind(&self) -> NodeKind {
        NodeKind::Map
    }

    fn drive(&self, visitor: &mut dyn VisitorCore) {
        for (i, value) in self.values().enumerate() {
            perform_visit(visitor, value, i);
        }
    }

    fn drive_mut(&mut self, visitor: &mut dyn VisitorMutCore) {
        for (i, value) in self.values_mut().enumerate() {
            perform_visit_mut(visitor, value, i);
        }
    }
}

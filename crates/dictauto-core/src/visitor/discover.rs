use crate::{
    model::FieldModel,
    traits::{DictRecord, Visitable},
    visitor::{PathSegment, VisitorCore, perform_visit},
};
use std::collections::BTreeSet;
use tracing::debug;

///
/// discover
/// Collect every type tag reachable from `root` through coded fields.
///
/// Needs no lookup data and never reads coded values, so the result can
/// drive a single batched fetch before injection.
///

#[must_use]
pub fn discover(root: &dyn Visitable) -> BTreeSet<String> {
    let mut visitor = DiscoverVisitor::new();
    perform_visit(&mut visitor, root, PathSegment::Root);

    let kinds = visitor.into_kinds();
    debug!(kinds = ?kinds, "dict discover finished");

    kinds
}

///
/// DiscoverVisitor
///

#[derive(Debug, Default)]
pub struct DiscoverVisitor {
    kinds: BTreeSet<String>,
}

impl DiscoverVisitor {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            kinds: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn into_kinds(self) -> BTreeSet<String> {
        self.kinds
    }
}

impl VisitorCore for DiscoverVisitor {
    fn visit_code(&mut self, _: &dyn DictRecord, field: &'static FieldModel) {
        if let Some(dict) = field.dict_id() {
            self.kinds.insert(dict.kind.trim().to_string());
        }
    }
}

///
/// TESTS
///

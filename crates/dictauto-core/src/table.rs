use crate::{
    error::DictError,
    item::{DictItem, dict_key},
};
use derive_more::{Deref, IntoIterator};
use std::collections::{HashMap, hash_map::Entry};

///
/// DictTable
///
/// Immutable lookup table keyed by [`dict_key`]. Built once per pass
/// and shared read-only between passes.
///

#[derive(Clone, Debug, Default, Deref, IntoIterator)]
pub struct DictTable(HashMap<String, DictItem>);

impl DictTable {
    /// Index a flat list of rows. Two rows composing the same key are rejected.
    pub fn new<I>(items: I) -> Result<Self, DictError>
    where
        I: IntoIterator<Item = DictItem>,
    {
        let items = items.into_iter();
        let mut map = HashMap::with_capacity(items.size_hint().0);

        for item in items {
            match map.entry(item.key()) {
                Entry::Occupied(slot) => {
                    return Err(DictError::DuplicateKey {
                        key: slot.key().clone(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(item);
                }
            }
        }

        Ok(Self(map))
    }

    #[must_use]
    pub fn get(&self, kind: &str, parent: &str, code: &str) -> Option<&DictItem> {
        self.0.get(&dict_key(kind, parent, code))
    }

    #[must_use]
    pub fn get_key(&self, key: &str) -> Option<&DictItem> {
        self.0.get(key)
    }

    /// Whether any row carries the given type tag.
    #[must_use]
    pub fn has_kind(&self, kind: &str) -> bool {
        self.0.values().any(|item| item.kind.trim() == kind.trim())
    }
}

///
/// TESTS
///

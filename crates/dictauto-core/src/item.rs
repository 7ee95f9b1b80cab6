use crate::traits::{NodeKind, Visitable};
use serde::{Deserialize, Serialize};

/// Separator between key segments.
pub const KEY_SEPARATOR: char = '/';

///
/// DictItem
///
/// One dictionary row. `id` and `parent_id` hold the string form of the
/// code; an empty `parent_id` marks a root row.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DictItem {
    pub id: String,

    #[serde(default)]
    pub parent_id: String,

    #[serde(rename = "type", default)]
    pub kind: String,

    pub name: String,
}

impl DictItem {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        parent_id: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.into(),
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Lookup key of this row, see [`dict_key`].
    #[must_use]
    pub fn key(&self) -> String {
        dict_key(&self.kind, &self.parent_id, &self.id)
    }
}

// Resolved items are never descended into.
impl Visitable for DictItem {
    fn kind(&self) -> NodeKind {
        NodeKind::Item
    }
}

///
/// dict_key
///
/// Compose `[type/][parent/]code`. Every segment is trimmed and an empty
/// type or parent is dropped together with its separator.
///

#[must_use]
pub fn dict_key(kind: &str, parent: &str, code: &str) -> String {
    let mut key = String::new();

    for segment in [kind.trim(), parent.trim()] {
        if !segment.is_empty() {
            key.push_str(segment);
            key.push(KEY_SEPARATOR);
        }
    }
    key.push_str(code.trim());

    key
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn full_key_has_three_segments() {
        assert_eq!(dict_key("city", "zhejiang", "hangzhou"), "city/zhejiang/hangzhou");
    }

    #[test]
    fn empty_parent_drops_its_segment() {
        assert_eq!(dict_key("gender", "", "1"), "gender/1");
        assert_eq!(dict_key("gender", "   ", "1"), "gender/1");
    }

    #[test]
    fn flat_key_is_the_code_alone() {
        assert_eq!(dict_key("", "", "42"), "42");
    }

    #[test]
    fn segments_are_trimmed() {
        assert_eq!(dict_key(" city ", " zhejiang", "hangzhou "), "city/zhejiang/hangzhou");
    }

    #[test]
    fn item_key_matches_free_function() {
        let item = DictItem::new("hangzhou", "zhejiang", "city", "杭州");

        assert_eq!(item.key(), dict_key("city", "zhejiang", "hangzhou"));
    }

    #[test]
    fn item_serializes_kind_as_type() {
        let item = DictItem::new("1", "0", "gender", "男");
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["type"], "gender");
        assert_eq!(json["parentId"], "0");
        assert_eq!(json["name"], "男");
    }

    #[test]
    fn item_deserializes_without_parent_or_type() {
        let item: DictItem = serde_json::from_str(r#"{"id":"7","name":"seven"}"#).unwrap();

        assert_eq!(item, DictItem::new("7", "", "", "seven"));
        assert_eq!(item.key(), "7");
    }

    proptest! {
        #[test]
        fn key_never_contains_empty_segments(
            kind in "[ a-z]{0,6}",
            parent in "[ a-z0-9]{0,6}",
            code in "[a-z0-9]{1,6}",
        ) {
            let key = dict_key(&kind, &parent, &code);

            prop_assert!(key.split(KEY_SEPARATOR).all(|segment| !segment.is_empty()));
            prop_assert!(key.ends_with(code.as_str()));
        }
    }
}

//! Static field metadata attached to record types at definition time.
//!
//! Models are `'static` and built once per type, usually by
//! `#[derive(Dict)]`. Hand-written `DictRecord` impls build them as
//! `static` items with the const constructors below.

///
/// DictId
///
/// Marks a field as dictionary-coded.
///
/// - `kind`: lookup category, may be empty for untyped dictionaries
/// - `parent`: literal parent code, wins over `parent_field`
/// - `parent_field`: sibling field supplying the parent code at runtime
/// - `target`: explicit item field; derived from the field name when absent
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DictId {
    pub kind: &'static str,
    pub parent: Option<&'static str>,
    pub parent_field: Option<&'static str>,
    pub target: Option<&'static str>,
}

impl DictId {
    #[must_use]
    pub const fn new(kind: &'static str) -> Self {
        Self {
            kind,
            parent: None,
            parent_field: None,
            target: None,
        }
    }

    #[must_use]
    pub const fn parent(mut self, parent: &'static str) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub const fn parent_field(mut self, field: &'static str) -> Self {
        self.parent_field = Some(field);
        self
    }

    #[must_use]
    pub const fn target(mut self, field: &'static str) -> Self {
        self.target = Some(field);
        self
    }
}

///
/// FieldRole
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldRole {
    /// Regular field; the walker descends into its value.
    Plain,

    /// Dictionary-coded field.
    Code(DictId),

    /// Slot receiving a resolved `DictItem`.
    Item,
}

///
/// FieldModel
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldModel {
    pub name: &'static str,
    pub role: FieldRole,
}

impl FieldModel {
    #[must_use]
    pub const fn plain(name: &'static str) -> Self {
        Self {
            name,
            role: FieldRole::Plain,
        }
    }

    #[must_use]
    pub const fn code(name: &'static str, dict: DictId) -> Self {
        Self {
            name,
            role: FieldRole::Code(dict),
        }
    }

    #[must_use]
    pub const fn item(name: &'static str) -> Self {
        Self {
            name,
            role: FieldRole::Item,
        }
    }

    #[must_use]
    pub const fn dict_id(&self) -> Option<&DictId> {
        match &self.role {
            FieldRole::Code(dict) => Some(dict),
            _ => None,
        }
    }
}

///
/// RecordModel
///
/// Visible fields of one record type, in declaration order.
/// Fields the walker must not see are simply absent.
///

#[derive(Debug)]
pub struct RecordModel {
    pub type_name: &'static str,
    pub fields: &'static [FieldModel],
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    static MODEL: RecordModel = RecordModel {
        type_name: "Address",
        fields: &[
            FieldModel::code("province", DictId::new("city").parent("0").target("province_dict")),
            FieldModel::code("city", DictId::new("city").parent_field("province")),
            FieldModel::item("province_dict"),
            FieldModel::item("city_item"),
            FieldModel::plain("street"),
        ],
    };

    fn dict_ids() -> Vec<(&'static str, &'static DictId)> {
        MODEL
            .fields
            .iter()
            .filter_map(|field| field.dict_id().map(|dict| (field.name, dict)))
            .collect()
    }

    #[test]
    fn only_code_fields_carry_a_dict_id() {
        let names: Vec<_> = dict_ids().into_iter().map(|(name, _)| name).collect();

        assert_eq!(names, ["province", "city"]);
        assert_eq!(MODEL.fields[2].role, FieldRole::Item);
        assert_eq!(MODEL.fields[4].role, FieldRole::Plain);
    }

    #[test]
    fn builders_fill_optional_parts() {
        let (_, province) = dict_ids()[0];
        let (_, city) = dict_ids()[1];

        assert_eq!(province.parent, Some("0"));
        assert_eq!(province.target, Some("province_dict"));
        assert_eq!(city.kind, "city");
        assert_eq!(city.parent, None);
        assert_eq!(city.parent_field, Some("province"));
        assert_eq!(city.target, None);
    }
}

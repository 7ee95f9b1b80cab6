use crate::{
    error::{AccessAction, DictError},
    item::DictItem,
    model::{DictId, FieldModel, RecordModel},
    table::DictTable,
    traits::{DictRecord, NodeKind, Visitable},
    visitor::{VisitorCore, VisitorMutCore},
};
use dictauto_derive::Dict;
use std::time::Duration;

///
/// Address
///

#[derive(Clone, Debug, Default, Dict, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Address {
    #[dict(kind = "city", parent = "0", target = "province_dict")]
    pub(crate) province: String,

    #[dict(kind = "city", parent_field = "province", target = "city_dict")]
    pub(crate) city: String,

    pub(crate) province_dict: Option<DictItem>,
    pub(crate) city_dict: Option<DictItem>,
}

///
/// Person
///

#[derive(Clone, Debug, Default, Dict, PartialEq)]
pub(crate) struct Person {
    #[dict(kind = "gender", parent = "0")]
    pub(crate) gender: String,

    pub(crate) gender_item: Option<DictItem>,
    pub(crate) address: Address,
    pub(crate) status: Status,
    pub(crate) nickname: String,
}

///
/// Profile
///

#[derive(Debug, Default, Dict)]
pub(crate) struct Profile {
    #[dict(kind = "role")]
    pub(crate) role_id: Option<u32>,

    pub(crate) role_item: Option<DictItem>,

    #[dict(skip)]
    pub(crate) created: Duration,
}

///
/// Status
///

#[derive(Clone, Copy, Debug, Default, Dict, Eq, PartialEq)]
pub(crate) enum Status {
    #[default]
    Active,
    Disabled,
}

///
/// ManualRecord
/// Hand-written record with an untyped coded field.
///

#[derive(Debug, Default)]
pub(crate) struct ManualRecord {
    pub(crate) code: String,
    pub(crate) item: Option<DictItem>,
}

static MANUAL_MODEL: RecordModel = RecordModel {
    type_name: "ManualRecord",
    fields: &[
        FieldModel::code("code", DictId::new("")),
        FieldModel::item("code_item"),
    ],
};

impl DictRecord for ManualRecord {
    fn model(&self) -> &'static RecordModel {
        &MANUAL_MODEL
    }

    fn read_code(&self, field: &str) -> Result<Option<String>, DictError> {
        match field {
            "code" => Ok(crate::traits::DictCode::dict_code(&self.code)),
            _ => Err(DictError::unknown_field(
                MANUAL_MODEL.type_name,
                field,
                AccessAction::Read,
            )),
        }
    }

    fn read_item(&self, field: &str) -> Option<Option<&DictItem>> {
        (field == "code_item").then(|| self.item.as_ref())
    }

    fn write_item(&mut self, field: &str, item: DictItem) -> Result<(), DictError> {
        if field == "code_item" {
            self.item = Some(item);
            Ok(())
        } else {
            Err(DictError::unknown_field(
                MANUAL_MODEL.type_name,
                field,
                AccessAction::Write,
            ))
        }
    }
}

impl Visitable for ManualRecord {
    fn kind(&self) -> NodeKind {
        NodeKind::Record
    }

    fn drive(&self, visitor: &mut dyn VisitorCore) {
        visitor.visit_code(self, &MANUAL_MODEL.fields[0]);
    }

    fn drive_mut(&mut self, visitor: &mut dyn VisitorMutCore) {
        visitor.visit_code_mut(self, &MANUAL_MODEL.fields[0]);
    }
}

pub(crate) fn person(gender: &str, province: &str, city: &str) -> Person {
    Person {
        gender: gender.to_string(),
        address: Address {
            province: province.to_string(),
            city: city.to_string(),
            ..Address::default()
        },
        nickname: format!("{province}-{city}"),
        ..Person::default()
    }
}

pub(crate) fn fixture_items() -> Vec<DictItem> {
    vec![
        DictItem::new("1", "0", "gender", "男"),
        DictItem::new("2", "0", "gender", "女"),
        DictItem::new("0", "0", "gender", "未知"),
        DictItem::new("zhejiang", "0", "city", "浙江"),
        DictItem::new("anhui", "0", "city", "安徽"),
        DictItem::new("hangzhou", "zhejiang", "city", "杭州"),
        DictItem::new("yiwu", "zhejiang", "city", "义乌"),
        DictItem::new("hefei", "anhui", "city", "合肥"),
        DictItem::new("7", "0", "role", "管理员"),
        DictItem::new("8", "0", "role", "普通用户"),
    ]
}

pub(crate) fn fixture_table() -> DictTable {
    DictTable::new(fixture_items()).unwrap()
}

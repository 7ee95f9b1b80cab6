//! Per-field resolution: target naming, parent codes, lookup and write-back.

use crate::{
    config::DictConfig,
    error::DictError,
    item::dict_key,
    model::DictId,
    table::DictTable,
    traits::DictRecord,
};
use convert_case::{Case, Casing};
use std::fmt;
use tracing::debug;

///
/// SkipReason
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum SkipReason {
    /// The coded field holds no code.
    EmptyCode,

    /// The record has no item field with the derived name.
    NoTargetField,

    /// The item field is already set; caller values are never overwritten.
    TargetPopulated,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::EmptyCode => "empty code",
            Self::NoTargetField => "no target field",
            Self::TargetPopulated => "target already populated",
        };

        write!(f, "{label}")
    }
}

///
/// Resolution
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Resolution {
    Resolved { target: String, key: String },
    Skipped(SkipReason),
}

///
/// resolve_field
/// Resolve one coded field on `record` and write the entry into its item field.
///

pub fn resolve_field(
    record: &mut dyn DictRecord,
    field: &str,
    dict: &DictId,
    table: &DictTable,
    config: &DictConfig,
) -> Result<Resolution, DictError> {
    let type_name = record.model().type_name;

    // 1. code
    let Some(code) = record.read_code(field)? else {
        debug!(type_name, field, "dict skip: value is empty");
        return Ok(Resolution::Skipped(SkipReason::EmptyCode));
    };

    // 2. target
    let target = target_name(field, dict, config);

    // 3. + 4. target slot must exist and be empty
    match record.read_item(&target) {
        None => {
            debug!(type_name, field, item_field = %target, "dict skip: no target field");
            return Ok(Resolution::Skipped(SkipReason::NoTargetField));
        }
        Some(Some(_)) => {
            debug!(
                type_name,
                field,
                item_field = %target,
                "dict skip: target already populated"
            );
            return Ok(Resolution::Skipped(SkipReason::TargetPopulated));
        }
        Some(None) => {}
    }

    // 5. + 6. compose key and look it up
    let parent = parent_code(&*record, dict, config)?.unwrap_or_default();
    let key = dict_key(dict.kind, &parent, &code);

    let Some(item) = table.get_key(&key) else {
        return Err(DictError::MissingEntry {
            type_name,
            field: field.to_string(),
            path: String::new(),
            code,
            kind: dict.kind.to_string(),
            key,
        });
    };

    // 8. write back
    record.write_item(&target, item.clone())?;

    Ok(Resolution::Resolved { target, key })
}

///
/// target_name
///
/// Explicit `target` wins. Otherwise the name is cut at the first
/// occurrence (past position 0) of the snake-cased id suffix, and the
/// snake-cased item suffix is appended: `gender_id` -> `gender_item`.
///

#[must_use]
pub fn target_name(field: &str, dict: &DictId, config: &DictConfig) -> String {
    if let Some(target) = dict.target.map(str::trim).filter(|t| !t.is_empty()) {
        return target.to_string();
    }

    let mut base = field;
    if let Some(id_suffix) = snake_suffix(&config.dict_id_suffix)
        && let Some(index) = field.find(&id_suffix)
        && index > 0
    {
        base = &field[..index];
    }

    let item_suffix = snake_suffix(&config.dict_item_suffix).unwrap_or_default();

    format!("{base}{item_suffix}")
}

///
/// parent_code
///
/// Literal `parent` wins, then the value of `parent_field` read off the
/// enclosing record, then the configured default. A whitespace-only
/// literal still wins and is blanked by the key, as is an empty parent
/// field (`Ok(None)`).
///

pub fn parent_code(
    record: &dyn DictRecord,
    dict: &DictId,
    config: &DictConfig,
) -> Result<Option<String>, DictError> {
    if let Some(parent) = dict.parent.filter(|p| !p.is_empty()) {
        return Ok(Some(parent.to_string()));
    }

    match dict.parent_field.map(str::trim).filter(|p| !p.is_empty()) {
        Some(parent_field) => record.read_code(parent_field),
        None => Ok(Some(config.default_parent_id.clone())),
    }
}

// `Id` -> `_id`, `DictItem` -> `_dict_item`; blank suffixes yield `None`.
fn snake_suffix(suffix: &str) -> Option<String> {
    let suffix = suffix.trim().to_case(Case::Snake);
    let suffix = suffix.trim_start_matches('_');

    (!suffix.is_empty()).then(|| format!("_{suffix}"))
}

///
/// TESTS
///

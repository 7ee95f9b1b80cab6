use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

///
/// CONSTANTS
///

/// Parent code used when a coded field declares neither `parent` nor `parent_field`.
pub const DEFAULT_PARENT_ID: &str = "0";

/// Suffix stripped from a coded field name when deriving its item field.
pub const DICT_ID_SUFFIX: &str = "Id";

/// Suffix appended when deriving the item field for a coded field.
pub const DICT_ITEM_SUFFIX: &str = "Item";

/// Table name read by `DictConfig::from_toml_str` when present.
const TOML_TABLE: &str = "dict";

///
/// DictConfig
///
/// Naming and fallback rules for one injection pass.
/// Suffixes are written in the camel form (`Id`, `Item`) and applied to
/// snake_case field names as `_id` / `_item`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DictConfig {
    pub dict_id_suffix: String,
    pub dict_item_suffix: String,
    pub default_parent_id: String,
}

impl DictConfig {
    /// Load a config from TOML.
    ///
    /// Accepts either a `[dict]` table or a bare document; missing keys
    /// fall back to the defaults. Without `[dict]`, other tables belong to
    /// the host application and are ignored.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let mut document: toml::Table = toml::from_str(source)?;

        let config: Self = match document.remove(TOML_TABLE) {
            Some(table) => table.try_into()?,
            None => {
                let bare: toml::Table = document
                    .into_iter()
                    .filter(|(_, value)| !value.is_table())
                    .collect();

                toml::Value::Table(bare).try_into()?
            }
        };
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dict_item_suffix.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "dict_item_suffix",
                message: "must not be blank".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for DictConfig {
    fn default() -> Self {
        Self {
            dict_id_suffix: DICT_ID_SUFFIX.to_string(),
            dict_item_suffix: DICT_ITEM_SUFFIX.to_string(),
            default_parent_id: DEFAULT_PARENT_ID.to_string(),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = DictConfig::from_toml_str("").unwrap();

        assert_eq!(config, DictConfig::default());
    }

    #[test]
    fn dict_table_overrides_selected_keys() {
        let config = DictConfig::from_toml_str(
            r#"
            [server]
            port = 8080

            [dict]
            dict_id_suffix = "DictId"
            dict_item_suffix = "DictItem"
            "#,
        )
        .unwrap();

        assert_eq!(config.dict_id_suffix, "DictId");
        assert_eq!(config.dict_item_suffix, "DictItem");
        assert_eq!(config.default_parent_id, DEFAULT_PARENT_ID);
    }

    #[test]
    fn bare_document_is_accepted() {
        let config = DictConfig::from_toml_str(r#"default_parent_id = "root""#).unwrap();

        assert_eq!(config.default_parent_id, "root");
    }

    #[test]
    fn unrelated_tables_yield_defaults() {
        let config = DictConfig::from_toml_str(
            r#"
            [server]
            port = 8080

            [database]
            url = "postgres://localhost/app"
            "#,
        )
        .unwrap();

        assert_eq!(config, DictConfig::default());
    }

    #[test]
    fn bare_keys_next_to_app_tables_still_apply() {
        let config = DictConfig::from_toml_str(
            r#"
            dict_item_suffix = "Label"

            [server]
            port = 8080
            "#,
        )
        .unwrap();

        assert_eq!(config.dict_item_suffix, "Label");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = DictConfig::from_toml_str(r#"dict_suffix = "Id""#).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn blank_item_suffix_is_rejected() {
        let err = DictConfig::from_toml_str("[dict]\ndict_item_suffix = \"  \"").unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "dict_item_suffix",
                ..
            }
        ));
    }
}

use std::fmt;
use thiserror::Error as ThisError;

///
/// AccessAction
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AccessAction {
    Read,
    Write,
}

impl fmt::Display for AccessAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Read => "read",
            Self::Write => "write",
        };

        write!(f, "{label}")
    }
}

///
/// DictError
///
/// Fatal failure of an injection pass. Skips are never reported here;
/// they surface as `Resolution::Skipped` instead.
///

#[derive(Debug, ThisError)]
pub enum DictError {
    #[error("{type_name}.{field} {action} error at '{path}': {message}")]
    FieldAccess {
        type_name: &'static str,
        field: String,
        path: String,
        action: AccessAction,
        message: String,
    },

    #[error("{type_name}.{field} not found value at '{path}', code: {code}, type: {kind}")]
    MissingEntry {
        type_name: &'static str,
        field: String,
        path: String,
        code: String,
        kind: String,
        key: String,
    },

    #[error("duplicate dictionary key '{key}'")]
    DuplicateKey { key: String },

    #[error("set at '{path}' shrank from {before} to {after} elements after injection")]
    SetCollapse {
        path: String,
        before: usize,
        after: usize,
    },
}

impl DictError {
    /// Access failure for a field name the record does not expose.
    #[must_use]
    pub fn unknown_field(type_name: &'static str, field: &str, action: AccessAction) -> Self {
        let message = match action {
            AccessAction::Read => "no readable code field with this name",
            AccessAction::Write => "no writable item field with this name",
        };

        Self::FieldAccess {
            type_name,
            field: field.to_string(),
            path: String::new(),
            action,
            message: message.to_string(),
        }
    }

    /// Pin the error to the traversal path it was raised at.
    #[must_use]
    pub fn at(mut self, at: &str) -> Self {
        match &mut self {
            Self::FieldAccess { path, .. }
            | Self::MissingEntry { path, .. }
            | Self::SetCollapse { path, .. } => {
                at.clone_into(path);
            }
            Self::DuplicateKey { .. } => {}
        }

        self
    }

    /// Traversal path the error was raised at, if it has one.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::FieldAccess { path, .. }
            | Self::MissingEntry { path, .. }
            | Self::SetCollapse { path, .. } => Some(path.as_str()),
            Self::DuplicateKey { .. } => None,
        }
    }
}

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to parse dict config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid dict config field '{field}': {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

///
/// TESTS
///

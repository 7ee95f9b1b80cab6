//! Response post-processing: discover the type tags in a handler result,
//! fetch their rows in one batch, and inject them.

use dictauto_core::{
    config::DictConfig,
    discover,
    error::DictError,
    inject,
    item::DictItem,
    obs::InjectReport,
    table::DictTable,
    traits::Visitable,
};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;
use tracing::{debug, warn};

///
/// SourceError
///

/// Boxed cause carried by a [`SourceError`].
pub type SourceCause = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, ThisError)]
#[error("dictionary source failed: {message}")]
pub struct SourceError {
    pub message: String,

    #[source]
    pub cause: Option<SourceCause>,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Keep the underlying failure reachable through `Error::source`.
    pub fn with_source(message: impl Into<String>, cause: impl Into<SourceCause>) -> Self {
        Self {
            message: message.into(),
            cause: Some(cause.into()),
        }
    }
}

///
/// HandlerError
///

#[derive(Debug, ThisError)]
pub enum HandlerError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Dict(#[from] DictError),
}

///
/// DictSource
///
/// Supplies dictionary rows for a set of type tags. Called at most once
/// per handled result.
///

pub trait DictSource {
    fn list(&self, kinds: &BTreeSet<String>) -> Result<Vec<DictItem>, SourceError>;
}

// In-memory rows, filtered by tag.
impl DictSource for Vec<DictItem> {
    fn list(&self, kinds: &BTreeSet<String>) -> Result<Vec<DictItem>, SourceError> {
        Ok(self
            .iter()
            .filter(|item| kinds.contains(item.kind.trim()))
            .cloned()
            .collect())
    }
}

impl<S: DictSource + ?Sized> DictSource for &S {
    fn list(&self, kinds: &BTreeSet<String>) -> Result<Vec<DictItem>, SourceError> {
        (**self).list(kinds)
    }
}

///
/// DictHandler
///

#[derive(Debug)]
pub struct DictHandler<S> {
    source: S,
    config: DictConfig,
}

impl<S: DictSource> DictHandler<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, DictConfig::default())
    }

    pub const fn with_config(source: S, config: DictConfig) -> Self {
        Self { source, config }
    }

    #[must_use]
    pub const fn config(&self) -> &DictConfig {
        &self.config
    }

    /// Resolve every coded field in `result`. The source is not called
    /// when the result carries no coded fields.
    pub fn after_returning(&self, result: &mut dyn Visitable) -> Result<InjectReport, HandlerError> {
        let kinds = discover(result);
        if kinds.is_empty() {
            debug!("dict handler: no coded fields, skipping");
            return Ok(InjectReport::default());
        }

        let items = self.source.list(&kinds).inspect_err(|err| {
            warn!(error = %err, kinds = ?kinds, "dict handler: source failed");
        })?;
        debug!(kinds = ?kinds, rows = items.len(), "dict handler: rows fetched");

        let table = DictTable::new(items)?;
        for kind in kinds.iter().filter(|kind| !table.has_kind(kind)) {
            warn!(kind = %kind, "dict handler: source returned no rows for type tag");
        }

        let report = inject(result, &table, &self.config)?;

        Ok(report)
    }
}

///
/// TESTS
///

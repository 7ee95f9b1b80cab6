use crate::{
    config::DictConfig,
    error::DictError,
    model::FieldModel,
    obs::{FieldOutcome, InjectReport},
    resolve::resolve_field,
    table::DictTable,
    traits::{DictRecord, Visitable},
    visitor::{PathSegment, VisitPath, VisitorMutCore, perform_visit_mut},
};
use tracing::debug;

///
/// inject
/// Resolve every coded field under `root` against `table` and write the
/// entries into their item fields.
///
/// The first fatal error halts the pass. Fields written before it stay
/// written; nothing after it is visited.
///

pub fn inject(
    root: &mut dyn Visitable,
    table: &DictTable,
    config: &DictConfig,
) -> Result<InjectReport, DictError> {
    let mut visitor = InjectVisitor::new(table, config);
    perform_visit_mut(&mut visitor, root, PathSegment::Root);

    let report = visitor.finish()?;
    debug!(
        resolved = report.resolved(),
        skipped = report.skipped_total(),
        "dict inject finished"
    );

    Ok(report)
}

///
/// InjectVisitor
///

pub struct InjectVisitor<'a> {
    table: &'a DictTable,
    config: &'a DictConfig,
    path: VisitPath,
    report: InjectReport,
    fatal: Option<DictError>,
}

impl<'a> InjectVisitor<'a> {
    #[must_use]
    pub fn new(table: &'a DictTable, config: &'a DictConfig) -> Self {
        Self {
            table,
            config,
            path: VisitPath::default(),
            report: InjectReport::default(),
            fatal: None,
        }
    }

    pub fn finish(self) -> Result<InjectReport, DictError> {
        match self.fatal {
            Some(err) => Err(err),
            None => Ok(self.report),
        }
    }
}

impl VisitorMutCore for InjectVisitor<'_> {
    fn visit_code_mut(&mut self, record: &mut dyn DictRecord, field: &'static FieldModel) {
        if self.fatal.is_some() {
            return;
        }
        let Some(dict) = field.dict_id() else {
            return;
        };

        let path = self.path.join(field.name);
        match resolve_field(record, field.name, dict, self.table, self.config) {
            Ok(outcome) => self.report.record(FieldOutcome {
                path,
                type_name: record.model().type_name,
                field: field.name,
                outcome,
            }),
            Err(err) => self.fatal = Some(err.at(&path)),
        }
    }

    fn is_halted(&self) -> bool {
        self.fatal.is_some()
    }

    // caller elements were merged away; never let that pass silently
    fn set_collapsed(&mut self, before: usize, after: usize) {
        if self.fatal.is_none() {
            self.fatal = Some(DictError::SetCollapse {
                path: self.path.to_string(),
                before,
                after,
            });
        }
    }

    fn push(&mut self, seg: PathSegment) {
        self.path.push(seg);
    }

    fn pop(&mut self) {
        self.path.pop();
    }
}

///
/// TESTS
///

//! Observability: per-pass injection report.
//!
//! The report is an outcome record only. It never changes what the
//! resolver does, and dropping it is always safe.

use crate::resolve::{Resolution, SkipReason};
use serde::Serialize;
use std::collections::BTreeMap;

///
/// FieldOutcome
///
/// What happened to one coded field during a pass.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldOutcome {
    /// Rendered location from the root, e.g. `[1].address.city`.
    pub path: String,
    pub type_name: &'static str,
    pub field: &'static str,
    pub outcome: Resolution,
}

///
/// InjectReport
///

#[derive(Clone, Debug, Default)]
pub struct InjectReport {
    resolved: u64,
    skipped: BTreeMap<SkipReason, u64>,
    outcomes: Vec<FieldOutcome>,
}

impl InjectReport {
    pub fn record(&mut self, outcome: FieldOutcome) {
        match &outcome.outcome {
            Resolution::Resolved { .. } => self.resolved += 1,
            Resolution::Skipped(reason) => *self.skipped.entry(*reason).or_default() += 1,
        }

        self.outcomes.push(outcome);
    }

    /// Fields written during the pass.
    #[must_use]
    pub const fn resolved(&self) -> u64 {
        self.resolved
    }

    #[must_use]
    pub fn skipped(&self, reason: SkipReason) -> u64 {
        self.skipped.get(&reason).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn skipped_total(&self) -> u64 {
        self.skipped.values().sum()
    }

    /// Outcomes in visit order.
    #[must_use]
    pub fn outcomes(&self) -> &[FieldOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            resolved: self.resolved,
            skipped: self
                .skipped
                .iter()
                .map(|(reason, count)| (reason.to_string(), *count))
                .collect(),
        }
    }
}

///
/// ReportSummary
/// Counter snapshot suitable for logging or export.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ReportSummary {
    pub resolved: u64,
    pub skipped: BTreeMap<String, u64>,
}

///
/// TESTS
///

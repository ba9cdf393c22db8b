use super::case::Case;
use super::container::CaseContainer;
use crate::error::{LogError, LogResult};
use crate::schema::{parse_number, OptimizerSchema};
use crate::table::{LogTable, RejectedRow};
use serde::Serialize;
use std::str::FromStr;
use tracing::{debug, warn};

/// Iteration numbering in the optimizer log starts here.
pub const FIRST_ITERATION: u32 = 1;

/// Single-pass watermark fold over `(iteration, tentative best id)` rows.
///
/// The best id of an iteration is the one on its last row, so an id is held
/// as pending until the iteration key changes, then emitted. `finish` emits
/// the last row's id for the final, possibly incomplete, iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationFold {
    current_iteration: u32,
    pending_best: Option<String>,
    finalized: Vec<String>,
}

impl Default for IterationFold {
    fn default() -> Self {
        Self {
            current_iteration: FIRST_ITERATION,
            pending_best: None,
            finalized: Vec::new(),
        }
    }
}

impl IterationFold {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, iteration: u32, best_id: impl Into<String>) {
        if iteration != self.current_iteration {
            if let Some(done) = self.pending_best.take() {
                self.finalized.push(done);
            }
            self.current_iteration = iteration;
        }
        self.pending_best = Some(best_id.into());
    }

    pub fn current_iteration(&self) -> u32 {
        self.current_iteration
    }

    pub fn finish(mut self) -> Vec<String> {
        if let Some(last) = self.pending_best.take() {
            self.finalized.push(last);
        }
        self.finalized
    }
}

/// The optimizer's state as of the last optimizer-log row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizerStatus {
    pub iteration: u32,
    pub evaluated_cases: Option<u64>,
    pub queued_cases: Option<u64>,
    pub recently_evaluated_cases: Option<u64>,
    pub tentative_best_case_id: String,
    pub tentative_best_value: Option<f64>,
    pub step_length: Option<f64>,
}

fn optional_field<T: FromStr>(
    row: &[String],
    index: Option<usize>,
    field: &str,
) -> LogResult<Option<T>> {
    index.map(|i| parse_number(&row[i], field)).transpose()
}

impl OptimizerStatus {
    fn from_row(row: &[String], schema: &OptimizerSchema) -> LogResult<Self> {
        Ok(Self {
            iteration: parse_number(&row[schema.iteration], "Iteration")?,
            evaluated_cases: optional_field(row, schema.evaluated_cases, "EvaluatedCases")?,
            queued_cases: optional_field(row, schema.queued_cases, "QueuedCases")?,
            recently_evaluated_cases: optional_field(
                row,
                schema.recently_evaluated,
                "RecentlyEvaluatedCases",
            )?,
            tentative_best_case_id: row[schema.best_case_id].clone(),
            tentative_best_value: optional_field(
                row,
                schema.best_case_value,
                "TentativeBestCaseOFValue",
            )?,
            step_length: optional_field(row, schema.step_length, "StepLength")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OptimizerSummary {
    best_case_ids: Vec<String>,
    status: Option<OptimizerStatus>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    rejected: Vec<RejectedRow>,
}

impl OptimizerSummary {
    /// Rows with an unreadable number are skipped and listed in `rejected()`;
    /// they take no part in the fold.
    pub fn from_table(table: &LogTable) -> LogResult<Self> {
        let schema = OptimizerSchema::resolve(table)?;

        let mut rejected = table.rejected().to_vec();
        let mut fold = IterationFold::new();
        let mut status = None;
        for (number, row) in table.numbered_rows() {
            match OptimizerStatus::from_row(row, &schema) {
                Ok(row_status) => {
                    fold.push(row_status.iteration, row_status.tentative_best_case_id.as_str());
                    status = Some(row_status);
                }
                Err(e) => {
                    warn!("Skipping optimizer-log row {}: {}", number, e);
                    rejected.push(RejectedRow::new(number, &e));
                }
            }
        }
        rejected.sort_by_key(|r| r.row);

        let best_case_ids = fold.finish();
        debug!(
            "Optimizer log: {} rows, {} iterations",
            table.len(),
            best_case_ids.len()
        );

        Ok(Self {
            best_case_ids,
            status,
            rejected,
        })
    }

    /// Optimizer-log rows left out because they could not be read.
    pub fn rejected(&self) -> &[RejectedRow] {
        &self.rejected
    }

    /// One best-case identifier per iteration, in iteration order.
    pub fn best_case_ids(&self) -> &[String] {
        &self.best_case_ids
    }

    pub fn status(&self) -> Option<&OptimizerStatus> {
        self.status.as_ref()
    }

    pub fn iterations(&self) -> usize {
        self.best_case_ids.len()
    }

    /// Resolves the per-iteration ids against the container. Ids the
    /// container does not hold come back as `None`.
    pub fn best_cases<'a>(&self, container: &'a CaseContainer) -> Vec<Option<&'a Case>> {
        self.best_case_ids
            .iter()
            .map(|id| {
                let case = container.get(id);
                if case.is_none() {
                    warn!("Best case '{}' is not among the collected cases", id);
                }
                case
            })
            .collect()
    }

    /// Like [`best_cases`](Self::best_cases) but fails on the first id the
    /// container cannot resolve.
    pub fn require_best_cases<'a>(&self, container: &'a CaseContainer) -> LogResult<Vec<&'a Case>> {
        self.best_case_ids
            .iter()
            .map(|id| {
                container
                    .get(id)
                    .ok_or_else(|| LogError::UnknownCase(id.clone()))
            })
            .collect()
    }
}

//! Named-field row schemas for every log kind.
//!
//! Each schema is resolved once against a table's header. A column is found
//! by its header name first and by its default position otherwise; when both
//! exist and disagree the header wins and the drift is logged.

use crate::error::{LogError, LogResult};
use crate::table::LogTable;
use serde::Serialize;
use std::str::FromStr;
use strum_macros::{Display, EnumIter};
use tracing::warn;

/// Bumped whenever a column default below changes.
pub const SCHEMA_VERSION: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    PropertyNameMap,
    Cases,
    Simulation,
    Optimization,
    Runner,
}

impl LogKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::PropertyNameMap => "log_property_uuid_name_map.csv",
            Self::Cases => "log_cases.csv",
            Self::Simulation => "log_simulation.csv",
            Self::Optimization => "log_optimization.csv",
            Self::Runner => "log_runner.csv",
        }
    }

    /// The runner log is bookkeeping only; a run is analysable without it.
    pub fn is_required(&self) -> bool {
        !matches!(self, Self::Runner)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Zero-based index from the first field.
    Start(usize),
    /// One-based index from the last field (`End(1)` is the last field).
    End(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub header: &'static str,
    pub position: Position,
}

impl ColumnSpec {
    pub const fn at(header: &'static str, index: usize) -> Self {
        Self {
            header,
            position: Position::Start(index),
        }
    }

    pub const fn from_end(header: &'static str, offset: usize) -> Self {
        Self {
            header,
            position: Position::End(offset),
        }
    }

    fn positional(&self, width: usize) -> Option<usize> {
        match self.position {
            Position::Start(i) => (i < width).then_some(i),
            Position::End(n) if n > 0 => width.checked_sub(n),
            Position::End(_) => None,
        }
    }

    pub fn resolve_optional(&self, table: &LogTable) -> Option<usize> {
        let by_name = table.column_index(self.header);
        let by_position = self.positional(table.headers().len());
        match (by_name, by_position) {
            (Some(n), Some(p)) if n != p => {
                warn!(
                    "Schema drift: column '{}' found at {} but expected at {}",
                    self.header, n, p
                );
                Some(n)
            }
            (Some(n), _) => Some(n),
            (None, p) => p,
        }
    }

    pub fn resolve(&self, table: &LogTable) -> LogResult<usize> {
        self.resolve_optional(table)
            .ok_or_else(|| LogError::MissingColumn(self.header.to_string()))
    }
}

pub(crate) fn parse_number<T: FromStr>(raw: &str, field: &str) -> LogResult<T> {
    raw.trim().parse().map_err(|_| LogError::InvalidNumber {
        field: field.to_string(),
        raw: raw.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameMapSchema {
    pub id: usize,
    pub name: usize,
}

impl NameMapSchema {
    pub const ID: ColumnSpec = ColumnSpec::at("UUID", 0);
    pub const NAME: ColumnSpec = ColumnSpec::at("name", 1);

    pub fn resolve(table: &LogTable) -> LogResult<Self> {
        Ok(Self {
            id: Self::ID.resolve(table)?,
            name: Self::NAME.resolve(table)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseSchema {
    pub timestamp: usize,
    pub case_id: usize,
    pub evaluated: usize,
    pub objective: usize,
    /// First field of the trailing `(identifier, value)` pairs.
    pub variables_start: usize,
}

impl CaseSchema {
    pub const TIMESTAMP: ColumnSpec = ColumnSpec::at("TimeStamp", 0);
    pub const CASE_ID: ColumnSpec = ColumnSpec::at("CaseID", 1);
    pub const EVALUATED: ColumnSpec = ColumnSpec::at("Evaluated", 2);
    pub const OBJECTIVE: ColumnSpec = ColumnSpec::at("ObjFunVal", 3);

    pub fn resolve(table: &LogTable) -> LogResult<Self> {
        let timestamp = Self::TIMESTAMP.resolve(table)?;
        let case_id = Self::CASE_ID.resolve(table)?;
        let evaluated = Self::EVALUATED.resolve(table)?;
        let objective = Self::OBJECTIVE.resolve(table)?;
        let variables_start = [timestamp, case_id, evaluated, objective]
            .into_iter()
            .max()
            .unwrap_or(0)
            + 1;
        Ok(Self {
            timestamp,
            case_id,
            evaluated,
            objective,
            variables_start,
        })
    }
}

impl Default for CaseSchema {
    fn default() -> Self {
        Self {
            timestamp: 0,
            case_id: 1,
            evaluated: 2,
            objective: 3,
            variables_start: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizerSchema {
    pub iteration: usize,
    pub best_case_id: usize,
    pub evaluated_cases: Option<usize>,
    pub queued_cases: Option<usize>,
    pub recently_evaluated: Option<usize>,
    pub best_case_value: Option<usize>,
    pub step_length: Option<usize>,
}

impl OptimizerSchema {
    pub const ITERATION: ColumnSpec = ColumnSpec::at("Iteration", 1);
    pub const EVALUATED_CASES: ColumnSpec = ColumnSpec::at("EvaluatedCases", 2);
    pub const QUEUED_CASES: ColumnSpec = ColumnSpec::at("QueuedCases", 3);
    pub const RECENTLY_EVALUATED: ColumnSpec = ColumnSpec::at("RecentlyEvaluatedCases", 4);
    pub const BEST_CASE_ID: ColumnSpec = ColumnSpec::at("TentativeBestCaseID", 5);
    pub const BEST_CASE_VALUE: ColumnSpec = ColumnSpec::at("TentativeBestCaseOFValue", 6);
    pub const STEP_LENGTH: ColumnSpec = ColumnSpec::at("StepLength", 7);

    pub fn resolve(table: &LogTable) -> LogResult<Self> {
        Ok(Self {
            iteration: Self::ITERATION.resolve(table)?,
            best_case_id: Self::BEST_CASE_ID.resolve(table)?,
            evaluated_cases: Self::EVALUATED_CASES.resolve_optional(table),
            queued_cases: Self::QUEUED_CASES.resolve_optional(table),
            recently_evaluated: Self::RECENTLY_EVALUATED.resolve_optional(table),
            best_case_value: Self::BEST_CASE_VALUE.resolve_optional(table),
            step_length: Self::STEP_LENGTH.resolve_optional(table),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationSchema {
    pub duration: usize,
    pub case_id: usize,
}

impl SimulationSchema {
    pub const DURATION: ColumnSpec = ColumnSpec::from_end("Duration", 2);
    pub const CASE_ID: ColumnSpec = ColumnSpec::from_end("CaseID", 1);

    pub fn resolve(table: &LogTable) -> LogResult<Self> {
        Ok(Self {
            duration: Self::DURATION.resolve(table)?,
            case_id: Self::CASE_ID.resolve(table)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerSchema {
    pub elapsed_secs: usize,
    pub total_cases: usize,
    pub simulated_cases: usize,
    pub bookkept_cases: usize,
    pub invalid_cases: usize,
    pub timed_out_simulations: usize,
}

impl RunnerSchema {
    pub const ELAPSED_SECS: ColumnSpec = ColumnSpec::at("ElapsedSecs", 0);
    pub const TOTAL_CASES: ColumnSpec = ColumnSpec::at("TotalCases", 1);
    pub const SIMULATED_CASES: ColumnSpec = ColumnSpec::at("SimulatedCases", 2);
    pub const BOOKKEPT_CASES: ColumnSpec = ColumnSpec::at("BookkeepedCases", 3);
    pub const INVALID_CASES: ColumnSpec = ColumnSpec::at("InvalidCases", 4);
    pub const TIMED_OUT: ColumnSpec = ColumnSpec::at("TimedOutSimulations", 5);

    pub fn resolve(table: &LogTable) -> LogResult<Self> {
        Ok(Self {
            elapsed_secs: Self::ELAPSED_SECS.resolve(table)?,
            total_cases: Self::TOTAL_CASES.resolve(table)?,
            simulated_cases: Self::SIMULATED_CASES.resolve(table)?,
            bookkept_cases: Self::BOOKKEPT_CASES.resolve(table)?,
            invalid_cases: Self::INVALID_CASES.resolve(table)?,
            timed_out_simulations: Self::TIMED_OUT.resolve(table)?,
        })
    }
}

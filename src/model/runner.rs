use crate::error::LogResult;
use crate::schema::{parse_number, RunnerSchema};
use crate::table::LogTable;
use serde::Serialize;
use tracing::warn;

/// Case bookkeeping counters from the final runner-log row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunnerStats {
    pub elapsed_secs: f64,
    pub total_cases: u64,
    pub simulated_cases: u64,
    pub bookkept_cases: u64,
    pub invalid_cases: u64,
    pub timed_out_simulations: u64,
}

impl RunnerStats {
    /// Counters of the last readable row; unreadable trailing rows are
    /// skipped. `None` when no row can be read.
    pub fn from_table(table: &LogTable) -> LogResult<Option<Self>> {
        let schema = RunnerSchema::resolve(table)?;
        let rows: Vec<_> = table.numbered_rows().collect();
        for (number, row) in rows.into_iter().rev() {
            match Self::from_row(row, &schema) {
                Ok(stats) => return Ok(Some(stats)),
                Err(e) => warn!("Skipping runner-log row {}: {}", number, e),
            }
        }
        Ok(None)
    }

    fn from_row(row: &[String], schema: &RunnerSchema) -> LogResult<Self> {
        let parse = |i: usize, field: &str| parse_number::<u64>(&row[i], field);
        Ok(Self {
            elapsed_secs: parse_number(&row[schema.elapsed_secs], "ElapsedSecs")?,
            total_cases: parse(schema.total_cases, "TotalCases")?,
            simulated_cases: parse(schema.simulated_cases, "SimulatedCases")?,
            bookkept_cases: parse(schema.bookkept_cases, "BookkeepedCases")?,
            invalid_cases: parse(schema.invalid_cases, "InvalidCases")?,
            timed_out_simulations: parse(schema.timed_out_simulations, "TimedOutSimulations")?,
        })
    }

    /// Share of non-invalid cases answered from bookkeeping, in percent.
    pub fn bookkept_percentage(&self) -> Option<f64> {
        let valid = self.total_cases.checked_sub(self.invalid_cases)?;
        (valid > 0).then(|| self.bookkept_cases as f64 / valid as f64 * 100.0)
    }
}

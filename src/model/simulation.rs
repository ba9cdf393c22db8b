use crate::error::LogResult;
use crate::schema::{parse_number, SimulationSchema};
use crate::table::{LogTable, RejectedRow};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationRecord {
    pub case_id: String,
    /// Wall-clock seconds.
    pub duration: i64,
}

/// Every simulator execution in log order. A case may appear more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationLedger {
    records: Vec<SimulationRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    rejected: Vec<RejectedRow>,
}

impl SimulationLedger {
    pub fn from_table(table: &LogTable) -> LogResult<Self> {
        let schema = SimulationSchema::resolve(table)?;
        let mut ledger = Self {
            records: Vec::with_capacity(table.len()),
            rejected: table.rejected().to_vec(),
        };
        for (number, row) in table.numbered_rows() {
            match parse_number(&row[schema.duration], "Duration") {
                Ok(duration) => ledger.records.push(SimulationRecord {
                    case_id: row[schema.case_id].clone(),
                    duration,
                }),
                Err(e) => {
                    warn!("Skipping simulation-log row {}: {}", number, e);
                    ledger.rejected.push(RejectedRow::new(number, &e));
                }
            }
        }
        ledger.rejected.sort_by_key(|r| r.row);
        Ok(ledger)
    }

    /// Simulation-log rows left out because they could not be read.
    pub fn rejected(&self) -> &[RejectedRow] {
        &self.rejected
    }

    pub fn records(&self) -> &[SimulationRecord] {
        &self.records
    }

    pub fn durations(&self) -> Vec<i64> {
        self.records.iter().map(|r| r.duration).collect()
    }

    pub fn case_ids(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.case_id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn for_case<'a>(&'a self, case_id: &'a str) -> impl Iterator<Item = &'a SimulationRecord> {
        self.records.iter().filter(move |r| r.case_id == case_id)
    }

    pub fn total_duration(&self) -> i64 {
        self.records.iter().map(|r| r.duration).sum()
    }

    pub fn shortest(&self) -> Option<&SimulationRecord> {
        self.records.iter().min_by_key(|r| r.duration)
    }

    pub fn longest(&self) -> Option<&SimulationRecord> {
        self.records.iter().max_by_key(|r| r.duration)
    }

    pub fn mean_duration(&self) -> Option<f64> {
        if self.records.is_empty() {
            return None;
        }
        Some(self.total_duration() as f64 / self.records.len() as f64)
    }
}

use crate::config::AnalysisConfig;
use crate::error::{LogError, LogResult};
use crate::model::{
    Case, CaseContainer, NameMap, OptimizerSummary, RunnerStats, SimulationLedger,
};
use crate::reader::{LogReader, RunLogs};
use crate::schema::{LogKind, SCHEMA_VERSION};
use crate::table::RejectedRow;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

/// The full model of one run, rebuilt from scratch on every load.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunAnalysis {
    pub schema_version: u16,
    #[serde(skip)]
    pub names: NameMap,
    pub cases: CaseContainer,
    pub optimizer: OptimizerSummary,
    pub simulations: SimulationLedger,
    pub runner: Option<RunnerStats>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected_rows: Vec<RejectedLogRow>,
}

/// A row skipped while reading one of the run's logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedLogRow {
    pub log: LogKind,
    #[serde(flatten)]
    pub rejected: RejectedRow,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationBest<'a> {
    /// 1-based position in the iteration summary.
    pub iteration: usize,
    pub case_id: &'a str,
    pub case: Option<&'a Case>,
}

impl RunAnalysis {
    pub fn load<P: AsRef<Path>>(output_dir: P, config: &AnalysisConfig) -> LogResult<Self> {
        let reader = LogReader::new(output_dir);
        info!("🚀 Analysing run in {}", reader.output_dir().display());
        let logs = reader.read_all(config.runner_stats)?;
        Self::build(&logs, config)
    }

    pub fn build(logs: &RunLogs, config: &AnalysisConfig) -> LogResult<Self> {
        let names = NameMap::from_table(&logs.property_name_map)?;
        let cases = CaseContainer::from_table(&logs.cases, &names, config.inclusion)?;
        let optimizer = OptimizerSummary::from_table(&logs.optimization)?;
        let simulations = SimulationLedger::from_table(&logs.simulation)?;
        let runner = match &logs.runner {
            Some(table) => RunnerStats::from_table(table)?,
            None => None,
        };

        let tagged = |log: LogKind, rows: &[RejectedRow]| {
            rows.iter()
                .map(move |r| RejectedLogRow {
                    log,
                    rejected: r.clone(),
                })
                .collect::<Vec<_>>()
        };
        let mut rejected_rows = tagged(LogKind::PropertyNameMap, logs.property_name_map.rejected());
        rejected_rows.extend(tagged(LogKind::Cases, cases.rejected()));
        rejected_rows.extend(tagged(LogKind::Simulation, simulations.rejected()));
        rejected_rows.extend(tagged(LogKind::Optimization, optimizer.rejected()));
        if let Some(table) = &logs.runner {
            rejected_rows.extend(tagged(LogKind::Runner, table.rejected()));
        }

        if let Some(first) = rejected_rows.first() {
            if config.strict_rows {
                return Err(LogError::RejectedRow {
                    log: first.log.file_name().to_string(),
                    row: first.rejected.row,
                    reason: first.rejected.reason.clone(),
                });
            }
            warn!("⚠️  Skipped {} unreadable log rows", rejected_rows.len());
        }

        if config.require_best_cases {
            optimizer.require_best_cases(&cases)?;
        }

        info!(
            "Built {} cases, {} iterations, {} simulations",
            cases.len(),
            optimizer.iterations(),
            simulations.len()
        );

        Ok(Self {
            schema_version: SCHEMA_VERSION,
            names,
            cases,
            optimizer,
            simulations,
            runner,
            rejected_rows,
        })
    }

    pub fn best_per_iteration(&self) -> Vec<IterationBest<'_>> {
        self.optimizer
            .best_case_ids()
            .iter()
            .zip(self.optimizer.best_cases(&self.cases))
            .enumerate()
            .map(|(i, (id, case))| IterationBest {
                iteration: i + 1,
                case_id: id.as_str(),
                case,
            })
            .collect()
    }

    /// The best case of the last iteration, falling back to the best
    /// objective among all collected cases.
    pub fn final_best(&self) -> Option<&Case> {
        self.optimizer
            .best_case_ids()
            .last()
            .and_then(|id| self.cases.get(id))
            .or_else(|| self.cases.best())
    }
}

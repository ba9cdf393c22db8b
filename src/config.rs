use crate::error::{LogError, LogResult};
use crate::model::InclusionPolicy;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Which case-log rows become cases: strict or lenient.
    #[arg(global = true, long, default_value_t = InclusionPolicy::Strict)]
    pub inclusion: InclusionPolicy,

    /// Fail when a per-iteration best case is not among the collected cases.
    #[arg(global = true, long, default_value_t = false)]
    pub require_best_cases: bool,

    /// Abort on the first unreadable row instead of skipping it.
    #[arg(global = true, long, default_value_t = false)]
    pub strict_rows: bool,

    /// Read log_runner.csv when the run directory has one.
    #[arg(global = true, long, default_value_t = true, action = clap::ArgAction::Set)]
    pub runner_stats: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            inclusion: InclusionPolicy::Strict,
            require_best_cases: false,
            strict_rows: false,
            runner_stats: true,
        }
    }
}

impl AnalysisConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LogResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LogError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overlays only the values explicitly given on the command line.
    pub fn merge_from_cli(&mut self, cli: &AnalysisConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(inclusion, "inclusion");
        update_if_present!(require_best_cases, "require_best_cases");
        update_if_present!(strict_rows, "strict_rows");
        update_if_present!(runner_stats, "runner_stats");
    }
}

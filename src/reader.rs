use crate::error::LogResult;
use crate::schema::LogKind;
use crate::table::LogTable;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use tracing::{info, warn};

/// Every log table of one run, read to completion.
#[derive(Debug, Clone, Default)]
pub struct RunLogs {
    pub property_name_map: LogTable,
    pub cases: LogTable,
    pub simulation: LogTable,
    pub optimization: LogTable,
    pub runner: Option<LogTable>,
}

impl RunLogs {
    fn insert(&mut self, kind: LogKind, table: LogTable) {
        match kind {
            LogKind::PropertyNameMap => self.property_name_map = table,
            LogKind::Cases => self.cases = table,
            LogKind::Simulation => self.simulation = table,
            LogKind::Optimization => self.optimization = table,
            LogKind::Runner => self.runner = Some(table),
        }
    }
}

/// Locates the logs under a run's output directory.
#[derive(Debug, Clone)]
pub struct LogReader {
    output_dir: PathBuf,
}

impl LogReader {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn path(&self, kind: LogKind) -> PathBuf {
        self.output_dir.join(kind.file_name())
    }

    pub fn read(&self, kind: LogKind) -> LogResult<LogTable> {
        let table = LogTable::from_path(self.path(kind))?;
        info!("📂 Loaded {} ({} rows)", kind.file_name(), table.len());
        Ok(table)
    }

    /// Optional logs that are absent come back as `None`.
    pub fn read_optional(&self, kind: LogKind) -> LogResult<Option<LogTable>> {
        if !self.path(kind).exists() {
            warn!("⚠️  {} not found. Skipping.", kind.file_name());
            return Ok(None);
        }
        self.read(kind).map(Some)
    }

    /// Reads every required log, and the optional ones when
    /// `include_optional` is set. A missing required log is an error.
    pub fn read_all(&self, include_optional: bool) -> LogResult<RunLogs> {
        let mut logs = RunLogs::default();
        for kind in LogKind::iter() {
            let table = if kind.is_required() {
                Some(self.read(kind)?)
            } else if include_optional {
                self.read_optional(kind)?
            } else {
                None
            };
            if let Some(table) = table {
                logs.insert(kind, table);
            }
        }
        Ok(logs)
    }
}

use crate::error::{LogError, LogResult};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// A data row that was left out, with its 1-based data row number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    pub row: usize,
    pub reason: String,
}

impl RejectedRow {
    pub fn new(row: usize, err: &LogError) -> Self {
        let reason = match err.root() {
            LogError::MalformedRow { reason, .. } => reason.clone(),
            e => e.to_string(),
        };
        Self { row, reason }
    }
}

/// One delimited log file: a header row followed by data rows of equal width.
///
/// Rows whose width differs from the header are kept out of `rows()` and
/// listed in `rejected()`. Surviving rows keep their original row numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    row_numbers: Vec<usize>,
    rejected: Vec<RejectedRow>,
}

impl LogTable {
    pub fn from_path<P: AsRef<Path>>(path: P) -> LogResult<Self> {
        let path = path.as_ref();
        debug!("Reading log: {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(file).map_err(|e| match e {
            LogError::EmptyLog(_) => LogError::EmptyLog(path.display().to_string()),
            e => e,
        })
    }

    /// Reads every record to completion. Records with fewer than two fields
    /// are dropped as blank before the header is taken.
    pub fn from_reader<R: Read>(reader: R) -> LogResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        let mut skipped = 0;
        for result in rdr.records() {
            let rec = result?;
            if rec.len() < 2 {
                skipped += 1;
                continue;
            }
            records.push(rec.iter().map(str::to_string).collect::<Vec<_>>());
        }

        if skipped > 0 {
            debug!("Dropped {} blank or single-field records", skipped);
        }

        let mut records = records.into_iter();
        let headers = records
            .next()
            .ok_or_else(|| LogError::EmptyLog("<reader>".to_string()))?;

        let mut table = Self {
            headers,
            ..Self::default()
        };
        for (i, row) in records.enumerate() {
            let number = i + 1;
            if row.len() != table.headers.len() {
                let err = LogError::MalformedRow {
                    row: number,
                    reason: format!(
                        "expected {} fields to match the header, found {}",
                        table.headers.len(),
                        row.len()
                    ),
                };
                warn!("Skipping {}", err);
                table.rejected.push(RejectedRow::new(number, &err));
                continue;
            }
            table.rows.push(row);
            table.row_numbers.push(number);
        }

        Ok(table)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Rows paired with their 1-based data row numbers.
    pub fn numbered_rows(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.row_numbers
            .iter()
            .copied()
            .zip(self.rows.iter().map(Vec::as_slice))
    }

    pub fn rejected(&self) -> &[RejectedRow] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    pub fn column(&self, index: usize) -> Option<Vec<&str>> {
        if index >= self.headers.len() {
            return None;
        }
        Some(self.rows.iter().map(|r| r[index].as_str()).collect())
    }

    pub fn column_by_name(&self, header: &str) -> LogResult<Vec<&str>> {
        self.column_index(header)
            .and_then(|i| self.column(i))
            .ok_or_else(|| LogError::MissingColumn(header.to_string()))
    }
}

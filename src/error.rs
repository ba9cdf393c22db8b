use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Log '{0}' contains no header row")]
    EmptyLog(String),

    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("Column '{0}' not found")]
    MissingColumn(String),

    #[error("Identifier '{0}' is not in the property name map")]
    UnresolvedIdentifier(String),

    #[error("Invalid number in {field}: '{raw}'")]
    InvalidNumber { field: String, raw: String },

    #[error("Invalid timestamp: '{0}'")]
    InvalidTimestamp(String),

    #[error("Case '{0}' not found")]
    UnknownCase(String),

    #[error("Duplicate case identifier '{0}'")]
    DuplicateCase(String),

    #[error("{log}: row {row} rejected: {reason}")]
    RejectedRow {
        log: String,
        row: usize,
        reason: String,
    },

    #[error("Row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: Box<LogError>,
    },
}

impl LogError {
    /// Attaches a 1-based data row index to a per-row failure.
    pub fn at_row(self, row: usize) -> Self {
        match self {
            // Already carries its own row context.
            e @ (LogError::Row { .. } | LogError::MalformedRow { .. }) => e,
            e => LogError::Row {
                row,
                source: Box::new(e),
            },
        }
    }

    /// The innermost error, looking through row context.
    pub fn root(&self) -> &LogError {
        match self {
            LogError::Row { source, .. } => source.root(),
            e => e,
        }
    }
}

pub type LogResult<T> = Result<T, LogError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input table is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },
}

impl IngestError {
    /// Shorthand for the malformed-record case.
    pub fn malformed(line: u64, reason: impl Into<String>) -> Self {
        IngestError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}

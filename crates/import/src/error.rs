use thiserror::Error;

/// Failures that abort a whole transform. Malformed individual cells are
/// not errors: amounts clean to zero and absent descriptions normalize to
/// the empty string, so one bad row never sinks the batch.
#[derive(Error, Debug)]
pub enum ImportError {
    /// A required logical field is absent from the header row.
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

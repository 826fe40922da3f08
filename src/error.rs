use thiserror::Error;

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, MlpError>;

#[derive(Debug, Error)]
pub enum MlpError {
    /// A vector or matrix did not match the width the topology expects.
    #[error("dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Returns `DimensionMismatch` unless `actual == expected`.
pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(MlpError::DimensionMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

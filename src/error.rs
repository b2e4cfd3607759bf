use thiserror::Error;

/// Terminal validation failures for an analysis request. Neither variant is
/// retried internally: both are deterministic functions of the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("submitted input is empty or whitespace-only")]
    InvalidInput,

    #[error("URL could not be parsed: {0}")]
    UnparseableUrl(String),
}

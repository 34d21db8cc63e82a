use crate::scope::ScopeKind;
use thiserror::Error;

/// Failure raised by a fact source. During availability probing this is
/// recovered locally as "unavailable"; during a full fetch it is surfaced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("warehouse I/O error: {0}")]
    Io(String),

    #[error("malformed warehouse row: {0}")]
    Parse(String),
}

impl From<csv::Error> for SourceError {
    fn from(e: csv::Error) -> Self {
        SourceError::Io(e.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScopeResolutionError {
    #[error("a selection is required for grouping '{0}'")]
    MissingSelection(ScopeKind),

    #[error("'{selection}' was not found in the {kind} reference table")]
    UnitNotFound { kind: ScopeKind, selection: String },
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Scope(#[from] ScopeResolutionError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("missing reporting parameter '{parameter}' for axis '{axis}'")]
    MissingParameter { axis: String, parameter: String },

    #[error("invalid reporting parameter '{parameter}': {value}")]
    InvalidParameter { parameter: String, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

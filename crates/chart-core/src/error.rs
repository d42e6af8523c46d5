// File: crates/chart-core/src/error.rs
// Summary: Error taxonomy for record validation and host-surface rendering.

use thiserror::Error;

/// Input records that cannot be turned into a comparable survey timestamp.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("record {index} is not an object")]
    NotAnObject { index: usize },
    #[error("record {index} has no `survey` value")]
    MissingSurvey { index: usize },
    #[error("record {index} has a non-comparable `survey` value: {value}")]
    InvalidSurvey { index: usize, value: String },
    #[error("records are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures against the host document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("mount point '#{0}' does not exist")]
    MountPointNotFound(String),
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

use thiserror::Error;

/// Failures surfaced by the data layer.
///
/// `Load` is fatal at startup; the other two are per-request and leave the
/// dataset untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    #[error("Failed to load dataset: {0}")]
    Load(String),
    #[error("Country not found: {0}")]
    NotFound(String),
    #[error("Unknown column: {0}")]
    InvalidColumn(String),
}

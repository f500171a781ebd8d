//! Error types for panel editor operations.

use thiserror::Error;

/// Result type for panel editor operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in panel editor operations.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Operation referenced a panel that is not in the store.
    #[error("Panel not found: {0}")]
    PanelNotFound(String),

    /// The canvas container has not been measured (not mounted yet).
    #[error("Canvas container bounds are unavailable")]
    MeasurementUnavailable,

    /// An imported layout document could not be parsed.
    #[error("Error importing configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Canvas dimensions outside the accepted range.
    #[error("Canvas dimensions rejected: {width}x{height} (minimum {min}x{min})")]
    ValidationRejected {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
        /// Minimum accepted value for either dimension.
        min: f64,
    },

    /// A layout document could not be produced.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid editor operation.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

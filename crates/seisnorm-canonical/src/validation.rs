use thiserror::Error;

use crate::report::ValidationReport;

/// Validation errors for canonical primitives and assembled catalogs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// A catalog validator rejected the catalog.
    #[error("catalog rejected with {} diagnostic(s)", .0.diagnostics.len())]
    Rejected(ValidationReport),
}

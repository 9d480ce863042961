use serde::{Deserialize, Serialize};
use std::fmt;

use crate::validation::ValidationError;

/// Outcome of validating a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationStatus {
    /// The catalog satisfied every check.
    Pass,
    /// At least one check failed.
    Fail,
}

/// One failed check, located by a dotted path into the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Path of the offending field (e.g. `events[0].picks[2].onset`).
    pub path: String,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Pass/fail plus diagnostics returned by a catalog validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Overall status.
    pub status: ValidationStatus,
    /// Failed checks, in traversal order.
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    /// Builds a report whose status follows from the diagnostics.
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        let status = if diagnostics.is_empty() {
            ValidationStatus::Pass
        } else {
            ValidationStatus::Fail
        };
        Self {
            status,
            diagnostics,
        }
    }

    /// True when the catalog passed.
    pub fn passed(&self) -> bool {
        self.status == ValidationStatus::Pass
    }

    /// Turns a failing report into [`ValidationError::Rejected`].
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.passed() {
            Ok(())
        } else {
            Err(ValidationError::Rejected(self))
        }
    }
}

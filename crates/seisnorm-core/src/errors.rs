use thiserror::Error;

use crate::source_type::SourceType;

/// Errors that abort the conversion of a record.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The record name matches no known source-type pattern.
    #[error("record name '{record_name}' matches no known source type")]
    Classification {
        /// Name that failed classification.
        record_name: String,
    },
    /// The record violates the expected document structure.
    #[error("malformed record: {0}")]
    Structure(#[from] StructureViolation),
    /// Horizontal uncertainty is missing for a source that must report it.
    #[error("{source_type} origin lacks {missing} uncertainty")]
    UncertaintyMissing {
        /// Source type of the record.
        source_type: SourceType,
        /// Which uncertainty is missing.
        missing: &'static str,
    },
    /// A pick carries a phase delay, which the catalog format cannot express.
    #[error("pick {sequence} has phase delay '{value}', which is not supported")]
    PhaseDelayUnsupported {
        /// Document position (1-based) of the pick.
        sequence: usize,
        /// Raw phase delay.
        value: String,
    },
    /// No strategy could find a network code for a station.
    #[error("no network code found for station '{station}'")]
    NetworkResolution {
        /// Station code after normalization.
        station: String,
    },
}

/// Structural problems in a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureViolation {
    /// The record has zero or several origin subtrees.
    #[error("expected exactly one origin, found {found}")]
    OriginCount {
        /// Number of origin subtrees found.
        found: usize,
    },
    /// A required element or attribute is absent.
    #[error("{entity} {sequence} is missing {field}")]
    MissingField {
        /// Element kind (e.g. `pick`).
        entity: &'static str,
        /// Document position (1-based).
        sequence: usize,
        /// Missing element or attribute.
        field: &'static str,
    },
    /// The record's event id cannot be used in resource identifiers.
    #[error("event id '{value}' is not a valid public identifier")]
    InvalidEventId {
        /// Raw event id.
        value: String,
    },
    /// Station magnitudes exist but no magnitude survived to own their contributions.
    #[error("{count} station magnitude(s) but no magnitude to attach contributions to")]
    ContributionsWithoutMagnitude {
        /// Number of station magnitudes.
        count: usize,
    },
}

//! Canonical catalog model for converted seismic bulletin records.
//!
//! These types mirror the catalog exchange format consumed downstream: a
//! catalog holding a single event with its origin, magnitudes, picks,
//! station magnitudes and focal mechanisms. Every entity is named by a
//! [`ResourceId`] built from the fixed `root/entity-type/public-id/sequence`
//! template.
//!
#![deny(missing_docs)]

/// Catalog, event and sub-entity types.
pub mod catalog;
/// Validation report types emitted by catalog validators.
pub mod report;
/// Resource identifiers and the identifier namespace.
pub mod identifiers;
/// Value + uncertainty quantities.
pub mod quantities;
/// Deterministic catalog serialization.
pub mod serializer;
/// Validation errors used by canonical types.
pub mod validation;
/// Catalog validator boundary and the structural validator.
pub mod validator;

pub use catalog::{
    Arrival, Catalog, Comment, CreationInfo, Event, ExtraValue, Extras, FocalMechanism,
    Magnitude, Namespace, NodalPlane, NodalPlanes, Origin, OriginQuality, OriginUncertainty,
    Pick, Polarity, StationMagnitude, StationMagnitudeContribution, WaveformStreamId,
};
pub use identifiers::{EntityKind, PublicId, ReferenceKind, ResourceId, RESOURCE_ROOT};
pub use quantities::{Quantity, QuantityErrors};
pub use report::{Diagnostic, ValidationReport, ValidationStatus};
pub use serializer::{CatalogSerializer, SerializationError};
pub use validation::ValidationError;
pub use validator::{CatalogValidator, StructuralValidator, ValidationMode};

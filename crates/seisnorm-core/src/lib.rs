//! Conversion of seismic bulletin records into canonical catalogs.
//!
//! This crate provides:
//! - A document query capability ([`RecordNode`]) and an implementation over JSON trees
//! - Value + uncertainty extraction from record elements
//! - Source-type classification of records by name
//! - Station → network resolution through an ordered strategy chain
//! - Per-entity builders and the [`CatalogAssembler`] that wires them together
//!
//! Core invariants:
//! - One record in, one single-event catalog out; no partial catalogs on failure
//! - The source type is an explicit per-call value, never shared state
//! - Arrivals pair with picks by document position
//!
#![deny(missing_docs)]

/// Catalog assembly in fixed dependency order.
pub mod assembler;
/// Per-entity builders.
pub mod builders;
/// Document query capability.
pub mod document;
/// Conversion error types.
pub mod errors;
/// Station → network resolution.
pub mod network;
/// Value + uncertainty extraction.
pub mod quantity;
/// Source-type classification and per-source policies.
pub mod source_type;

pub use assembler::{convert, is_bulletin_record, CatalogAssembler, ConversionOptions};
pub use document::{JsonNode, NodeValue, RecordNode};
pub use errors::{ConversionError, StructureViolation};
pub use network::{
    normalize_station, ExplicitNetwork, NetworkStationResolver, NetworkStrategy, SiblingPicks,
    SiblingWaveform, StaticTable, StationQuery,
};
pub use quantity::read_quantity;
pub use source_type::{HorizontalUncertaintyModel, SourceType};

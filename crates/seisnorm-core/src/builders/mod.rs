//! Builders turning one record subtree into one canonical entity.
//!
//! Builders are pure: they read through [`RecordNode`], consult the
//! [`BuildContext`] for the source type and identifier namespace, and return
//! fully formed values. Cross-references between entities are wired later by
//! the assembler.

use seisnorm_canonical::{ExtraValue, Namespace, PublicId, ReferenceKind, ResourceId};
use std::f64::consts::PI;

use crate::document::RecordNode;
use crate::network::{NetworkStationResolver, SiblingWaveform};
use crate::source_type::SourceType;

/// Arrival builder.
pub mod arrival;
/// Focal mechanism builder.
pub mod focal_mechanism;
/// Magnitude builder.
pub mod magnitude;
/// Origin builder.
pub mod origin;
/// Pick builder.
pub mod pick;
/// Station magnitude builder.
pub mod station_magnitude;

pub use arrival::build_arrival;
pub use focal_mechanism::build_focal_mechanism;
pub use magnitude::build_magnitude;
pub use origin::build_origin;
pub use pick::build_pick;
pub use station_magnitude::build_station_magnitude;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Per-record inputs shared by every builder call.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    /// Processing system that produced the record.
    pub source_type: SourceType,
    /// Record identifier used in resource identifiers.
    pub public_id: &'a PublicId,
    /// Network resolution chain.
    pub resolver: &'a NetworkStationResolver,
    /// Pick waveforms of the record, for sibling network lookups.
    pub siblings: &'a [SiblingWaveform],
}

/// Converts an epicentral distance from kilometers to degrees.
pub fn kilometers_to_degrees(km: f64) -> f64 {
    km / (2.0 * PI * EARTH_RADIUS_KM / 360.0)
}

/// Method/model reference from a `program`-like element.
///
/// Absent or literal `none` programs yield no reference.
pub(crate) fn method_reference<N: RecordNode>(
    node: &N,
    path: &str,
    kind: ReferenceKind,
) -> Option<ResourceId> {
    node.read::<String>(path)
        .filter(|program| !program.eq_ignore_ascii_case("none"))
        .map(|program| ResourceId::reference(kind, &program))
}

/// Extra annotation in the `edb` namespace.
pub(crate) fn edb_extra(value: impl Into<serde_json::Value>) -> ExtraValue {
    ExtraValue {
        value: value.into(),
        namespace: Namespace::edb(),
    }
}

use seisnorm_canonical::{EntityKind, Magnitude, Quantity, ReferenceKind, ResourceId};
use tracing::debug;

use super::{method_reference, BuildContext};
use crate::document::RecordNode;
use crate::quantity::read_quantity;

/// Builds a network magnitude. Magnitudes without a value are skipped.
pub fn build_magnitude<N: RecordNode>(
    node: &N,
    ctx: BuildContext<'_>,
    sequence: usize,
) -> Option<Magnitude> {
    let mut mag: Quantity<f64> = read_quantity(node, "mag");
    if mag.value.is_none() {
        debug!(sequence, "magnitude has no value, skipping");
        return None;
    }
    if ctx.source_type.magnitude_error_is_variance() {
        mag.errors.uncertainty = mag.errors.uncertainty.map(f64::sqrt);
    }

    Some(Magnitude {
        resource_id: ResourceId::entity(EntityKind::Magnitude, ctx.public_id, sequence),
        mag,
        magnitude_type: node.read("type"),
        station_count: node.read("stationCount"),
        method_id: method_reference(node, "program", ReferenceKind::MagnitudeMethod),
        station_magnitude_contributions: Vec::new(),
    })
}

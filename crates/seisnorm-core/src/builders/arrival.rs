use seisnorm_canonical::{Arrival, EntityKind, Quantity, ResourceId};

use super::{kilometers_to_degrees, BuildContext};
use crate::document::RecordNode;
use crate::quantity::read_quantity;

/// Builds the arrival stored in the same pick element.
///
/// `pick_id` is the identifier of the pick built from the same element.
/// Records carry no key tying an arrival to a pick, so the pairing is purely
/// positional and silently breaks if a producer reorders picks.
pub fn build_arrival<N: RecordNode>(
    node: &N,
    ctx: BuildContext<'_>,
    sequence: usize,
    pick_id: ResourceId,
) -> Arrival {
    let takeoff_angle: Quantity<f64> = read_quantity(node, "incident");

    Arrival {
        resource_id: ResourceId::entity(EntityKind::Arrival, ctx.public_id, sequence),
        pick_id,
        phase: node.read("phaseHint"),
        azimuth: node.read("azimuth/value"),
        distance: node.read("epi_dist/value").map(kilometers_to_degrees),
        takeoff_angle: takeoff_angle.value.filter(|angle| !angle.is_nan()),
        time_residual: node.read("phase_res/value"),
        time_weight: node.read("phase_weight/value"),
    }
}

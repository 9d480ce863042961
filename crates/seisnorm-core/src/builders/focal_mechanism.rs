use seisnorm_canonical::{
    Comment, EntityKind, FocalMechanism, NodalPlane, NodalPlanes, Quantity, QuantityErrors,
    ReferenceKind, ResourceId,
};
use tracing::debug;

use super::{method_reference, BuildContext};
use crate::document::RecordNode;
use crate::quantity::read_quantity;

/// Builds a focal mechanism from its first nodal plane.
///
/// Mechanisms without nodal-plane data are skipped. The triggering origin is
/// set by the assembler.
pub fn build_focal_mechanism<N: RecordNode>(
    node: &N,
    ctx: BuildContext<'_>,
    sequence: usize,
) -> Option<FocalMechanism> {
    let has_planes = node
        .first("nodalPlanes")
        .map(|planes| planes.has_children())
        .unwrap_or(false);
    if !has_planes {
        debug!(sequence, "focal mechanism has no nodal planes, skipping");
        return None;
    }

    let station_polarity_count = node.read::<i64>("stationPolarityCount");
    let error_count = node.read::<i64>("stationPolarityErrorCount");
    let misfit = match (station_polarity_count, error_count) {
        (Some(count), Some(errors)) if count != 0 => Some(errors as f64 / count as f64),
        _ => None,
    };

    let comments = node
        .read::<i64>("possibleSolutionCount")
        .filter(|count| *count != 0)
        .map(|count| Comment {
            text: format!("Possible Solution Count: {}", count),
        })
        .into_iter()
        .collect();

    Some(FocalMechanism {
        resource_id: ResourceId::entity(EntityKind::FocalMechanism, ctx.public_id, sequence),
        triggering_origin_id: None,
        method_id: method_reference(node, "program", ReferenceKind::FocalMechanismMethod),
        station_polarity_count,
        misfit,
        nodal_planes: NodalPlanes {
            nodal_plane_1: NodalPlane {
                strike: plane_angle(node, "nodalPlanes/nodalPlane1/strike"),
                dip: plane_angle(node, "nodalPlanes/nodalPlane1/dip"),
                rake: plane_angle(node, "nodalPlanes/nodalPlane1/rake"),
            },
        },
        comments,
    })
}

/// Nodal-plane angles keep only their symmetric uncertainty.
fn plane_angle<N: RecordNode>(node: &N, path: &str) -> Quantity<f64> {
    let angle: Quantity<f64> = read_quantity(node, path);
    Quantity {
        value: angle.value,
        errors: QuantityErrors {
            uncertainty: angle.errors.uncertainty,
            ..Default::default()
        },
    }
}

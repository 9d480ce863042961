use seisnorm_canonical::{EntityKind, ResourceId, StationMagnitude, WaveformStreamId};

use super::BuildContext;
use crate::document::RecordNode;
use crate::errors::{ConversionError, StructureViolation};
use crate::network::normalize_station;
use crate::quantity::read_quantity;

/// Builds a station magnitude. The origin reference is set by the assembler.
pub fn build_station_magnitude<N: RecordNode>(
    node: &N,
    ctx: BuildContext<'_>,
    sequence: usize,
) -> Result<StationMagnitude, ConversionError> {
    let raw_station = node
        .read::<String>("station")
        .ok_or(StructureViolation::MissingField {
            entity: "stationMagnitude",
            sequence,
            field: "station",
        })?;
    let station = normalize_station(&raw_station);

    let channels: Vec<String> = node
        .read::<String>("channels")
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    // A single channel code cannot name several channels.
    let channel_code = match channels.as_slice() {
        [single] => Some(single.clone()),
        _ => None,
    };

    let explicit_network = node.read::<String>("network");
    let network_code =
        ctx.resolver
            .resolve(&station, explicit_network.as_deref(), ctx.siblings)?;

    Ok(StationMagnitude {
        resource_id: ResourceId::entity(EntityKind::StationMagnitude, ctx.public_id, sequence),
        origin_id: None,
        mag: read_quantity(node, "mag"),
        waveform_id: WaveformStreamId {
            network_code,
            station_code: station,
            location_code: node.read("location").unwrap_or_default(),
            channel_code,
        },
    })
}

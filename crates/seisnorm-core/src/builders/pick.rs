use seisnorm_canonical::{EntityKind, Extras, Pick, Polarity, ResourceId, WaveformStreamId};
use tracing::{debug, warn};

use super::{edb_extra, BuildContext};
use crate::document::RecordNode;
use crate::errors::{ConversionError, StructureViolation};
use crate::network::normalize_station;
use crate::quantity::read_quantity;

/// Maps a source polarity onto the canonical vocabulary.
///
/// Unknown values are kept, lower-cased.
pub fn map_polarity(raw: &str) -> Polarity {
    let lower = raw.to_lowercase();
    match lower.as_str() {
        "up" | "positive" | "forward" | "forwards" | "right" | "poorup" => Polarity::Positive,
        "down" | "negative" | "backward" | "backwards" | "left" | "poordown" => {
            Polarity::Negative
        }
        "undecidable" => Polarity::Undecidable,
        _ => Polarity::Unrecognized(lower),
    }
}

/// Normalizes an onset: lower-cased, with the old `implusive` typo fixed.
pub fn normalize_onset(raw: &str) -> String {
    match raw.to_lowercase().as_str() {
        "implusive" => "impulsive".to_string(),
        other => other.to_string(),
    }
}

/// Builds a pick.
///
/// Returns `Ok(None)` for picks without a time, which are dropped.
pub fn build_pick<N: RecordNode>(
    node: &N,
    ctx: BuildContext<'_>,
    sequence: usize,
) -> Result<Option<Pick>, ConversionError> {
    if let Some(value) = node.read::<String>("phase_delay") {
        return Err(ConversionError::PhaseDelayUnsupported { sequence, value });
    }

    let missing = |field| StructureViolation::MissingField {
        entity: "pick",
        sequence,
        field,
    };
    let waveform = node.first("waveform").ok_or_else(|| missing("waveform"))?;
    let raw_station = waveform
        .attribute("stationCode")
        .ok_or_else(|| missing("waveform stationCode"))?;
    let station = normalize_station(&raw_station);
    let explicit_network = waveform.attribute("networkCode");
    let network_code =
        ctx.resolver
            .resolve(&station, explicit_network.as_deref(), ctx.siblings)?;

    let time = read_quantity(node, "time");
    if time.value.is_none() {
        match node.read::<String>("time/value") {
            Some(raw) => warn!(
                sequence,
                station = %station,
                time = %raw,
                "pick time is not a timestamp, dropping"
            ),
            None => debug!(sequence, station = %station, "pick has no time, dropping"),
        }
        return Ok(None);
    }

    let mut extra = Extras::new();
    if let Some(weight) = node.read::<i64>("weight") {
        extra.insert("weight".to_string(), edb_extra(weight));
    }

    Ok(Some(Pick {
        resource_id: ResourceId::entity(EntityKind::Pick, ctx.public_id, sequence),
        time,
        waveform_id: WaveformStreamId {
            network_code,
            station_code: station,
            location_code: waveform.attribute("locationCode").unwrap_or_default(),
            channel_code: waveform
                .attribute("channelCode")
                .filter(|channel| !channel.is_empty()),
        },
        phase_hint: node.read("phaseHint"),
        onset: node.read::<String>("onset").map(|onset| normalize_onset(&onset)),
        polarity: node.read::<String>("polarity").map(|raw| {
            let polarity = map_polarity(&raw);
            if !polarity.is_canonical() {
                warn!(sequence, polarity = %polarity, "unrecognized pick polarity kept as is");
            }
            polarity
        }),
        extra,
    }))
}

use seisnorm_canonical::{
    EntityKind, Extras, Origin, OriginQuality, OriginUncertainty, Quantity, ReferenceKind,
    ResourceId,
};
use tracing::debug;

use super::{edb_extra, kilometers_to_degrees, method_reference, BuildContext};
use crate::document::RecordNode;
use crate::errors::ConversionError;
use crate::quantity::read_quantity;
use crate::source_type::{HorizontalUncertaintyModel, SourceType};

/// Builds the origin of a record. Arrivals are attached by the assembler.
pub fn build_origin<N: RecordNode>(
    node: &N,
    ctx: BuildContext<'_>,
) -> Result<Origin, ConversionError> {
    let latitude: Quantity<f64> = read_quantity(node, "latitude");
    let longitude: Quantity<f64> = read_quantity(node, "longitude");
    let depth: Quantity<f64> = read_quantity(node, "depth");

    // Latitude/longitude errors are kilometers; they only feed the origin uncertainty.
    let origin_uncertainty = horizontal_uncertainty(
        ctx.source_type,
        latitude.errors.uncertainty,
        longitude.errors.uncertainty,
    )?;

    let depth = Quantity {
        value: depth.value.map(|d| d * ctx.source_type.depth_factor()),
        errors: depth.errors.scaled(1000.0),
    };

    let depth_type = node
        .read::<String>("depth_type")
        .map(|depth_type| match depth_type.as_str() {
            "from location program" => "from location".to_string(),
            _ => depth_type,
        });

    let earth_model_id = node
        .read::<String>("earth_mod")
        .map(|model| model.split_whitespace().collect::<Vec<_>>().join(","))
        .filter(|model| !model.is_empty())
        .map(|model| ResourceId::reference(ReferenceKind::EarthModel, &model));

    Ok(Origin {
        resource_id: ResourceId::entity(EntityKind::Origin, ctx.public_id, 1),
        time: read_quantity(node, "time"),
        latitude: Quantity {
            value: latitude.value,
            errors: Default::default(),
        },
        longitude: Quantity {
            value: longitude.value,
            errors: Default::default(),
        },
        depth,
        depth_type,
        method_id: method_reference(node, "program", ReferenceKind::LocationMethod),
        earth_model_id,
        quality: node.first("originQuality").map(|q| build_quality(&q)),
        origin_uncertainty,
        arrivals: Vec::new(),
    })
}

/// Picks the origin uncertainty form for a source.
///
/// Missing errors are fatal unless the source is allowed to omit them.
fn horizontal_uncertainty(
    source_type: SourceType,
    latitude_error: Option<f64>,
    longitude_error: Option<f64>,
) -> Result<Option<OriginUncertainty>, ConversionError> {
    let (lat, lon) = match (latitude_error, longitude_error) {
        (Some(lat), Some(lon)) => (lat, lon),
        (lat, lon) => {
            if source_type.tolerates_missing_horizontal_uncertainty() {
                debug!(%source_type, "origin has no horizontal uncertainty");
                return Ok(None);
            }
            let missing = match (lat, lon) {
                (None, None) => "latitude and longitude",
                (None, _) => "latitude",
                _ => "longitude",
            };
            return Err(ConversionError::UncertaintyMissing {
                source_type,
                missing,
            });
        }
    };

    let uncertainty = match source_type.horizontal_uncertainty_model() {
        HorizontalUncertaintyModel::Ellipse => {
            let (min, max) = if lon <= lat { (lon, lat) } else { (lat, lon) };
            Some(OriginUncertainty::Ellipse {
                min_horizontal_uncertainty: min * 1000.0,
                max_horizontal_uncertainty: max * 1000.0,
                azimuth_max_horizontal_uncertainty: if lat > lon { 0.0 } else { 90.0 },
            })
        }
        HorizontalUncertaintyModel::Scalar => Some(OriginUncertainty::Horizontal {
            horizontal_uncertainty: lat * 1000.0,
        }),
        HorizontalUncertaintyModel::NotReported => None,
    };
    Ok(uncertainty)
}

fn build_quality<N: RecordNode>(node: &N) -> OriginQuality {
    let mut extra = Extras::new();

    // Some sources count P and S phases separately.
    let p_count = node.read::<i64>("P_usedPhaseCount");
    let s_count = node.read::<i64>("S_usedPhaseCount");
    let used_phase_count = match (p_count, s_count) {
        (Some(p), Some(s)) => {
            extra.insert("P_usedPhaseCount".to_string(), edb_extra(p));
            extra.insert("S_usedPhaseCount".to_string(), edb_extra(s));
            Some(p + s)
        }
        _ => node.read::<i64>("usedPhaseCount"),
    };

    OriginQuality {
        associated_phase_count: node.read("associatedPhaseCount"),
        used_phase_count,
        associated_station_count: node.read("associatedStationCount"),
        used_station_count: node.read("usedStationCount"),
        depth_phase_count: node.read("depthPhaseCount"),
        standard_error: node.read::<f64>("standardError").filter(|v| !v.is_nan()),
        azimuthal_gap: node.read("azimuthalGap"),
        secondary_azimuthal_gap: node.read("secondaryAzimuthalGap"),
        ground_truth_level: node.read("groundTruthLevel"),
        minimum_distance: node.read("minimumDistance").map(kilometers_to_degrees),
        maximum_distance: node.read("maximumDistance").map(kilometers_to_degrees),
        median_distance: node
            .read("medianDistance")
            .map(kilometers_to_degrees)
            .filter(|v| !v.is_nan()),
        extra,
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::identifiers::ResourceId;
use crate::quantities::Quantity;

/// XML-style namespace for values outside the canonical schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    /// Namespace prefix (e.g. `edb`).
    pub prefix: String,
    /// Namespace URI.
    pub uri: String,
}

impl Namespace {
    /// Namespace of the Bavarian earthquake service extensions.
    pub fn edb() -> Self {
        Self {
            prefix: "edb".to_string(),
            uri: "http://erdbeben-in-bayern.de/xmlns/0.1".to_string(),
        }
    }
}

/// A namespaced extra annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraValue {
    /// Annotation value.
    pub value: serde_json::Value,
    /// Namespace the annotation belongs to.
    pub namespace: Namespace,
}

/// Extra annotations keyed by element name.
pub type Extras = BTreeMap<String, ExtraValue>;

/// Free-text comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment text.
    pub text: String,
}

/// Provenance of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreationInfo {
    /// Author (analyst user or processing system).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Publishing agency.
    pub agency_id: String,
    /// Publishing agency URI.
    pub agency_uri: ResourceId,
    /// Conversion time, when the caller supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
}

/// Station/channel identity of a waveform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveformStreamId {
    /// Network code.
    pub network_code: String,
    /// Station code.
    pub station_code: String,
    /// Location code (may be empty).
    pub location_code: String,
    /// Channel code; unset when the source named several channels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_code: Option<String>,
}

/// First-motion polarity of a pick.
///
/// Values outside the canonical vocabulary are kept verbatim so a strict
/// validator can report them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Polarity {
    /// Upward first motion.
    Positive,
    /// Downward first motion.
    Negative,
    /// First motion could not be determined.
    Undecidable,
    /// Any other (non-canonical) value.
    Unrecognized(String),
}

impl Polarity {
    /// Canonical string form.
    pub fn as_str(&self) -> &str {
        match self {
            Polarity::Positive => "positive",
            Polarity::Negative => "negative",
            Polarity::Undecidable => "undecidable",
            Polarity::Unrecognized(other) => other,
        }
    }

    /// True for the three canonical polarities.
    pub fn is_canonical(&self) -> bool {
        !matches!(self, Polarity::Unrecognized(_))
    }
}

impl From<String> for Polarity {
    fn from(value: String) -> Self {
        match value.as_str() {
            "positive" => Polarity::Positive,
            "negative" => Polarity::Negative,
            "undecidable" => Polarity::Undecidable,
            _ => Polarity::Unrecognized(value),
        }
    }
}

impl From<Polarity> for String {
    fn from(value: Polarity) -> Self {
        match value {
            Polarity::Unrecognized(other) => other,
            canonical => canonical.as_str().to_string(),
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Horizontal location uncertainty of an origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "preferred_description")]
pub enum OriginUncertainty {
    /// Ellipse aligned with north (azimuth 0) or east (azimuth 90).
    #[serde(rename = "uncertainty ellipse")]
    Ellipse {
        /// Semi-minor axis in meters.
        min_horizontal_uncertainty: f64,
        /// Semi-major axis in meters.
        max_horizontal_uncertainty: f64,
        /// Azimuth of the major axis in degrees.
        azimuth_max_horizontal_uncertainty: f64,
    },
    /// Single circular radius.
    #[serde(rename = "horizontal uncertainty")]
    Horizontal {
        /// Radius in meters.
        horizontal_uncertainty: f64,
    },
}

/// Quality metrics of an origin. Distances are in degrees.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OriginQuality {
    /// Number of associated phases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_phase_count: Option<i64>,
    /// Number of phases used in the solution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_phase_count: Option<i64>,
    /// Number of associated stations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_station_count: Option<i64>,
    /// Number of stations used in the solution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_station_count: Option<i64>,
    /// Number of depth phases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth_phase_count: Option<i64>,
    /// RMS of the travel-time residuals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_error: Option<f64>,
    /// Largest azimuthal gap in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azimuthal_gap: Option<f64>,
    /// Secondary azimuthal gap in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_azimuthal_gap: Option<f64>,
    /// Ground truth level tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ground_truth_level: Option<String>,
    /// Epicentral distance of the closest station.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_distance: Option<f64>,
    /// Epicentral distance of the farthest station.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_distance: Option<f64>,
    /// Median epicentral distance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median_distance: Option<f64>,
    /// Namespaced annotations (e.g. separate P/S phase counts).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: Extras,
}

/// Association of a pick with an origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrival {
    /// Arrival identifier.
    pub resource_id: ResourceId,
    /// Identifier of the associated pick.
    pub pick_id: ResourceId,
    /// Phase name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    /// Source-to-station azimuth in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azimuth: Option<f64>,
    /// Epicentral distance in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Takeoff angle in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub takeoff_angle: Option<f64>,
    /// Travel-time residual in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_residual: Option<f64>,
    /// Weight of the arrival time in the solution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_weight: Option<f64>,
}

/// Hypocenter solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    /// Origin identifier.
    pub resource_id: ResourceId,
    /// Origin time.
    pub time: Quantity<DateTime<Utc>>,
    /// Latitude in degrees.
    pub latitude: Quantity<f64>,
    /// Longitude in degrees.
    pub longitude: Quantity<f64>,
    /// Depth in meters.
    pub depth: Quantity<f64>,
    /// How the depth was determined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth_type: Option<String>,
    /// Location method reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_id: Option<ResourceId>,
    /// Earth model reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earth_model_id: Option<ResourceId>,
    /// Quality metrics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<OriginQuality>,
    /// Horizontal uncertainty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_uncertainty: Option<OriginUncertainty>,
    /// Associated arrivals, in pick order.
    pub arrivals: Vec<Arrival>,
}

/// Link between a network magnitude and one station magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationMagnitudeContribution {
    /// Identifier of the contributing station magnitude.
    pub station_magnitude_id: ResourceId,
    /// Weight of the contribution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// Network magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Magnitude {
    /// Magnitude identifier.
    pub resource_id: ResourceId,
    /// Magnitude value and errors.
    pub mag: Quantity<f64>,
    /// Magnitude type (e.g. `Ml`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnitude_type: Option<String>,
    /// Number of stations used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_count: Option<i64>,
    /// Magnitude method reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_id: Option<ResourceId>,
    /// Contributing station magnitudes.
    pub station_magnitude_contributions: Vec<StationMagnitudeContribution>,
}

/// Single-station magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationMagnitude {
    /// Station magnitude identifier.
    pub resource_id: ResourceId,
    /// Origin the magnitude refers to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_id: Option<ResourceId>,
    /// Magnitude value and errors.
    pub mag: Quantity<f64>,
    /// Station (and channel, when unambiguous).
    pub waveform_id: WaveformStreamId,
}

/// Phase pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pick {
    /// Pick identifier.
    pub resource_id: ResourceId,
    /// Pick time.
    pub time: Quantity<DateTime<Utc>>,
    /// Picked waveform.
    pub waveform_id: WaveformStreamId,
    /// Phase hint (e.g. `P`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_hint: Option<String>,
    /// Onset, lower-cased.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onset: Option<String>,
    /// First-motion polarity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polarity: Option<Polarity>,
    /// Namespaced annotations (e.g. pick weight).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: Extras,
}

/// Nodal plane orientation in degrees.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodalPlane {
    /// Strike.
    pub strike: Quantity<f64>,
    /// Dip.
    pub dip: Quantity<f64>,
    /// Rake.
    pub rake: Quantity<f64>,
}

/// Nodal planes of a mechanism. Only the first plane is carried.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodalPlanes {
    /// First nodal plane.
    pub nodal_plane_1: NodalPlane,
}

/// Fault-plane solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocalMechanism {
    /// Focal mechanism identifier.
    pub resource_id: ResourceId,
    /// Origin that triggered the solution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggering_origin_id: Option<ResourceId>,
    /// Method reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_id: Option<ResourceId>,
    /// Number of station polarities used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_polarity_count: Option<i64>,
    /// Fraction of misfitting polarities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub misfit: Option<f64>,
    /// Nodal planes.
    pub nodal_planes: NodalPlanes,
    /// Comments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

/// A seismic event with everything derived from one bulletin record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event identifier.
    pub resource_id: ResourceId,
    /// Event type (e.g. `earthquake`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    /// Provenance.
    pub creation_info: CreationInfo,
    /// Origins (exactly one for converted records).
    pub origins: Vec<Origin>,
    /// Network magnitudes.
    pub magnitudes: Vec<Magnitude>,
    /// Station magnitudes.
    pub station_magnitudes: Vec<StationMagnitude>,
    /// Picks.
    pub picks: Vec<Pick>,
    /// Focal mechanisms.
    pub focal_mechanisms: Vec<FocalMechanism>,
    /// Namespaced annotations (`public`, `evaluationMode`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: Extras,
}

/// Catalog container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Catalog identifier.
    pub resource_id: ResourceId,
    /// Events (exactly one for converted records).
    pub events: Vec<Event>,
}

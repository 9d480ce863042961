use std::collections::HashSet;
use std::fmt;

use crate::catalog::{Catalog, Event, Origin, Pick, WaveformStreamId};
use crate::identifiers::ResourceId;
use crate::report::{Diagnostic, ValidationReport};

const ONSETS: &[&str] = &["impulsive", "emergent", "questionable"];
const DEPTH_TYPES: &[&str] = &[
    "from location",
    "from moment tensor inversion",
    "from modeling of broad-band P waveforms",
    "constrained by depth phases",
    "constrained by direct phases",
    "constrained by depth and direct phases",
    "operator assigned",
    "other",
];

/// How thorough a validator should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Structure, references, identifier syntax, value ranges and vocabularies.
    #[default]
    Strict,
    /// Structure and reference resolution only.
    Relaxed,
}

/// Boundary to a catalog serializer/validator.
pub trait CatalogValidator {
    /// Checks a catalog and reports pass/fail with diagnostics.
    fn validate(&self, catalog: &Catalog) -> ValidationReport;
}

/// Helper for building catalog paths in diagnostics.
#[derive(Debug, Clone)]
struct Path {
    segments: Vec<String>,
}

impl Path {
    fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    fn push_field(&self, field: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(field.to_string());
        Self { segments }
    }

    fn push_index(&self, field: &str, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(format!("{}[{}]", field, index));
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "catalog")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}

/// Validator for the single-event catalogs produced by conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator {
    mode: ValidationMode,
}

impl StructuralValidator {
    /// Creates a validator running in `mode`.
    pub fn new(mode: ValidationMode) -> Self {
        Self { mode }
    }

    fn strict(&self) -> bool {
        self.mode == ValidationMode::Strict
    }

    fn check_id(&self, id: &ResourceId, path: Path, out: &mut Vec<Diagnostic>) {
        if self.strict() && !id.is_conformant() {
            out.push(diag(path, format!("'{}' is not a valid resource identifier", id)));
        }
    }

    fn check_event(&self, event: &Event, path: Path, out: &mut Vec<Diagnostic>) {
        self.check_id(&event.resource_id, path.push_field("resource_id"), out);

        if event.origins.len() != 1 {
            out.push(diag(
                path.push_field("origins"),
                format!("expected exactly one origin, found {}", event.origins.len()),
            ));
        }
        for (idx, origin) in event.origins.iter().enumerate() {
            self.check_origin(origin, event, path.push_index("origins", idx), out);
        }

        let station_magnitude_ids: HashSet<&ResourceId> = event
            .station_magnitudes
            .iter()
            .map(|sm| &sm.resource_id)
            .collect();
        for (idx, magnitude) in event.magnitudes.iter().enumerate() {
            let mag_path = path.push_index("magnitudes", idx);
            self.check_id(&magnitude.resource_id, mag_path.push_field("resource_id"), out);
            if magnitude.mag.value.is_none() {
                out.push(diag(mag_path.push_field("mag"), "magnitude has no value"));
            }
            for (c_idx, contribution) in magnitude.station_magnitude_contributions.iter().enumerate()
            {
                if !station_magnitude_ids.contains(&contribution.station_magnitude_id) {
                    out.push(diag(
                        mag_path
                            .push_index("station_magnitude_contributions", c_idx)
                            .push_field("station_magnitude_id"),
                        format!(
                            "'{}' does not name a station magnitude",
                            contribution.station_magnitude_id
                        ),
                    ));
                }
            }
        }

        for (idx, station_magnitude) in event.station_magnitudes.iter().enumerate() {
            let sm_path = path.push_index("station_magnitudes", idx);
            self.check_id(&station_magnitude.resource_id, sm_path.push_field("resource_id"), out);
            self.check_waveform(&station_magnitude.waveform_id, sm_path.push_field("waveform_id"), out);
        }

        for (idx, pick) in event.picks.iter().enumerate() {
            self.check_pick(pick, path.push_index("picks", idx), out);
        }

        for (idx, focmec) in event.focal_mechanisms.iter().enumerate() {
            let fm_path = path.push_index("focal_mechanisms", idx);
            self.check_id(&focmec.resource_id, fm_path.push_field("resource_id"), out);
            if self.strict() {
                if let Some(misfit) = focmec.misfit {
                    if !(0.0..=1.0).contains(&misfit) {
                        out.push(diag(
                            fm_path.push_field("misfit"),
                            format!("misfit {} is outside [0, 1]", misfit),
                        ));
                    }
                }
            }
        }
    }

    fn check_origin(&self, origin: &Origin, event: &Event, path: Path, out: &mut Vec<Diagnostic>) {
        self.check_id(&origin.resource_id, path.push_field("resource_id"), out);
        if origin.time.value.is_none() {
            out.push(diag(path.push_field("time"), "origin has no time"));
        }

        if self.strict() {
            check_range(origin.latitude.value, -90.0, 90.0, path.push_field("latitude"), out);
            check_range(origin.longitude.value, -180.0, 180.0, path.push_field("longitude"), out);
            if let Some(depth) = origin.depth.value {
                if !depth.is_finite() {
                    out.push(diag(path.push_field("depth"), "depth is not finite"));
                }
            }
            if let Some(depth_type) = &origin.depth_type {
                if !DEPTH_TYPES.contains(&depth_type.as_str()) {
                    out.push(diag(
                        path.push_field("depth_type"),
                        format!("'{}' is not a known depth type", depth_type),
                    ));
                }
            }
            for (field, id) in [
                ("method_id", origin.method_id.as_ref()),
                ("earth_model_id", origin.earth_model_id.as_ref()),
            ] {
                if let Some(id) = id {
                    self.check_id(id, path.push_field(field), out);
                }
            }
        }

        let pick_ids: HashSet<&ResourceId> = event.picks.iter().map(|p| &p.resource_id).collect();
        for (idx, arrival) in origin.arrivals.iter().enumerate() {
            let arrival_path = path.push_index("arrivals", idx);
            self.check_id(&arrival.resource_id, arrival_path.push_field("resource_id"), out);
            if !pick_ids.contains(&arrival.pick_id) {
                out.push(diag(
                    arrival_path.push_field("pick_id"),
                    format!("'{}' does not name a pick", arrival.pick_id),
                ));
            }
        }
    }

    fn check_pick(&self, pick: &Pick, path: Path, out: &mut Vec<Diagnostic>) {
        self.check_id(&pick.resource_id, path.push_field("resource_id"), out);
        if pick.time.value.is_none() {
            out.push(diag(path.push_field("time"), "pick has no time"));
        }
        self.check_waveform(&pick.waveform_id, path.push_field("waveform_id"), out);
        if !self.strict() {
            return;
        }
        if let Some(onset) = &pick.onset {
            if !ONSETS.contains(&onset.as_str()) {
                out.push(diag(
                    path.push_field("onset"),
                    format!("'{}' is not a known onset", onset),
                ));
            }
        }
        if let Some(polarity) = &pick.polarity {
            if !polarity.is_canonical() {
                out.push(diag(
                    path.push_field("polarity"),
                    format!("'{}' is not a known polarity", polarity),
                ));
            }
        }
    }

    fn check_waveform(&self, waveform: &WaveformStreamId, path: Path, out: &mut Vec<Diagnostic>) {
        if waveform.station_code.is_empty() {
            out.push(diag(path.push_field("station_code"), "station code is empty"));
        }
        if self.strict() && waveform.network_code.is_empty() {
            out.push(diag(path.push_field("network_code"), "network code is empty"));
        }
    }
}

impl CatalogValidator for StructuralValidator {
    fn validate(&self, catalog: &Catalog) -> ValidationReport {
        let root = Path::root();
        let mut diagnostics = Vec::new();

        self.check_id(&catalog.resource_id, root.push_field("resource_id"), &mut diagnostics);
        if catalog.events.len() != 1 {
            diagnostics.push(diag(
                root.push_field("events"),
                format!("expected exactly one event, found {}", catalog.events.len()),
            ));
        }
        for (idx, event) in catalog.events.iter().enumerate() {
            self.check_event(event, root.push_index("events", idx), &mut diagnostics);
        }

        ValidationReport::from_diagnostics(diagnostics)
    }
}

fn check_range(value: Option<f64>, min: f64, max: f64, path: Path, out: &mut Vec<Diagnostic>) {
    if let Some(v) = value {
        if !(min..=max).contains(&v) {
            out.push(diag(path, format!("{} is outside [{}, {}]", v, min, max)));
        }
    }
}

fn diag(path: Path, message: impl Into<String>) -> Diagnostic {
    Diagnostic {
        path: path.to_string(),
        message: message.into(),
    }
}

//! Catalog assembly.
//!
//! Builders run in a fixed order and every builder output is complete before
//! cross-references are wired:
//!
//! 1. classify the record by name
//! 2. origin (exactly one), magnitudes, picks, arrivals
//! 3. station magnitudes, their origin reference and one contribution each
//!    on the first magnitude
//! 4. focal mechanisms and their triggering origin
//!
//! Any builder failure aborts the whole record.

use chrono::{DateTime, Utc};
use seisnorm_canonical::{
    Catalog, CreationInfo, EntityKind, Event, Extras, PublicId, ResourceId,
    StationMagnitudeContribution,
};
use tracing::{debug, debug_span};

use crate::builders::{
    build_arrival, build_focal_mechanism, build_magnitude, build_origin, build_pick,
    build_station_magnitude, edb_extra, BuildContext,
};
use crate::document::RecordNode;
use crate::errors::{ConversionError, StructureViolation};
use crate::network::{NetworkStationResolver, SiblingWaveform};
use crate::source_type::SourceType;

const AGENCY_ID: &str = "Erdbebendienst Bayern";

/// Per-call conversion settings.
#[derive(Debug, Clone, Default)]
pub struct ConversionOptions {
    /// Creation time stamped on the event. The converter never reads the clock.
    pub creation_time: Option<DateTime<Utc>>,
}

/// Converts bulletin records into single-event catalogs.
#[derive(Debug, Default)]
pub struct CatalogAssembler {
    options: ConversionOptions,
    resolver: NetworkStationResolver,
}

/// Converts one record with default options and network resolution.
pub fn convert<N: RecordNode>(record_name: &str, record: &N) -> Result<Catalog, ConversionError> {
    CatalogAssembler::default().convert(record_name, record)
}

impl CatalogAssembler {
    /// Creates an assembler with the default network resolution chain.
    pub fn new(options: ConversionOptions) -> Self {
        Self {
            options,
            resolver: NetworkStationResolver::default(),
        }
    }

    /// Replaces the network resolution chain.
    pub fn with_resolver(mut self, resolver: NetworkStationResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Converts one record named `record_name`.
    pub fn convert<N: RecordNode>(
        &self,
        record_name: &str,
        record: &N,
    ) -> Result<Catalog, ConversionError> {
        let _span = debug_span!("convert", record = record_name).entered();

        let source_type = SourceType::classify(record_name)?;
        let public_id = read_public_id(record)?;
        debug!(%source_type, public_id = %public_id, "classified record");

        let siblings = SiblingWaveform::collect(record);
        let ctx = BuildContext {
            source_type,
            public_id: &public_id,
            resolver: &self.resolver,
            siblings: &siblings,
        };

        let mut event = self.build_event(record, ctx);

        let origin_nodes = record.select("origin");
        if origin_nodes.len() != 1 {
            return Err(StructureViolation::OriginCount {
                found: origin_nodes.len(),
            }
            .into());
        }
        let mut origin = build_origin(&origin_nodes[0], ctx)?;

        event.magnitudes = record
            .select("magnitude")
            .iter()
            .enumerate()
            .filter_map(|(idx, node)| build_magnitude(node, ctx, idx + 1))
            .collect();

        // Picks and arrivals share the element and its document position.
        let pick_nodes = record.select("pick");
        let mut retained = Vec::with_capacity(pick_nodes.len());
        for (idx, node) in pick_nodes.iter().enumerate() {
            if let Some(pick) = build_pick(node, ctx, idx + 1)? {
                retained.push((idx + 1, node, pick));
            }
        }
        for (sequence, node, pick) in retained {
            origin.arrivals.push(build_arrival(
                node,
                ctx,
                sequence,
                pick.resource_id.clone(),
            ));
            event.picks.push(pick);
        }

        let station_magnitude_nodes = record.select("stationMagnitude");
        for (idx, node) in station_magnitude_nodes.iter().enumerate() {
            let mut station_magnitude = build_station_magnitude(node, ctx, idx + 1)?;
            station_magnitude.origin_id = Some(origin.resource_id.clone());
            event.station_magnitudes.push(station_magnitude);
        }

        if !event.station_magnitudes.is_empty() {
            // Weights are read by position from the record's station magnitude list.
            let contributions = event
                .station_magnitudes
                .iter()
                .zip(&station_magnitude_nodes)
                .map(|(station_magnitude, node)| StationMagnitudeContribution {
                    station_magnitude_id: station_magnitude.resource_id.clone(),
                    weight: node.read("weight"),
                })
                .collect();
            let magnitude = event.magnitudes.first_mut().ok_or(
                StructureViolation::ContributionsWithoutMagnitude {
                    count: event.station_magnitudes.len(),
                },
            )?;
            magnitude.station_magnitude_contributions = contributions;
        }

        event.focal_mechanisms = record
            .select("focalMechanism")
            .iter()
            .enumerate()
            .filter_map(|(idx, node)| build_focal_mechanism(node, ctx, idx + 1))
            .map(|mut focmec| {
                focmec.triggering_origin_id = Some(origin.resource_id.clone());
                focmec
            })
            .collect();

        event.origins.push(origin);

        debug!(
            magnitudes = event.magnitudes.len(),
            picks = event.picks.len(),
            station_magnitudes = event.station_magnitudes.len(),
            focal_mechanisms = event.focal_mechanisms.len(),
            "assembled event"
        );

        Ok(Catalog {
            resource_id: ResourceId::entity(EntityKind::Catalog, &public_id, 1),
            events: vec![event],
        })
    }

    /// Event header: type, provenance and record-level annotations.
    fn build_event<N: RecordNode>(&self, record: &N, ctx: BuildContext<'_>) -> Event {
        let account = record.read::<String>("event_type/account");
        let user = record.read::<String>("event_type/user");
        let evaluation_mode = record.read::<String>("event_type/value");

        // Only `true`, `1` and `yes` (any case) mark an event public.
        let mut public = record
            .read::<String>("event_type/public")
            .map(|flag| matches!(flag.to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);
        if account
            .as_deref()
            .map_or(false, |account| !account.eq_ignore_ascii_case("sysop"))
        {
            public = false;
        }

        let event_type = record
            .read::<String>("type")
            .filter(|event_type| event_type != "null")
            .map(|event_type| match event_type.as_str() {
                "induced earthquake" => "induced or triggered event".to_string(),
                _ => event_type,
            });

        let mut extra = Extras::new();
        extra.insert("public".to_string(), edb_extra(public));
        if let Some(mode) = evaluation_mode {
            extra.insert("evaluationMode".to_string(), edb_extra(mode));
        }

        Event {
            resource_id: ResourceId::entity(EntityKind::Event, ctx.public_id, 1),
            event_type,
            creation_info: CreationInfo {
                author: ctx
                    .source_type
                    .system_author()
                    .map(str::to_string)
                    .or(user),
                agency_id: AGENCY_ID.to_string(),
                agency_uri: ResourceId::agency(),
                creation_time: self.options.creation_time,
            },
            origins: Vec::new(),
            magnitudes: Vec::new(),
            station_magnitudes: Vec::new(),
            picks: Vec::new(),
            focal_mechanisms: Vec::new(),
            extra,
        }
    }
}

/// True when a document looks like a bulletin record: it names both an
/// event id and an event-type value.
pub fn is_bulletin_record<N: RecordNode>(record: &N) -> bool {
    record.read::<String>("event_id/value").is_some()
        && record.read::<String>("event_type/value").is_some()
}

fn read_public_id<N: RecordNode>(record: &N) -> Result<PublicId, ConversionError> {
    let raw = record
        .read::<String>("event_id/value")
        .ok_or(StructureViolation::MissingField {
            entity: "event",
            sequence: 1,
            field: "event_id/value",
        })?;
    PublicId::parse(raw.as_str())
        .map_err(|_| StructureViolation::InvalidEventId { value: raw }.into())
}

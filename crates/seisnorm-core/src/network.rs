//! Station → network resolution.
//!
//! Station magnitudes never carry a network code and picks only sometimes
//! do. Resolution walks an ordered list of [`NetworkStrategy`] values and
//! takes the first answer:
//!
//! 1. [`ExplicitNetwork`]: the network written next to the station
//! 2. [`SiblingPicks`]: the network of a pick on the same station in the same record
//! 3. [`StaticTable`]: a fixed station → network table

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use crate::document::RecordNode;
use crate::errors::ConversionError;

/// Merged stations that were renamed.
static STATION_ALIASES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| HashMap::from([("MUN1", "UH2"), ("MUN2", "UH1")]));

/// Stations whose network is known without a SEED inventory.
static STATION_NETWORKS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // No inventory available for these.
        ("BERN", "XX"),
        ("VACK", "XX"),
        ("JIND", "XX"),
        ("LUBY", "XX"),
        ("POCA", "XX"),
        ("STAU", "BW"),
        ("SCE1", "BW"),
        ("GRC4", "GR"),
        ("GRC3", "GR"),
        ("GRB1", "GR"),
        ("GRB2", "GR"),
        ("GRB3", "GR"),
        ("GRB4", "GR"),
        ("GRB5", "GR"),
        ("SWM2", "BW"),
        ("LAC", "XX"),
        ("KOC", "XX"),
        ("ARSA", "OE"),
        ("OBKA", "OE"),
        ("MOX", "GR"),
        ("GRA1", "GR"),
        ("GRA3", "GR"),
        ("GRC2", "GR"),
        ("STO", "XX"),
        ("PUE", "XX"),
        ("P10", "XX"),
        ("P09", "XX"),
        ("NOT", "XX"),
        ("NAB", "XX"),
        ("MIT", "XX"),
        ("EIK", "XX"),
        ("BER", "XX"),
        ("HBR", "XX"),
        ("CHKA", "XX"),
        ("GRA4", "GR"),
        ("GRA2", "GR"),
        ("BCHKA", "XX"),
        ("TNS", "GR"),
        // Known mappings.
        ("ALTM", "BW"),
        ("BE1", "BW"),
        ("BE2", "BW"),
        ("BE3", "BW"),
        ("BE4", "BW"),
        ("BGLD", "BW"),
        ("BW01", "BW"),
        ("DHFO", "BW"),
        ("FURT", "BW"),
        ("HROE", "BW"),
        ("KW1", "BW"),
        ("KW2", "BW"),
        ("KW3", "BW"),
        ("KW4", "BW"),
        ("MANZ", "BW"),
        ("MASC", "BW"),
        ("MGBB", "BW"),
        ("MHAI", "BW"),
        ("MKON", "BW"),
        ("MROB", "BW"),
        ("MSBB", "BW"),
        ("MZEK", "BW"),
        ("NORI", "BW"),
        ("NZC2", "BW"),
        ("NZG0", "BW"),
        ("OBER", "BW"),
        ("OBHA", "BW"),
        ("PART", "BW"),
        ("RHAM", "BW"),
        ("RJOB", "BW"),
        ("RLAS", "BW"),
        ("RMOA", "BW"),
        ("RNHA", "BW"),
        ("RNON", "BW"),
        ("ROTZ", "BW"),
        ("RTAK", "BW"),
        ("RTBE", "BW"),
        ("RTBM", "BW"),
        ("RTEA", "BW"),
        ("RTFA", "BW"),
        ("RTFS", "BW"),
        ("RTKA", "BW"),
        ("RTLI", "BW"),
        ("RTPA", "BW"),
        ("RTPI", "BW"),
        ("RTSA", "BW"),
        ("RTSH", "BW"),
        ("RTSL", "BW"),
        ("RTSP", "BW"),
        ("RTSW", "BW"),
        ("RTVS", "BW"),
        ("RTZA", "BW"),
        ("RWMO", "BW"),
        ("SCE", "BW"),
        ("UH1", "BW"),
        ("UH2", "BW"),
        ("UH3", "BW"),
        ("UH4", "BW"),
        ("UHE", "BW"),
        ("UHK", "BW"),
        ("UHL", "BW"),
        ("VIEL", "BW"),
        ("WETR", "BW"),
        ("ZUGS", "BW"),
        ("NKC", "CZ"),
        ("FUR", "GR"),
        ("GEC2", "GR"),
        ("GRC1", "GR"),
        ("WET", "GR"),
        ("CRLZ", "NZ"),
        ("DAVA", "OE"),
        ("FETA", "OE"),
        ("KBA", "OE"),
        ("MOA", "OE"),
        ("MOTA", "OE"),
        ("RETA", "OE"),
        ("SQTA", "OE"),
        ("WATA", "OE"),
        ("WTTA", "OE"),
        ("WERN", "SX"),
    ])
});

/// Strips trailing `_` padding and applies the merged-station aliases.
pub fn normalize_station(raw: &str) -> String {
    let trimmed = raw.trim_end_matches('_');
    STATION_ALIASES
        .get(trimmed)
        .copied()
        .unwrap_or(trimmed)
        .to_string()
}

/// Station/network pair from a pick's waveform descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiblingWaveform {
    /// Station code as written in the record.
    pub station_code: String,
    /// Network code, when written.
    pub network_code: Option<String>,
}

impl SiblingWaveform {
    /// Collects the waveform descriptors of every pick in a record.
    pub fn collect<N: RecordNode>(record: &N) -> Vec<Self> {
        record
            .select("pick/waveform")
            .iter()
            .filter_map(|waveform| {
                Some(SiblingWaveform {
                    station_code: waveform.attribute("stationCode")?,
                    network_code: waveform.attribute("networkCode"),
                })
            })
            .collect()
    }
}

/// Inputs to one resolution.
#[derive(Debug, Clone, Copy)]
pub struct StationQuery<'a> {
    /// Normalized station code.
    pub station: &'a str,
    /// Network written next to the station, if any.
    pub explicit_network: Option<&'a str>,
    /// Pick waveforms of the same record.
    pub siblings: &'a [SiblingWaveform],
}

/// One way of finding a station's network.
pub trait NetworkStrategy: fmt::Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns the network, or `None` to defer to the next strategy.
    fn resolve(&self, query: &StationQuery<'_>) -> Option<String>;
}

/// Uses the network written next to the station. Empty strings count as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitNetwork;

impl NetworkStrategy for ExplicitNetwork {
    fn name(&self) -> &'static str {
        "explicit"
    }

    fn resolve(&self, query: &StationQuery<'_>) -> Option<String> {
        query
            .explicit_network
            .filter(|network| !network.is_empty())
            .map(str::to_string)
    }
}

/// Takes the network of the first pick on the same station that names one.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiblingPicks;

impl NetworkStrategy for SiblingPicks {
    fn name(&self) -> &'static str {
        "sibling-pick"
    }

    fn resolve(&self, query: &StationQuery<'_>) -> Option<String> {
        query
            .siblings
            .iter()
            .filter(|sibling| sibling.station_code == query.station)
            .find_map(|sibling| {
                sibling
                    .network_code
                    .as_deref()
                    .filter(|network| !network.is_empty())
                    .map(str::to_string)
            })
    }
}

/// Looks the station up in the built-in station → network table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticTable;

impl NetworkStrategy for StaticTable {
    fn name(&self) -> &'static str {
        "static-table"
    }

    fn resolve(&self, query: &StationQuery<'_>) -> Option<String> {
        STATION_NETWORKS
            .get(query.station)
            .map(|network| network.to_string())
    }
}

/// Ordered chain of network strategies.
#[derive(Debug)]
pub struct NetworkStationResolver {
    strategies: Vec<Box<dyn NetworkStrategy>>,
}

impl Default for NetworkStationResolver {
    fn default() -> Self {
        Self::new(vec![
            Box::new(ExplicitNetwork),
            Box::new(SiblingPicks),
            Box::new(StaticTable),
        ])
    }
}

impl NetworkStationResolver {
    /// Creates a resolver trying `strategies` in order.
    pub fn new(strategies: Vec<Box<dyn NetworkStrategy>>) -> Self {
        Self { strategies }
    }

    /// Resolves the network of an already normalized station.
    pub fn resolve(
        &self,
        station: &str,
        explicit_network: Option<&str>,
        siblings: &[SiblingWaveform],
    ) -> Result<String, ConversionError> {
        let query = StationQuery {
            station,
            explicit_network,
            siblings,
        };
        for strategy in &self.strategies {
            if let Some(network) = strategy.resolve(&query) {
                debug!(station, network = %network, strategy = strategy.name(), "resolved network");
                return Ok(network);
            }
        }
        Err(ConversionError::NetworkResolution {
            station: station.to_string(),
        })
    }
}

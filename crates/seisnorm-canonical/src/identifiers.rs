use crate::validation::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Organizational namespace every resource identifier lives under.
pub const RESOURCE_ROOT: &str = "smi:de.erdbeben-in-bayern";

static RESOURCE_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^smi:[^/\s]+(/[^/\s]+)+$").expect("invalid regex"));
static PUBLIC_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^/\s]+$").expect("invalid regex"));

macro_rules! newtype {
    ($name:ident, $doc:expr, $pattern:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new instance without validation; callers are responsible for conformity.
            pub fn new(value: String) -> Self {
                Self(value)
            }

            /// Parses a validated identifier from a string.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                let s = value.into();
                if !$pattern.is_match(&s) {
                    return Err(ValidationError::PatternMismatch {
                        field: stringify!($name),
                        value: s,
                    });
                }
                Ok(Self(s))
            }

            /// Returns true when the wrapped value matches the identifier pattern.
            pub fn is_conformant(&self) -> bool {
                $pattern.is_match(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

newtype!(
    ResourceId,
    "URI-like identifier of a catalog entity (`smi:<authority>/<path>`).",
    RESOURCE_ID_PATTERN
);
newtype!(
    PublicId,
    "Public identifier of a bulletin record, taken from `event_id/value`.",
    PUBLIC_ID_PATTERN
);

/// Entity types that receive sequenced resource identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// The single-event catalog wrapper.
    Catalog,
    /// The event.
    Event,
    /// The hypocenter solution.
    Origin,
    /// A network magnitude.
    Magnitude,
    /// A single-station magnitude.
    StationMagnitude,
    /// A phase pick.
    Pick,
    /// An origin-to-pick association.
    Arrival,
    /// A fault-plane solution.
    FocalMechanism,
}

impl EntityKind {
    /// Path segment used in identifiers.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Catalog => "catalog",
            EntityKind::Event => "event",
            EntityKind::Origin => "origin",
            EntityKind::Magnitude => "magnitude",
            EntityKind::StationMagnitude => "station_magnitude",
            EntityKind::Pick => "pick",
            EntityKind::Arrival => "arrival",
            EntityKind::FocalMechanism => "focal_mechanism",
        }
    }
}

/// Non-entity references (methods and models) named by a free-form tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// Program that located the origin.
    LocationMethod,
    /// Program that computed a magnitude.
    MagnitudeMethod,
    /// Program that computed a focal mechanism.
    FocalMechanismMethod,
    /// Velocity model used for location.
    EarthModel,
}

impl ReferenceKind {
    /// Path segment used in identifiers.
    pub fn as_str(self) -> &'static str {
        match self {
            ReferenceKind::LocationMethod => "location_method",
            ReferenceKind::MagnitudeMethod => "magnitude_method",
            ReferenceKind::FocalMechanismMethod => "focal_mechanism_method",
            ReferenceKind::EarthModel => "earth_model",
        }
    }
}

impl ResourceId {
    /// Builds `root/<entity>/<public-id>/<sequence>`.
    pub fn entity(kind: EntityKind, public_id: &PublicId, sequence: usize) -> Self {
        Self(format!(
            "{}/{}/{}/{}",
            RESOURCE_ROOT,
            kind.as_str(),
            public_id.as_ref(),
            sequence
        ))
    }

    /// Builds `root/<reference-kind>/<name>`.
    pub fn reference(kind: ReferenceKind, name: &str) -> Self {
        Self(format!("{}/{}/{}", RESOURCE_ROOT, kind.as_str(), name))
    }

    /// URI of the agency that publishes converted catalogs.
    pub fn agency() -> Self {
        Self(format!("{}/agency", RESOURCE_ROOT))
    }
}

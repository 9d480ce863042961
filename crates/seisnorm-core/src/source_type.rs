use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::errors::ConversionError;

/// Processing system that produced a bulletin record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// BayNet analyst bulletins.
    Baynet,
    /// Earthworm automatic locations.
    Earthworm,
    /// SeisComP3 automatic locations (records named `gof*`).
    Seiscomp3,
    /// ObsPyck manual picking sessions.
    Obspyck,
    /// Toni's relocations.
    Toni,
}

/// Shape of the horizontal origin uncertainty a source reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalUncertaintyModel {
    /// North/east aligned ellipse built from latitude and longitude errors.
    Ellipse,
    /// Single radius taken from the latitude error.
    Scalar,
    /// The source's errors are not turned into an origin uncertainty.
    NotReported,
}

impl SourceType {
    /// Classifies a record by the final component of its name.
    pub fn classify(record_name: &str) -> Result<Self, ConversionError> {
        let base_name = Path::new(record_name)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(record_name);
        let lower = base_name.to_lowercase();

        let source_type = if lower.starts_with("baynet") {
            SourceType::Baynet
        } else if lower.starts_with("earthworm") {
            SourceType::Earthworm
        } else if lower.starts_with("gof") {
            SourceType::Seiscomp3
        } else if lower.starts_with("obspyck") || base_name == "5622" {
            SourceType::Obspyck
        } else if lower.starts_with("toni") {
            SourceType::Toni
        } else {
            return Err(ConversionError::Classification {
                record_name: record_name.to_string(),
            });
        };
        Ok(source_type)
    }

    /// Lower-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::Baynet => "baynet",
            SourceType::Earthworm => "earthworm",
            SourceType::Seiscomp3 => "seiscomp3",
            SourceType::Obspyck => "obspyck",
            SourceType::Toni => "toni",
        }
    }

    /// Factor turning a stored depth into meters, positive down.
    ///
    /// SeisComP3 stores kilometers positive down; every other source stores
    /// them with the opposite sign.
    pub fn depth_factor(self) -> f64 {
        match self {
            SourceType::Seiscomp3 => 1000.0,
            _ => -1000.0,
        }
    }

    /// Whether an origin may lack latitude/longitude uncertainty.
    pub fn tolerates_missing_horizontal_uncertainty(self) -> bool {
        matches!(self, SourceType::Seiscomp3 | SourceType::Toni)
    }

    /// How latitude/longitude errors become an origin uncertainty.
    pub fn horizontal_uncertainty_model(self) -> HorizontalUncertaintyModel {
        match self {
            SourceType::Baynet | SourceType::Obspyck => HorizontalUncertaintyModel::Ellipse,
            SourceType::Earthworm => HorizontalUncertaintyModel::Scalar,
            SourceType::Seiscomp3 | SourceType::Toni => HorizontalUncertaintyModel::NotReported,
        }
    }

    /// ObsPyck wrote the variance into magnitude uncertainty fields.
    pub fn magnitude_error_is_variance(self) -> bool {
        self == SourceType::Obspyck
    }

    /// Author recorded for automatic systems, overriding the record's user.
    pub fn system_author(self) -> Option<&'static str> {
        match self {
            SourceType::Seiscomp3 | SourceType::Earthworm => Some(self.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "baynet" => Ok(SourceType::Baynet),
            "earthworm" => Ok(SourceType::Earthworm),
            "seiscomp3" => Ok(SourceType::Seiscomp3),
            "obspyck" => Ok(SourceType::Obspyck),
            "toni" => Ok(SourceType::Toni),
            _ => Err(ConversionError::Classification {
                record_name: s.to_string(),
            }),
        }
    }
}

use canonical_json::to_string;
use serde_json::Value;

use crate::catalog::Catalog;

/// Error returned when a catalog cannot be serialized.
#[derive(thiserror::Error, Debug)]
pub enum SerializationError {
    /// The catalog could not be converted to a JSON tree.
    #[error("catalog is not representable as JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Canonical encoding failed.
    #[error("canonical encoding failed: {0}")]
    Canonical(String),
}

/// Serializer that emits catalogs as deterministic JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogSerializer {
    pretty: bool,
}

impl CatalogSerializer {
    /// Canonical (RFC 8785) output: sorted keys, no insignificant whitespace.
    pub fn canonical() -> Self {
        Self { pretty: false }
    }

    /// Indented output for humans. Key order follows the struct layout.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Serializes a catalog into UTF-8 bytes.
    pub fn serialize(&self, catalog: &Catalog) -> Result<Vec<u8>, SerializationError> {
        if self.pretty {
            return Ok(serde_json::to_vec_pretty(catalog)?);
        }
        let value: Value = serde_json::to_value(catalog)?;
        let canonical =
            to_string(&value).map_err(|err| SerializationError::Canonical(err.to_string()))?;
        Ok(canonical.into_bytes())
    }

    /// Reads a catalog back from JSON bytes.
    pub fn deserialize(&self, bytes: &[u8]) -> Result<Catalog, SerializationError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

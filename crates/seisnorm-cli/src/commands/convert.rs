//! Convert command implementation.

use chrono::Utc;
use seisnorm_canonical::{CatalogSerializer, CatalogValidator, StructuralValidator, ValidationMode};
use seisnorm_core::{is_bulletin_record, CatalogAssembler, ConversionOptions, JsonNode};
use serde_json::Value;
use std::path::Path;
use tracing::info;

use crate::output::{read_file, write_bytes, CliError};

pub fn run(
    input: String,
    name: Option<String>,
    output: Option<String>,
    pretty: bool,
    validation: Option<ValidationMode>,
) -> Result<(), CliError> {
    let bytes = read_file(&input)?;
    let record: Value = serde_json::from_slice(&bytes).map_err(|source| CliError::InvalidJson {
        path: input.clone(),
        source,
    })?;
    let root = JsonNode::new(&record);
    if !is_bulletin_record(&root) {
        return Err(CliError::NotABulletinRecord { path: input });
    }

    // Classification looks at the record's own name, not the directory it sits in.
    let record_name = name.unwrap_or_else(|| {
        Path::new(&input)
            .file_name()
            .map(|file_name| file_name.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.clone())
    });

    let assembler = CatalogAssembler::new(ConversionOptions {
        creation_time: Some(Utc::now()),
    });
    let catalog = assembler.convert(&record_name, &root)?;

    if let Some(mode) = validation {
        StructuralValidator::new(mode)
            .validate(&catalog)
            .into_result()?;
    }

    let serializer = if pretty {
        CatalogSerializer::pretty()
    } else {
        CatalogSerializer::canonical()
    };
    let serialized = serializer.serialize(&catalog)?;
    write_bytes(output.as_deref(), &serialized)?;

    info!(
        record = %record_name,
        catalog = %catalog.resource_id,
        "converted record"
    );
    Ok(())
}

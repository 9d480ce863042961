//! Validate command implementation.

use seisnorm_canonical::{
    CatalogSerializer, CatalogValidator, SerializationError, StructuralValidator, ValidationMode,
};
use tracing::info;

use crate::output::{read_file, CliError};

pub fn run(catalog: String, mode: ValidationMode, json_output: bool) -> Result<(), CliError> {
    let bytes = read_file(&catalog)?;
    let parsed = CatalogSerializer::canonical().deserialize(&bytes)?;

    let report = StructuralValidator::new(mode).validate(&parsed);
    if json_output {
        let rendered =
            serde_json::to_string_pretty(&report).map_err(SerializationError::from)?;
        println!("{}", rendered);
    }

    report.into_result()?;

    if !json_output {
        println!("PASS {}", catalog);
    }
    info!(catalog = %catalog, ?mode, "catalog passed validation");
    Ok(())
}

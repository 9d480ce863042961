//! Classify command implementation.

use seisnorm_core::SourceType;

use crate::output::CliError;

pub fn run(name: String) -> Result<(), CliError> {
    let source_type = SourceType::classify(&name)?;

    println!("{:<40} {}", "source_type", source_type);
    println!("{:<40} {}", "depth_factor", source_type.depth_factor());
    println!(
        "{:<40} {:?}",
        "horizontal_uncertainty",
        source_type.horizontal_uncertainty_model()
    );
    println!(
        "{:<40} {}",
        "tolerates_missing_horizontal_uncertainty",
        source_type.tolerates_missing_horizontal_uncertainty()
    );
    Ok(())
}

//! Resolve-network command implementation.

use seisnorm_core::{normalize_station, NetworkStationResolver};

use crate::output::CliError;

pub fn run(station: String, network: Option<String>) -> Result<(), CliError> {
    let station = normalize_station(&station);
    let network = NetworkStationResolver::default().resolve(&station, network.as_deref(), &[])?;

    println!("{}.{}", network, station);
    Ok(())
}

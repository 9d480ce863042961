//! seisnorm CLI - Converts seismic bulletin records into canonical catalogs.

use clap::{Parser, Subcommand, ValueEnum};
use seisnorm_canonical::{ValidationError, ValidationMode};

mod commands;
mod output;

use commands::{classify, convert, resolve_network, validate};
use output::CliError;

#[derive(Parser)]
#[command(name = "seisnorm")]
#[command(about = "Seismic bulletin record conversion and catalog validation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Validation applied to a converted catalog before it is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValidationChoice {
    /// Structure, references, identifier syntax, ranges and vocabularies
    Strict,
    /// Structure and reference resolution only
    Relaxed,
    /// Write the catalog unchecked
    #[value(name = "none")]
    Off,
}

impl ValidationChoice {
    fn mode(self) -> Option<ValidationMode> {
        match self {
            ValidationChoice::Strict => Some(ValidationMode::Strict),
            ValidationChoice::Relaxed => Some(ValidationMode::Relaxed),
            ValidationChoice::Off => None,
        }
    }
}

/// Mode for validating an existing catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Structure, references, identifier syntax, ranges and vocabularies
    Strict,
    /// Structure and reference resolution only
    Relaxed,
}

impl From<ModeArg> for ValidationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Strict => ValidationMode::Strict,
            ModeArg::Relaxed => ValidationMode::Relaxed,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one bulletin record (JSON document tree) into a catalog
    Convert {
        /// Path to the record
        input: String,
        /// Record name used for source-type classification (default: input file name)
        #[arg(long)]
        name: Option<String>,
        /// Write the catalog to FILE instead of stdout
        #[arg(long)]
        output: Option<String>,
        /// Indented output instead of canonical JSON
        #[arg(long)]
        pretty: bool,
        /// Validation applied before writing
        #[arg(long, value_enum, default_value = "strict")]
        validation: ValidationChoice,
    },
    /// Show the source type a record name classifies as
    Classify {
        /// Record name or path
        name: String,
    },
    /// Resolve the network of a station from the built-in tables
    ResolveNetwork {
        /// Station code as written in a record
        station: String,
        /// Network written next to the station
        #[arg(long)]
        network: Option<String>,
    },
    /// Validate a catalog file
    Validate {
        /// Path to the catalog JSON
        catalog: String,
        /// Validation mode
        #[arg(long, value_enum, default_value = "strict")]
        mode: ModeArg,
        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("seisnorm=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            name,
            output,
            pretty,
            validation,
        } => convert::run(input, name, output, pretty, validation.mode()),
        Commands::Classify { name } => classify::run(name),
        Commands::ResolveNetwork { station, network } => resolve_network::run(station, network),
        Commands::Validate {
            catalog,
            mode,
            json,
        } => validate::run(catalog, mode.into(), json),
    };

    if let Err(e) = result {
        if let CliError::Validation(ValidationError::Rejected(report)) = &e {
            output::print_diagnostics(report);
        }
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

//! Output formatting and CLI errors.

use seisnorm_canonical::{SerializationError, ValidationError, ValidationReport};
use seisnorm_core::ConversionError;
use std::io::{self, Write};
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: String, source: io::Error },
    #[error("invalid JSON in {path}: {source}")]
    InvalidJson {
        path: String,
        source: serde_json::Error,
    },
    #[error("conversion failed: {0}")]
    Conversion(#[from] ConversionError),
    #[error("{0}")]
    Serialization(#[from] SerializationError),
    #[error("{path} is not a bulletin record (needs event_id/value and event_type/value)")]
    NotABulletinRecord { path: String },
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl CliError {
    /// Validation rejections exit with 2, every other failure with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Validation(ValidationError::Rejected(_)) => 2,
            _ => 1,
        }
    }
}

/// Reads a file, naming it in the error.
pub fn read_file(path: &str) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })
}

/// Writes bytes to `path`, or to stdout followed by a newline.
pub fn write_bytes(path: Option<&str>, bytes: &[u8]) -> Result<(), CliError> {
    match path {
        Some(path) => std::fs::write(path, bytes).map_err(|source| CliError::Write {
            path: path.to_string(),
            source,
        }),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(bytes)
                .and_then(|_| stdout.write_all(b"\n"))
                .map_err(|source| CliError::Write {
                    path: "stdout".to_string(),
                    source,
                })
        }
    }
}

/// Prints a report's diagnostics as a table on stderr.
#[allow(clippy::print_literal)]
pub fn print_diagnostics(report: &ValidationReport) {
    eprintln!("{:<48} {}", "PATH", "MESSAGE");
    eprintln!("{}", "-".repeat(90));
    for diagnostic in &report.diagnostics {
        eprintln!("{:<48} {}", truncate(&diagnostic.path, 48), diagnostic.message);
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

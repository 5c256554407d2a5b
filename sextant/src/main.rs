//! Sextant command line
//!
//! Commands:
//! - convert <value> <from> <to> [--equivalency NAME]...: convert a value
//! - describe [--json]: list every defined unit
//! - info <name>: show one unit in detail
//!
//! Equivalencies: spectral, parallax, dimensionless_angles and
//! spectral_density:<value>:<unit>. Units are registry names only.
//!
//! Log level comes from SEXTANT_LOG (default info); logs go to stderr.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use sextant_astro::{equivalencies, standard};
use sextant_core::UnitError;
use sextant_units::{convert, Equivalency, FormatStyle, Registry, UnitSummary};
use thiserror::Error;
use tracing::{debug, error};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Error)]
enum CliError {
    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("unknown equivalency '{0}' (spectral, spectral_density:<value>:<unit>, parallax, dimensionless_angles)")]
    UnknownEquivalency(String),

    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Parser)]
#[command(name = "sextant")]
#[command(version, about = "Astronomical unit conversion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Command {
    /// Convert a value between two units
    Convert {
        #[arg(allow_negative_numbers = true, value_parser = parse_number)]
        value: f64,

        /// Unit the value is given in
        from: String,

        /// Unit to convert into
        to: String,

        /// Equivalency to enable; repeat for more than one
        #[arg(short = 'e', long = "equivalency", value_name = "NAME")]
        equivalencies: Vec<String>,
    },
    /// List every defined unit
    Describe {
        /// Print the catalogue as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one unit in detail
    Info {
        #[arg(value_name = "UNIT")]
        name: String,
    },
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_env("SEXTANT_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();
    let result = standard().map_err(CliError::from).and_then(|registry| {
        let stdout = io::stdout();
        execute(&cli.command, &registry, &mut stdout.lock())
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let CliError::Unit(unit_err) = &err {
                error!(code = unit_err.code(), "{}", unit_err);
            } else {
                error!("{}", err);
            }
            ExitCode::FAILURE
        }
    }
}

fn parse_number(text: &str) -> Result<f64, CliError> {
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CliError::InvalidNumber(text.to_string()))
}

/// Resolve an equivalency name against the registry
fn equivalencies_for(registry: &Registry, name: &str) -> Result<Vec<Equivalency>, CliError> {
    let found = match name {
        "spectral" => equivalencies::spectral(registry)?,
        "parallax" => equivalencies::parallax(registry)?,
        "dimensionless_angles" => equivalencies::dimensionless_angles(registry)?,
        other => match other.split(':').collect::<Vec<_>>().as_slice() {
            ["spectral_density", value, unit] => {
                let value = parse_number(value)?;
                let unit = registry.require(unit)?;
                equivalencies::spectral_density(registry, value, &unit)?
            }
            _ => return Err(CliError::UnknownEquivalency(other.to_string())),
        },
    };
    debug!(name, count = found.len(), "resolved equivalency");
    Ok(found)
}

/// Detailed view of one unit
#[derive(Debug, Serialize)]
struct UnitInfo {
    #[serde(flatten)]
    summary: UnitSummary,
    decomposed: String,
    formats: BTreeMap<String, String>,
}

fn unit_info(registry: &Registry, name: &str) -> Result<UnitInfo, CliError> {
    let unit = registry.require(name)?;
    let formats = FormatStyle::ALL
        .iter()
        .map(|style| (style.name().to_string(), unit.to_string_in(*style)))
        .collect();
    Ok(UnitInfo {
        summary: UnitSummary::of(&unit),
        decomposed: unit.decompose().to_string(),
        formats,
    })
}

fn execute(command: &Command, registry: &Registry, out: &mut impl Write) -> Result<(), CliError> {
    match command {
        Command::Convert { value, from, to, equivalencies } => {
            let from_unit = registry.require(from)?;
            let to_unit = registry.require(to)?;
            let mut resolved = Vec::new();
            for name in equivalencies {
                resolved.extend(equivalencies_for(registry, name)?);
            }
            let converted = convert(*value, &from_unit, &to_unit, &resolved)?;
            writeln!(out, "{} {}", converted, to_unit)?;
        }
        Command::Describe { json: true } => {
            serde_json::to_writer_pretty(&mut *out, &registry.describe())?;
            writeln!(out)?;
        }
        Command::Describe { json: false } => {
            for summary in registry.describe() {
                writeln!(
                    out,
                    "{:<10} {:<24} {}",
                    summary.name,
                    summary.dimension,
                    summary.represents.as_deref().unwrap_or("-")
                )?;
            }
        }
        Command::Info { name } => {
            serde_json::to_writer_pretty(&mut *out, &unit_info(registry, name)?)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

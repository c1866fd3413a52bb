// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building Info CLI
//!
//! Runs one aggregate query against a JSON building document.

use std::fmt;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use building_info_model::report::{
    ErrorReport, LevelAreaReport, LightingDensityReport, OccupancyReport, RestroomReport,
    ThresholdReport, TotalReport,
};
use building_info_model::{describe, query, Building, BuildingError, BuildingParser, Metric};
use building_info_parser::JsonParser;
use clap::{Args, Parser, Subcommand};
use log::info;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "building-info")]
#[command(about = "Aggregate queries over building/level/room documents")]
struct Cli {
    /// Path to the building JSON document ("-" reads stdin)
    #[arg(short, long, default_value = "-")]
    input: PathBuf,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Accept numeric strings (e.g. "50.0") for room attributes
    #[arg(long)]
    lenient: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Debug, Default)]
struct Scope {
    /// Component name to scope the query to (defaults to the whole building)
    #[arg(short, long)]
    name: Option<String>,
}

impl Scope {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show building info
    Info,

    /// Calculate total area
    Area(Scope),

    /// Calculate total heating
    Heat(Scope),

    /// Calculate total cube
    Cube(Scope),

    /// Calculate total lighting
    Light(Scope),

    /// Calculate maximum people for the area
    Occupancy(Scope),

    /// Calculate minimum restrooms for the area
    Restrooms(Scope),

    /// Calculate lighting per area
    LightingDensity(Scope),

    /// Find rooms with high heating per cubic meter
    RoomsAbove {
        /// Heating per cubic meter that a room must exceed
        threshold: f64,
    },

    /// Calculate area of every level
    LevelAreas,
}

/// Result of one command
#[derive(Serialize)]
#[serde(untagged)]
enum Output<'a> {
    Info(&'a Building),
    Total(TotalReport),
    Occupancy(OccupancyReport),
    Restrooms(RestroomReport),
    LightingDensity(LightingDensityReport),
    Threshold(ThresholdReport),
    LevelAreas(LevelAreaReport),
}

impl fmt::Display for Output<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Info(building) => f.write_str(describe(*building).trim_end()),
            Output::Total(report) => fmt::Display::fmt(report, f),
            Output::Occupancy(report) => fmt::Display::fmt(report, f),
            Output::Restrooms(report) => fmt::Display::fmt(report, f),
            Output::LightingDensity(report) => fmt::Display::fmt(report, f),
            Output::Threshold(report) => fmt::Display::fmt(report, f),
            Output::LevelAreas(report) => fmt::Display::fmt(report, f),
        }
    }
}

fn run<'a>(command: &Commands, building: &'a Building) -> building_info_model::Result<Output<'a>> {
    let output = match command {
        Commands::Info => Output::Info(building),
        Commands::Area(scope) => Output::Total(query::total_report(building, scope.name(), Metric::Area)?),
        Commands::Heat(scope) => Output::Total(query::total_report(building, scope.name(), Metric::Heat)?),
        Commands::Cube(scope) => Output::Total(query::total_report(building, scope.name(), Metric::Cube)?),
        Commands::Light(scope) => {
            Output::Total(query::total_report(building, scope.name(), Metric::Light)?)
        }
        Commands::Occupancy(scope) => Output::Occupancy(query::occupancy(building, scope.name())?),
        Commands::Restrooms(scope) => Output::Restrooms(query::restrooms(building, scope.name())?),
        Commands::LightingDensity(scope) => {
            Output::LightingDensity(query::lighting_density_report(building, scope.name())?)
        }
        Commands::RoomsAbove { threshold } => {
            Output::Threshold(query::rooms_above_threshold_report(building, *threshold))
        }
        Commands::LevelAreas => Output::LevelAreas(query::per_level_area_report(building)),
    };
    Ok(output)
}

fn load_building(input: &Path, lenient: bool) -> Result<Building> {
    let parser = JsonParser::new().with_numeric_strings(lenient);

    let building = if input == Path::new("-") {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read building document from stdin")?;
        parser
            .parse(&content)
            .context("Failed to parse building document from stdin")?
    } else {
        parser
            .parse_file(input)
            .with_context(|| format!("Failed to load building document {}", input.display()))?
    };

    info!(
        "loaded building '{}' ({} levels)",
        building.id,
        building.levels().count()
    );
    Ok(building)
}

fn execute(cli: &Cli) -> Result<()> {
    let building = load_building(&cli.input, cli.lenient)?;
    let output = run(&cli.command, &building)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", output);
    }
    Ok(())
}

/// Exit status of a failed run
///
/// A missing component or a zero denominator only fails the requested query
/// and exits with 2; unreadable or malformed input exits with 1.
fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<BuildingError>() {
        Some(err) if err.is_recoverable() => 2,
        _ => 1,
    }
}

fn init_logging() {
    // stdout carries query results
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if cli.json {
                let report = ErrorReport::new(format!("{:#}", err));
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(_) => eprintln!("Error: {:#}", err),
                }
            } else {
                eprintln!("Error: {:#}", err);
            }
            ExitCode::from(exit_status(&err))
        }
    }
}

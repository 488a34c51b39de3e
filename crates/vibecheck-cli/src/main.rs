mod commands;
mod geolocation;
mod map;
mod pipeline;
mod render;
mod view;

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vibecheck_core::Coordinates;

use crate::commands::{run_check_command, run_interactive, CheckOutput};

#[derive(Debug, Parser)]
#[command(name = "vibecheck")]
#[command(about = "Check the vibe of the area around you")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one vibe check and print the result.
    Check {
        #[command(flatten)]
        location: LocationArgs,

        /// Print the report as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Write the map (user and place markers) as GeoJSON to this path.
        #[arg(long, value_name = "PATH")]
        geojson: Option<PathBuf>,

        /// Focus the map on a place and print its popup.
        #[arg(long, value_name = "PLACE_ID")]
        focus: Option<String>,
    },
    /// Check, read the result, try again: a prompt-driven session.
    Interactive {
        #[command(flatten)]
        location: LocationArgs,
    },
}

/// Explicit coordinates; when absent the configured geolocation is used.
#[derive(Debug, Args)]
struct LocationArgs {
    #[arg(long, requires = "lon", allow_negative_numbers = true, value_parser = parse_latitude)]
    lat: Option<f64>,

    #[arg(long, requires = "lat", allow_negative_numbers = true, value_parser = parse_longitude)]
    lon: Option<f64>,
}

impl LocationArgs {
    fn coordinates(&self) -> Option<Coordinates> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }
}

fn parse_latitude(raw: &str) -> Result<f64, String> {
    parse_degrees(raw, 90.0)
}

fn parse_longitude(raw: &str) -> Result<f64, String> {
    parse_degrees(raw, 180.0)
}

fn parse_degrees(raw: &str, limit: f64) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|e| format!("not a number: {e}"))?;
    if value.is_finite() && (-limit..=limit).contains(&value) {
        Ok(value)
    } else {
        Err(format!("must be between -{limit} and {limit}"))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = vibecheck_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    match command {
        Commands::Check {
            location,
            json,
            geojson,
            focus,
        } => {
            let output = CheckOutput {
                json,
                geojson: geojson.as_deref(),
                focus: focus.as_deref(),
            };
            run_check_command(&config, location.coordinates(), output).await
        }
        Commands::Interactive { location } => {
            run_interactive(&config, location.coordinates()).await
        }
    }
}

use anyhow::{Context, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use weathernow_core::{
    Config, Coordinates, LocationProvider, LookupController, LookupState, UnitSystem,
    location::{FixedLocation, location_from_config},
    provider::provider_from_config,
    render::ReportView,
};

use crate::{configure, session};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weathernow", version, about = "Current weather by city or location")]
pub struct Cli {
    /// Log lookups and state changes to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key, default units and location sharing.
    Configure,

    /// Show weather for a city.
    Show {
        /// City name, e.g. "Mumbai" or "Paris,FR".
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show weather at the current location.
    Here {
        /// Latitude to use instead of the configured location.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude to use instead of the configured location.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Search repeatedly, switch units, use your location.
    Interactive {
        /// Starting unit system; defaults to the configured one.
        #[arg(short, long)]
        units: Option<UnitSystem>,
    },
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// "metric" or "imperial"; defaults to the configured one.
    #[arg(short, long)]
    pub units: Option<UnitSystem>,

    /// Print the report as JSON instead of a card.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure::run(),
            Command::Show { city, output } => {
                let city = city.join(" ");
                if city.trim().is_empty() {
                    bail!("City name must not be empty.");
                }

                let config = Config::load()?;
                let mut controller = controller(&config, output.units)?;

                let units = controller.units();
                let state = controller.lookup_by_name(&city).await;
                print_outcome(state, units, output.json)
            }
            Command::Here { lat, lon, output } => {
                let config = Config::load()?;
                let mut controller = controller(&config, output.units)?;

                let locator: Box<dyn LocationProvider> = match (lat, lon) {
                    (Some(lat), Some(lon)) => Box::new(FixedLocation(Coordinates::new(lat, lon))),
                    _ => location_from_config(config.location.as_ref()),
                };

                let units = controller.units();
                let state = controller.lookup_by_location(locator.as_ref()).await;
                print_outcome(state, units, output.json)
            }
            Command::Interactive { units } => {
                let config = Config::load()?;
                let controller = controller(&config, units)?;
                let locator = location_from_config(config.location.as_ref());

                session::run(controller, locator.as_ref()).await
            }
        }
    }
}

fn controller(config: &Config, units: Option<UnitSystem>) -> anyhow::Result<LookupController> {
    let provider = provider_from_config(config)?;
    Ok(LookupController::new(provider, units.unwrap_or(config.units)))
}

/// Print a settled lookup. A failed lookup becomes the process error.
fn print_outcome(state: &LookupState, units: UnitSystem, json: bool) -> anyhow::Result<()> {
    match state {
        LookupState::Success(report) if json => {
            let out =
                serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")?;
            println!("{out}");
            Ok(())
        }
        LookupState::Success(report) => {
            println!("{}", ReportView::new(report, units));
            Ok(())
        }
        LookupState::Failed(message) => Err(anyhow!("{message}")),
        LookupState::Idle | LookupState::Loading => bail!("Lookup did not complete."),
    }
}

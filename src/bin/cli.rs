use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use fleet_analytics::prelude::*;

#[derive(Parser)]
#[command(name = "fleet-analytics")]
#[command(about = "Run fleet analytics reports against a dataset", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the analytics config YAML (optional)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to a JSON dataset fixture (defaults to a built-in sample)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Headline dashboard report
    Dashboard,

    /// Daily trends over a trailing window
    Trends {
        /// Window size in days
        #[arg(short = 'n', long, default_value_t = 30)]
        days: u32,
    },

    /// Churn predictions and breakdown
    Churn,

    /// Swap demand forecast
    Forecast {
        /// Location to forecast for (all locations if omitted)
        #[arg(short, long)]
        location: Option<String>,

        /// Forecast horizon in days
        #[arg(short = 'n', long, default_value_t = 7)]
        days: u32,
    },

    /// Per-location utilization
    Locations,

    /// Per-rider usage and payment behavior
    Behavior,

    /// Lightweight summary
    Summary,

    /// Comprehensive report over all data
    Report,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => AnalyticsConfig::load(path)?,
        None => AnalyticsConfig::default(),
    };
    let environment = config.environment;

    let dataset = match &cli.data {
        Some(path) => FleetDataset::load(path)?,
        None => FleetDataset::sample(chrono::Utc::now()),
    };
    let store = Arc::new(MemoryStore::from_dataset(dataset));
    let service = AnalyticsService::from_config(&config, store)?;

    match cli.command {
        Commands::Dashboard => {
            print_envelope(
                "Failed to fetch dashboard analytics",
                service.dashboard().await,
                environment,
            )?;
        }
        Commands::Trends { days } => {
            print_envelope(
                "Failed to fetch trends analytics",
                service.trends(days).await,
                environment,
            )?;
        }
        Commands::Churn => {
            print_envelope(
                "Failed to fetch churn predictions",
                service.churn().await,
                environment,
            )?;
        }
        Commands::Forecast { location, days } => {
            let request = ForecastRequest { location, days };
            print_envelope(
                "Failed to fetch swap forecast",
                service.forecast(request).await,
                environment,
            )?;
        }
        Commands::Locations => {
            print_envelope(
                "Failed to fetch location analytics",
                service.locations().await,
                environment,
            )?;
        }
        Commands::Behavior => {
            print_envelope(
                "Failed to fetch rider behavior analytics",
                service.behavior().await,
                environment,
            )?;
        }
        Commands::Summary => {
            print_envelope(
                "Failed to fetch summary analytics",
                service.summary().await,
                environment,
            )?;
        }
        Commands::Report => {
            print_envelope(
                "Failed to generate comprehensive report",
                service.comprehensive_report(DateRange::default()).await,
                environment,
            )?;
        }
    }

    Ok(())
}

fn print_envelope<T: Serialize>(
    message: &str,
    result: Result<T, ReportError>,
    environment: Environment,
) -> anyhow::Result<()> {
    let envelope = respond(message, result, environment);
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

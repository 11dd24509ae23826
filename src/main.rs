use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use configuration::{OutputFormat, Settings};
use estimation::{fixtures, payload, EstimateSummary, Estimator};
use serde_json::Value;
use std::path::PathBuf;

mod render;

/// The main entry point for the cost simulation tool.
fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let settings = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let _log_guard = configuration::init_logging(&settings.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Simulate(args) => handle_simulate(args, settings),
        Commands::Fixtures => {
            render::print_fixtures(fixtures::FIXTURES);
            Ok(())
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Monte Carlo cost-risk simulation for construction estimates.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./costsim.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate total project cost for a set of line items.
    Simulate(SimulateArgs),
    /// List the built-in line-item fixtures.
    Fixtures,
}

#[derive(Args)]
#[command(group(ArgGroup::new("source").required(true).args(["items", "fixture"])))]
struct SimulateArgs {
    /// JSON file with the line items (an array, or an object with an "items" array).
    #[arg(long)]
    items: Option<PathBuf>,

    /// Name of a built-in fixture (see `costsim fixtures`).
    #[arg(long)]
    fixture: Option<String>,

    /// Number of Monte Carlo iterations.
    #[arg(long)]
    iterations: Option<usize>,

    /// Seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of histogram bins.
    #[arg(long)]
    bins: Option<usize>,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

// ==============================================================================
// Simulate Command Logic
// ==============================================================================

/// Loads the line items, runs the engine, and renders the result.
fn handle_simulate(args: SimulateArgs, mut settings: Settings) -> Result<()> {
    if let Some(bins) = args.bins {
        settings.simulation.histogram_bins = bins;
    }
    settings.validate()?;

    let estimator = Estimator::new(settings.simulation.clone());

    let mut request = match (&args.items, &args.fixture) {
        (Some(path), _) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read line items from {}", path.display()))?;
            let value: Value = serde_json::from_str(&text)
                .with_context(|| format!("{} is not valid JSON", path.display()))?;
            payload::request_from_value(&value, estimator.settings())?
        }
        (None, Some(name)) => estimator.request(fixtures::by_name(name)?, None, None),
        (None, None) => bail!("either --items or --fixture is required"),
    };
    if let Some(iterations) = args.iterations {
        request.iterations = iterations;
    }
    if let Some(seed) = args.seed {
        request.seed = Some(seed);
    }

    tracing::info!(
        items = request.items.len(),
        iterations = request.iterations,
        seed = ?request.seed,
        "Running simulation"
    );
    let result = estimator.simulate(&request)?;
    let summary = EstimateSummary::from_result(&result)?;

    match args.format.unwrap_or(settings.output.format) {
        OutputFormat::Table => render::print_summary(&summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}

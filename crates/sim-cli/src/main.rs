//! Headless helper simulation.
//!
//! Runs a scenario for a number of ticks and prints what happened as JSON.
//! Environment defaults come from `RuntimeConfig::from_env` (and `.env`);
//! flags override them.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use helper_content::ContentFactory;
use helper_core::NetMode;
use runtime::scenario::PRESETS;
use runtime::{RuntimeConfig, Scenario};

/// Run a helper scenario without a game host
#[derive(Parser)]
#[command(name = "helper-sim")]
#[command(about = "Headless simulation of the helper creature", long_about = None)]
#[command(version)]
struct Cli {
    /// Built-in scenario to run
    #[arg(short, long, default_value = "rescue", conflicts_with = "scenario_file")]
    scenario: String,

    /// RON scenario file to run instead of a preset
    #[arg(long, value_name = "FILE")]
    scenario_file: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Participant role: single_player, server or client
    #[arg(long, value_name = "MODE", value_parser = parse_net_mode)]
    net_mode: Option<NetMode>,

    /// World seed mixed into every roll
    #[arg(long)]
    seed: Option<u64>,

    /// Content directory with helper.toml, tracking.ron and maps/
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Helper TOML overriding the content directory's helper.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Simulate night time
    #[arg(long)]
    night: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,

    /// List built-in scenarios and exit
    #[arg(long)]
    list: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// End-of-run summary
    Summary,
    /// Every event, one JSON object per line
    Events,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let cli = Cli::parse();
    if cli.list {
        for name in PRESETS {
            println!("{name}");
        }
        return Ok(());
    }

    let config = runtime_config(&cli)?;
    let content = config.data_dir.as_ref().map(|dir| ContentFactory::new(dir));

    let scenario = match &cli.scenario_file {
        Some(path) => Scenario::load(path)?,
        None => Scenario::preset(&cli.scenario)?,
    };

    let mut sim = scenario
        .build(config, content.as_ref())
        .with_context(|| format!("failed to build scenario '{}'", scenario.name))?;
    sim.run(cli.ticks)
        .with_context(|| format!("simulation stopped at tick {}", sim.tick().0))?;

    match cli.format {
        OutputFormat::Summary => {
            println!("{}", serde_json::to_string_pretty(&sim.summary())?);
        }
        OutputFormat::Events => {
            for event in sim.events() {
                println!("{}", serde_json::to_string(event)?);
            }
        }
    }
    Ok(())
}

/// Environment first, then the content directory, then explicit flags.
fn runtime_config(cli: &Cli) -> Result<RuntimeConfig> {
    let mut config = RuntimeConfig::from_env();

    if let Some(net_mode) = cli.net_mode {
        config.net_mode = net_mode;
    }
    if let Some(seed) = cli.seed {
        config.world_seed = seed;
    }
    if cli.night {
        config.is_day = false;
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }

    if let Some(path) = &cli.config {
        config.helper_config_path = Some(path.clone());
    } else if config.helper_config_path.is_none()
        && let Some(dir) = &config.data_dir
    {
        config.helper = ContentFactory::new(dir).load_config()?;
    }

    config
        .load_helper_config()
        .context("failed to load helper config")
}

fn parse_net_mode(value: &str) -> std::result::Result<NetMode, String> {
    value
        .parse()
        .map_err(|_| format!("unknown net mode '{value}' (expected single_player, server or client)"))
}

/// Log to stderr so stdout stays machine-readable.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

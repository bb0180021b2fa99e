//! brewcount CLI
//!
//! Count breweries per state, compare concurrent and sequential fetching,
//! and run the busy-work demo.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use brewcount::busywork::do_busy_work_secs;
use brewcount::client::StateQuery;
use brewcount::config::Config;
use brewcount::counter::BreweryCountResult;
use brewcount::fanout::{BatchRun, compare, count_concurrent};
use brewcount::report::RunReport;

/// brewcount - brewery counts per US state
#[derive(Debug, Parser)]
#[command(name = "brewcount")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Count states concurrently, then sequentially, and write the run report
    Run {
        /// Path to configuration file (defaults are used when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// States to count (comma-separated), overriding the config
        #[arg(short, long)]
        states: Option<String>,

        /// Report path, overriding the config
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Count the given states concurrently and print the results
    Count {
        /// State names (e.g. maryland new_york)
        #[arg(required = true)]
        states: Vec<String>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Block for a number of seconds and report the elapsed time
    Busywork {
        #[arg(short, long, default_value_t = 2)]
        seconds: u64,
    },

    /// Generate a default configuration file
    Init {
        /// Output file path
        #[arg(short, long, default_value = "brewcount.yaml")]
        output: PathBuf,
    },

    /// Validate a configuration file
    Validate {
        /// Path to configuration file
        #[arg(short, long, default_value = "brewcount.yaml")]
        config: PathBuf,
    },
}

fn setup_logging(verbose: bool, json: bool) {
    let env_filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.json);

    match cli.command {
        Commands::Run {
            config,
            states,
            output,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(states) = states {
                config.states = StateQuery::parse_list(&states);
            }
            if let Some(output) = output {
                config.output = output;
            }
            run_comparison(&config).await
        }

        Commands::Count { states, config } => {
            let config = load_config(config.as_deref())?;
            let states = StateQuery::from_args(&states);
            if states.is_empty() {
                anyhow::bail!("No state names given (all were blank)");
            }
            count_states(&config, &states).await
        }

        Commands::Busywork { seconds } => {
            let elapsed = tokio::task::spawn_blocking(move || do_busy_work_secs(seconds))
                .await
                .context("Busy work task failed")?;
            println!("elapsed_time={:.2} seconds", elapsed.as_secs_f64());
            Ok(())
        }

        Commands::Init { output } => init_config(&output),

        Commands::Validate { config } => validate_config(&config),
    }
}

/// Load a config file, or the defaults when no path is given
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            tracing::info!(config = %path.display(), "Loading configuration");
            Config::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))
        }
        None => Ok(Config::default()),
    }
}

/// Concurrent pass, sequential pass, summary, report
async fn run_comparison(config: &Config) -> Result<()> {
    let client = Arc::new(config.to_client().context("Failed to create brewery client")?);

    tracing::info!(
        endpoint = %client.base_url(),
        states = ?config.states.iter().map(StateQuery::as_str).collect::<Vec<_>>(),
        per_page = config.api.per_page,
        "Comparing concurrent and sequential counts"
    );

    let comparison = compare(client, &config.states, config.api.per_page).await;

    print_batch(&comparison.concurrent)?;
    print_batch(&comparison.sequential)?;

    for run in [&comparison.concurrent, &comparison.sequential] {
        for count in run.incomplete() {
            tracing::warn!(
                mode = %run.mode,
                state = %count.result.state,
                partial_count = count.brewery_count(),
                stop = %count.stop,
                "Count is partial"
            );
        }
    }

    if !comparison.results_agree() {
        tracing::warn!("Concurrent and sequential passes returned different counts");
    }

    let summary = comparison.summary();
    println!("{summary}");

    RunReport::new(summary)
        .write_to(&config.output)
        .with_context(|| format!("Failed to write report to {}", config.output.display()))?;

    Ok(())
}

fn print_batch(run: &BatchRun) -> Result<()> {
    let results = serde_json::to_string(&run.results()).context("Failed to serialize results")?;
    println!(
        "brewery counts ({}) -> {results}, retrieved in {:.2} seconds",
        run.mode,
        run.elapsed.as_secs_f64()
    );
    Ok(())
}

/// Count states concurrently and print one JSON result per line
async fn count_states(config: &Config, states: &[StateQuery]) -> Result<()> {
    let client = Arc::new(config.to_client().context("Failed to create brewery client")?);
    let counts = count_concurrent(client, states, config.api.per_page).await;

    for count in counts {
        if !count.is_complete() {
            tracing::warn!(state = %count.result.state, stop = %count.stop, "Count is partial");
        }
        let result: BreweryCountResult = count.into_result();
        println!(
            "{}",
            serde_json::to_string(&result).context("Failed to serialize result")?
        );
    }

    Ok(())
}

/// Generate a default configuration file
fn init_config(output: &Path) -> Result<()> {
    let yaml = Config::default()
        .to_yaml()
        .context("Failed to serialize config")?;

    std::fs::write(output, &yaml)
        .with_context(|| format!("Failed to write config to {}", output.display()))?;

    tracing::info!(path = %output.display(), "Configuration file created");
    println!("Created {}", output.display());
    println!();
    println!("Edit the file to choose states, then run:");
    println!("  brewcount run --config {}", output.display());

    Ok(())
}

/// Validate a configuration file
fn validate_config(path: &Path) -> Result<()> {
    tracing::info!(config = %path.display(), "Validating configuration");

    let config = Config::from_file(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    println!("Configuration is valid!");
    println!();
    println!("Endpoint: {}", config.api.base_url);
    println!("Page size: {}", config.api.per_page);
    println!("Timeout: {:?}", config.api.timeout);
    println!("Report: {}", config.output.display());
    println!("States: {}", config.states.len());

    for state in &config.states {
        println!("  - {state}");
    }

    Ok(())
}

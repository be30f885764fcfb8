use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wator_core::report::write_report_file;
use wator_core::{SimConfig, VictimSweep, World};

/// Wa-Tor predator-prey simulator: run a configured ocean and write the
/// per-iteration population report.
#[derive(Parser, Debug)]
#[command(name = "wator", version)]
struct Cli {
    /// Number of iterations (overrides the config file).
    #[arg(short = 'i', long)]
    iterations: Option<usize>,
    /// Path to the JSON simulation config.
    #[arg(short = 'c', long = "config")]
    config: PathBuf,
    /// Path of the tab-separated report to write.
    #[arg(short = 'o', long = "output")]
    output: PathBuf,
    /// Random seed (overrides the config file).
    #[arg(long)]
    seed: Option<u64>,
    /// Movement sweep policy: `every_cell` or `row_break`.
    #[arg(long)]
    victim_sweep: Option<VictimSweep>,
    /// Optional path for a JSON run summary.
    #[arg(long)]
    summary: Option<PathBuf>,
}

impl Cli {
    fn resolve_config(&self, raw: &str) -> Result<SimConfig> {
        let mut config: SimConfig =
            serde_json::from_str(raw).context("config file is not a valid simulation config")?;
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(sweep) = self.victim_sweep {
            config.victim_sweep = sweep;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let raw = fs::read_to_string(&cli.config)
        .with_context(|| format!("failed to read config {}", cli.config.display()))?;
    let config = cli.resolve_config(&raw)?;
    info!(
        config = %cli.config.display(),
        iterations = config.iterations,
        seed = config.seed,
        "starting simulation"
    );

    let iterations = config.iterations;
    let mut world = World::try_new(config).context("failed to initialize ocean")?;
    let summary = world.try_run(iterations)?;

    write_report_file(&cli.output, &summary.records)
        .with_context(|| format!("failed to write report {}", cli.output.display()))?;
    info!(path = %cli.output.display(), records = summary.records.len(), "report written");

    if let Some(path) = &cli.summary {
        let json = serde_json::to_string_pretty(&summary)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write summary {}", path.display()))?;
        info!(path = %path.display(), "summary written");
    }
    Ok(())
}

//! cpugraph: a real-time CPU utilization graph.
//!
//! Run with:  `RUST_LOG=debug cpugraph --per-core`

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use graph_config::{default_path, load as load_config, validate};
use graph_system::CpuSampler;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Structured logging. RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_path);
    let file_config = load_config(&config_path)
        .with_context(|| format!("loading config from '{}'", config_path.display()))?;
    let mut config = file_config.clone();
    cli.apply(&mut config);
    validate(&config).context("invalid settings")?;

    tracing::info!("cpugraph v{} starting", env!("CARGO_PKG_VERSION"));

    let sampler = CpuSampler::new(config.monitor.sampler)
        .context("CPU monitoring is not available on this system")?;

    graph_window::run(config, file_config, config_path, sampler).map_err(Into::into)
}

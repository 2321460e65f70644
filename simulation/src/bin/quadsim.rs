//! Headless bouncing-boxes collision demo.

use simulation::{SimConfig, Simulation};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("quadsim v{}", env!("CARGO_PKG_VERSION"));

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("quadsim.toml"));
    let config = SimConfig::load_or_create(&path)?;
    info!("Loaded configuration from {}", path.display());
    info!("  World: {}x{}", config.world.width, config.world.height);
    info!("  Entities: {}", config.entities.count);
    info!("  Detection: {:?}", config.detection.method);

    let ticks = config.run.ticks;
    let mut simulation = Simulation::new(config)?;
    let summary = simulation.run(ticks)?;

    info!(
        ticks = summary.ticks,
        total_collisions = summary.total_collisions,
        peak_collisions = summary.peak_collisions,
        peak_nodes = summary.peak_nodes,
        avg_tick_us = summary.average_tick().as_micros() as u64,
        "run finished"
    );

    Ok(())
}

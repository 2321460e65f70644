//! Simulation configuration.

use crate::collisions::DetectionMethod;
use crate::error::{SimError, SimResult};
use common::shapes::Rectangle;
use quadtree::{Config, QueryWindow};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Longest run a config may ask for, one week at 60 ticks per second.
pub const MAX_RUN_TICKS: u64 = 60 * 60 * 60 * 24 * 7;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SimConfig {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub entities: EntitiesConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub run: RunConfig,
}

impl SimConfig {
    /// Load configuration from `path`, writing the defaults there first if
    /// the file does not exist yet.
    pub fn load_or_create(path: &Path) -> SimResult<Self> {
        let config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str(&contents)?
        } else {
            info!(path = %path.display(), "no config found, writing defaults");
            let default_config = Self::default();
            std::fs::write(path, toml::to_string_pretty(&default_config)?)?;
            default_config
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> SimResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        let WorldConfig { width, height } = self.world;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SimError::InvalidWorld { width, height });
        }
        if !(self.run.dt.is_finite() && self.run.dt >= 0.0) {
            return Err(SimError::InvalidTick { dt: self.run.dt });
        }
        if self.run.ticks > MAX_RUN_TICKS {
            return Err(SimError::InvalidRun {
                ticks: self.run.ticks,
            });
        }
        self.query_window()?;
        if self.detection.node_capacity == 0 {
            return Err(quadtree::QuadtreeError::InvalidNodeCapacity {
                node_capacity: 0,
            }
            .into());
        }
        Ok(())
    }

    pub fn world_bounds(&self) -> Rectangle {
        Rectangle::new(0.0, 0.0, self.world.width, self.world.height)
    }

    /// Range the top-left corner of randomly spawned entities is drawn from.
    pub fn spawn_area(&self) -> Rectangle {
        let e = &self.entities;
        Rectangle::new(
            e.spawn_min_x,
            e.spawn_min_y,
            e.spawn_max_x - e.spawn_min_x,
            e.spawn_max_y - e.spawn_min_y,
        )
    }

    pub fn quadtree_config(&self) -> Config {
        Config {
            node_capacity: self.detection.node_capacity,
            max_depth: self.detection.max_depth,
            ..Config::default()
        }
    }

    pub fn query_window(&self) -> SimResult<QueryWindow> {
        Ok(QueryWindow::new(
            self.detection.query_width,
            self.detection.query_height,
        )?)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct WorldConfig {
    #[serde(default = "default_world_width")]
    pub width: f32,
    #[serde(default = "default_world_height")]
    pub height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: default_world_width(),
            height: default_world_height(),
        }
    }
}

fn default_world_width() -> f32 {
    1600.0
}

fn default_world_height() -> f32 {
    900.0
}

/// Spawning and movement settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EntitiesConfig {
    /// Entities spawned at start-up.
    #[serde(default = "default_count")]
    pub count: usize,
    /// Side length of randomly spawned entities.
    #[serde(default = "default_size")]
    pub size: f32,
    /// Side length of entities spawned by `spawn_cluster`.
    #[serde(default = "default_cluster_size")]
    pub cluster_size: f32,
    /// Maximum offset of cluster spawns from their center, per axis.
    #[serde(default = "default_cluster_spread")]
    pub cluster_spread: f32,
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Seed for the simulation's generator.
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_spawn_min")]
    pub spawn_min_x: f32,
    #[serde(default = "default_spawn_min")]
    pub spawn_min_y: f32,
    #[serde(default = "default_spawn_max_x")]
    pub spawn_max_x: f32,
    #[serde(default = "default_spawn_max_y")]
    pub spawn_max_y: f32,
}

impl Default for EntitiesConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            size: default_size(),
            cluster_size: default_cluster_size(),
            cluster_spread: default_cluster_spread(),
            speed: default_speed(),
            seed: default_seed(),
            spawn_min_x: default_spawn_min(),
            spawn_min_y: default_spawn_min(),
            spawn_max_x: default_spawn_max_x(),
            spawn_max_y: default_spawn_max_y(),
        }
    }
}

fn default_count() -> usize {
    500
}

fn default_seed() -> u64 {
    42
}

fn default_size() -> f32 {
    8.0
}

fn default_cluster_size() -> f32 {
    2.0
}

fn default_cluster_spread() -> f32 {
    32.0
}

fn default_speed() -> f32 {
    10.0
}

fn default_spawn_min() -> f32 {
    50.0
}

fn default_spawn_max_x() -> f32 {
    1000.0
}

fn default_spawn_max_y() -> f32 {
    400.0
}

/// Collision detection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DetectionConfig {
    #[serde(default)]
    pub method: DetectionMethod,
    /// Width of the candidate lookup window centered on each entity.
    #[serde(default = "default_query_extent")]
    pub query_width: f32,
    #[serde(default = "default_query_extent")]
    pub query_height: f32,
    #[serde(default = "default_node_capacity")]
    pub node_capacity: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            method: DetectionMethod::default(),
            query_width: default_query_extent(),
            query_height: default_query_extent(),
            node_capacity: default_node_capacity(),
            max_depth: None,
        }
    }
}

fn default_query_extent() -> f32 {
    24.0
}

fn default_node_capacity() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunConfig {
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    /// Seconds per tick.
    #[serde(default = "default_dt")]
    pub dt: f32,
    /// Log a summary every this many ticks; 0 disables periodic logging.
    #[serde(default = "default_log_every")]
    pub log_every: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: default_ticks(),
            dt: default_dt(),
            log_every: default_log_every(),
        }
    }
}

fn default_ticks() -> u64 {
    600
}

fn default_dt() -> f32 {
    0.016
}

fn default_log_every() -> u64 {
    60
}

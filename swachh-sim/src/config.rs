//! Configuration loading for SwachhSim

use serde::Deserialize;
use std::path::Path;

use swachh_map::AgentConfig;

use crate::error::Result;

/// Main configuration structure
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub run: RunConfig,
}

/// World generation settings
#[derive(Clone, Debug, Deserialize)]
pub struct WorldConfig {
    /// Grid width in cells (default: 28)
    #[serde(default = "default_width")]
    pub width: i32,

    /// Grid height in cells (default: 28)
    #[serde(default = "default_height")]
    pub height: i32,

    /// Fraction of empty interior cells filled with obstacles
    /// (default: 0.2)
    #[serde(default = "default_obstacle_ratio")]
    pub obstacle_ratio: f32,

    /// Fraction of the then-remaining empty cells receiving one piece of
    /// trash each (default: 0.5)
    #[serde(default = "default_trash_probability")]
    pub trash_probability: f32,

    /// Number of robots; each gets its own charging station (default: 1)
    #[serde(default = "default_num_robots")]
    pub num_robots: usize,

    /// Pins robot 0 and its station to a fixed cell (default: [1, 1]);
    /// further robots sample distinct empty cells. `None` samples robot 0
    /// as well.
    #[serde(default = "default_start_cell")]
    pub start_cell: Option<[i32; 2]>,
}

/// Run control settings
#[derive(Clone, Debug, Deserialize)]
pub struct RunConfig {
    /// Tick ceiling before the simulation halts (default: 200)
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    /// Master seed; 0 selects entropy for a non-reproducible run
    /// (default: 42)
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_width() -> i32 {
    28
}

fn default_height() -> i32 {
    28
}

fn default_obstacle_ratio() -> f32 {
    0.2
}

fn default_trash_probability() -> f32 {
    0.5
}

fn default_num_robots() -> usize {
    1
}

fn default_start_cell() -> Option<[i32; 2]> {
    Some([1, 1])
}

fn default_max_steps() -> usize {
    200
}

fn default_seed() -> u64 {
    42
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            obstacle_ratio: default_obstacle_ratio(),
            trash_probability: default_trash_probability(),
            num_robots: default_num_robots(),
            start_cell: default_start_cell(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            seed: default_seed(),
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}

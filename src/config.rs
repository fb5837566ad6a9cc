use crate::pathfinding::{Heuristic, SearchParams};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config value `{field}`: {message}")]
    Invalid { field: &'static str, message: String },
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub arena: ArenaConfig,
    #[serde(default)]
    pub pathfinding: PathfindingConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub seekers: SeekersConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArenaConfig {
    #[serde(default = "default_arena_width")]
    pub width: f32,
    #[serde(default = "default_arena_height")]
    pub height: f32,
    #[serde(default = "default_obstacle_count")]
    pub obstacle_count: usize,
    /// Fixed seed for obstacle generation; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathfindingConfig {
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    #[serde(default = "default_step_cost")]
    pub step_cost: f64,
    #[serde(default)]
    pub heuristic: Heuristic,
    #[serde(default = "default_allow_diagonal")]
    pub allow_diagonal: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_player_health")]
    pub health: i32,
    #[serde(default = "default_player_speed")]
    pub speed: f32,
    #[serde(default = "default_entity_size")]
    pub size: f32,
    #[serde(default = "default_fire_interval_ticks")]
    pub fire_interval_ticks: u32,
    #[serde(default = "default_projectile_speed")]
    pub projectile_speed: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeekersConfig {
    #[serde(default = "default_seeker_speed")]
    pub speed: f32,
    #[serde(default = "default_seeker_health")]
    pub health: i32,
    #[serde(default = "default_entity_size")]
    pub size: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

// Default values
fn default_arena_width() -> f32 { 800.0 }
fn default_arena_height() -> f32 { 600.0 }
fn default_obstacle_count() -> usize { 10 }
fn default_cell_size() -> f32 { crate::grid::DEFAULT_CELL_SIZE }
fn default_step_cost() -> f64 { 1.0 }
fn default_allow_diagonal() -> bool { true }
fn default_player_health() -> i32 { 10 }
fn default_player_speed() -> f32 { 5.0 }
fn default_entity_size() -> f32 { 20.0 }
fn default_fire_interval_ticks() -> u32 { 6 }
fn default_projectile_speed() -> f32 { 5.0 }
fn default_seeker_speed() -> f32 { 1.0 }
fn default_seeker_health() -> i32 { 3 }
fn default_log_filter() -> String { "info".to_string() }

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: default_arena_width(),
            height: default_arena_height(),
            obstacle_count: default_obstacle_count(),
            seed: None,
        }
    }
}

impl Default for PathfindingConfig {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            step_cost: default_step_cost(),
            heuristic: Heuristic::default(),
            allow_diagonal: default_allow_diagonal(),
        }
    }
}

impl PathfindingConfig {
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            step_cost: self.step_cost,
            heuristic: self.heuristic,
            allow_diagonal: self.allow_diagonal,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            health: default_player_health(),
            speed: default_player_speed(),
            size: default_entity_size(),
            fire_interval_ticks: default_fire_interval_ticks(),
            projectile_speed: default_projectile_speed(),
        }
    }
}

impl Default for SeekersConfig {
    fn default() -> Self {
        Self {
            speed: default_seeker_speed(),
            health: default_seeker_health(),
            size: default_entity_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or the defaults if the file does not exist.
    /// An existing but unreadable or invalid file is still an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        Config::from_path(path)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pathfinding.cell_size > 0.0) {
            return Err(ConfigError::Invalid {
                field: "pathfinding.cell_size",
                message: format!("must be positive, got {}", self.pathfinding.cell_size),
            });
        }
        if !(self.pathfinding.step_cost > 0.0) {
            return Err(ConfigError::Invalid {
                field: "pathfinding.step_cost",
                message: format!("must be positive, got {}", self.pathfinding.step_cost),
            });
        }
        if self.player.fire_interval_ticks == 0 {
            return Err(ConfigError::Invalid {
                field: "player.fire_interval_ticks",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

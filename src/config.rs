use crate::grid::DEFAULT_OBSTACLE_PROBABILITY;
use crate::spiral::TurnPolicy;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub spawner: SpawnerConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    /// File holding the "width,height" descriptor
    #[serde(default = "default_size_file")]
    pub size_file: String,
    #[serde(default = "default_obstacle_probability")]
    pub obstacle_probability: f64,
    /// Fixed RNG seed; a random one is drawn when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpawnerConfig {
    #[serde(default = "default_tile_categories")]
    pub tile_categories: u32,
    /// Ticks between two spiral placements while spawning
    #[serde(default = "default_ticks_per_spawn")]
    pub ticks_per_spawn: u32,
    #[serde(default)]
    pub turn_policy: TurnPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
    /// Up to ten RGB colours, one per tile category
    #[serde(default = "default_tile_colors")]
    pub tile_colors: Vec<[u8; 3]>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_command_log: bool,
    #[serde(default = "default_command_log_path")]
    pub command_log_path: String,
    /// env_logger filter used when RUST_LOG is not set
    #[serde(default = "default_level")]
    pub level: String,
}

// Default values
fn default_size_file() -> String { "gridSize.txt".to_string() }
fn default_obstacle_probability() -> f64 { DEFAULT_OBSTACLE_PROBABILITY }
fn default_tile_categories() -> u32 { 4 }
fn default_ticks_per_spawn() -> u32 { 1 }
fn default_window_title() -> String { "Spiralfill".to_string() }
fn default_cell_size() -> f32 { 24.0 }
fn default_bg_r() -> u8 { 30 }
fn default_bg_g() -> u8 { 30 }
fn default_bg_b() -> u8 { 30 }
fn default_tile_colors() -> Vec<[u8; 3]> {
    vec![[220, 60, 60], [60, 180, 75], [70, 110, 230], [240, 200, 40]]
}
fn default_command_log_path() -> String { "command_log.json".to_string() }
fn default_level() -> String { "info".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size_file: default_size_file(),
            obstacle_probability: default_obstacle_probability(),
            seed: None,
        }
    }
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            tile_categories: default_tile_categories(),
            ticks_per_spawn: default_ticks_per_spawn(),
            turn_policy: TurnPolicy::default(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            cell_size: default_cell_size(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
            tile_colors: default_tile_colors(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_command_log: false,
            command_log_path: default_command_log_path(),
            level: default_level(),
        }
    }
}

impl Config {
    /// Load configuration from config.toml, or use defaults if it doesn't exist
    pub fn load() -> Self {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from `path`. A missing or broken file yields defaults.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}", path.display(), e);
                    log::warn!("Using default configuration");
                    Config::default()
                }
            },
            Err(_) => {
                log::info!("No {} found, using default configuration", path.display());
                Config::default()
            }
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.grid.size_file, "gridSize.txt");
        assert_eq!(config.grid.obstacle_probability, 0.25);
        assert_eq!(config.grid.seed, None);
        assert_eq!(config.spawner.tile_categories, 4);
        assert_eq!(config.spawner.turn_policy, TurnPolicy::Revisit);
        assert!(!config.logging.enable_command_log);
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml_str(
            r#"
            [grid]
            seed = 99
            obstacle_probability = 0.1

            [spawner]
            turn_policy = "always_advance"
            tile_categories = 6
            "#,
        )
        .unwrap();
        assert_eq!(config.grid.seed, Some(99));
        assert_eq!(config.grid.obstacle_probability, 0.1);
        assert_eq!(config.grid.size_file, "gridSize.txt");
        assert_eq!(config.spawner.turn_policy, TurnPolicy::AlwaysAdvance);
        assert_eq!(config.spawner.tile_categories, 6);
        assert_eq!(config.spawner.ticks_per_spawn, 1);
    }

    #[test]
    fn test_bad_document_is_an_error() {
        assert!(Config::from_toml_str("[grid]\nseed = \"nope\"").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = Config::load_from("no/such/config.toml");
        assert_eq!(config.visual.cell_size, 24.0);
    }
}

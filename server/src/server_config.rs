use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use common::defaults;
use common::game::{GameConfig, GameMode};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub static_files_dir: PathBuf,
    pub board_size: i32,
    pub initial_speed_ms: u64,
    pub speed_increment_ms: u64,
    pub live_tick_ms: u64,
    /// Fixes the simulation seed, for reproducible exhibition runs.
    pub rng_seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5000".to_string(),
            static_files_dir: PathBuf::from("ui"),
            board_size: defaults::BOARD_SIZE,
            initial_speed_ms: defaults::INITIAL_SPEED_MS,
            speed_increment_ms: defaults::SPEED_INCREMENT_MS,
            live_tick_ms: defaults::LIVE_TICK_MS,
            rng_seed: None,
        }
    }
}

impl ServerConfig {
    pub fn load(path: Option<&str>) -> Result<Self, String> {
        let config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read config file {}: {}", path, e))?;
                serde_yaml_ng::from_str(&content)
                    .map_err(|e| format!("Failed to parse config file {}: {}", path, e))?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.board_size < 10 || self.board_size > 100 {
            return Err("Board size must be between 10 and 100".to_string());
        }
        if self.initial_speed_ms < defaults::MIN_SPEED_MS || self.initial_speed_ms > 5000 {
            return Err("Initial speed must be between 50ms and 5000ms".to_string());
        }
        if self.live_tick_ms < defaults::MIN_SPEED_MS || self.live_tick_ms > 5000 {
            return Err("Live tick interval must be between 50ms and 5000ms".to_string());
        }
        Ok(())
    }

    pub fn game_config(&self, mode: GameMode) -> GameConfig {
        GameConfig {
            board_size: self.board_size,
            initial_speed_ms: self.initial_speed_ms,
            speed_increment_ms: self.speed_increment_ms,
            mode,
        }
    }
}

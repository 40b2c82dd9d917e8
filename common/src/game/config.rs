use serde::{Deserialize, Serialize};

use crate::defaults;
use super::types::GameMode;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    pub board_size: i32,
    pub initial_speed_ms: u64,
    pub speed_increment_ms: u64,
    pub mode: GameMode,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: defaults::BOARD_SIZE,
            initial_speed_ms: defaults::INITIAL_SPEED_MS,
            speed_increment_ms: defaults::SPEED_INCREMENT_MS,
            mode: GameMode::Walls,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.board_size < 10 || self.board_size > 100 {
            return Err("Board size must be between 10 and 100".to_string());
        }
        if self.initial_speed_ms < defaults::MIN_SPEED_MS || self.initial_speed_ms > 5000 {
            return Err("Initial speed must be between 50ms and 5000ms".to_string());
        }
        if self.speed_increment_ms > self.initial_speed_ms {
            return Err("Speed increment must not exceed the initial speed".to_string());
        }
        Ok(())
    }
}

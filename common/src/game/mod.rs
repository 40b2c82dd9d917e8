mod ai;
mod config;
mod engine;
mod session;
mod session_rng;
mod types;

pub use ai::{advance_live_player, choose_direction};
pub use config::GameConfig;
pub use engine::{advance_head, check_collision, default_snake, generate_food, wrap_position};
pub use session::{GameSession, StepOutcome};
pub use session_rng::SessionRng;
pub use types::{Direction, GameMode, GameStatus, Position};

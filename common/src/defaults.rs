pub const BOARD_SIZE: i32 = 20;
pub const INITIAL_SPEED_MS: u64 = 150;
pub const SPEED_INCREMENT_MS: u64 = 5;
pub const MIN_SPEED_MS: u64 = 50;
pub const FOOD_SCORE: u32 = 10;
pub const LIVE_TICK_MS: u64 = 200;

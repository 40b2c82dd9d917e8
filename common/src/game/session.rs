use std::collections::VecDeque;

use crate::defaults;
use crate::models::SessionSnapshot;
use super::config::GameConfig;
use super::engine::{advance_head, check_collision, default_snake, generate_food, wrap_position};
use super::session_rng::SessionRng;
use super::types::{Direction, GameMode, GameStatus, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Skipped,
    Moved,
    Ate,
    Died,
}

/// One player's game. Lifecycle transitions not listed in the state machine
/// (start while playing, resume while idle, ...) are silent no-ops.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub config: GameConfig,
    pub snake: VecDeque<Position>,
    pub food: Position,
    pub direction: Direction,
    pub score: u32,
    pub high_score: u32,
    pub status: GameStatus,
    pub speed_ms: u64,
}

impl GameSession {
    pub fn new(config: GameConfig, high_score: u32, rng: &mut SessionRng) -> Self {
        let snake = default_snake(config.board_size);
        let food = generate_food(&snake, config.board_size, rng);

        Self {
            config,
            snake,
            food,
            direction: Direction::Right,
            score: 0,
            high_score,
            status: GameStatus::Idle,
            speed_ms: config.initial_speed_ms,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.config.mode
    }

    pub fn head(&self) -> Position {
        *self.snake.front().expect("snake body is never empty")
    }

    fn reset_board(&mut self, rng: &mut SessionRng) {
        self.snake = default_snake(self.config.board_size);
        self.food = generate_food(&self.snake, self.config.board_size, rng);
        self.direction = Direction::Right;
        self.score = 0;
        self.speed_ms = self.config.initial_speed_ms;
    }

    pub fn start(&mut self, rng: &mut SessionRng) {
        if self.status == GameStatus::Idle || self.status == GameStatus::GameOver {
            self.reset_board(rng);
            self.status = GameStatus::Playing;
        }
    }

    pub fn pause(&mut self) {
        if self.status == GameStatus::Playing {
            self.status = GameStatus::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.status == GameStatus::Paused {
            self.status = GameStatus::Playing;
        }
    }

    pub fn reset(&mut self, rng: &mut SessionRng) {
        self.reset_board(rng);
        self.status = GameStatus::Idle;
    }

    /// Latches a direction intent for the next tick. Intents received while
    /// not playing, or equal to the opposite of the latched direction, are
    /// dropped.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.status != GameStatus::Playing {
            return;
        }
        if direction.is_opposite(&self.direction) {
            return;
        }
        self.direction = direction;
    }

    /// Advances the game by exactly one tick.
    pub fn step(&mut self, rng: &mut SessionRng) -> StepOutcome {
        if self.status != GameStatus::Playing {
            return StepOutcome::Skipped;
        }

        let mut new_head = advance_head(self.head(), self.direction);
        if self.config.mode == GameMode::PassThrough {
            new_head = wrap_position(new_head, self.config.board_size);
        }

        // Checked against the pre-move body: moving into the cell the tail
        // is about to vacate still kills.
        if check_collision(new_head, &self.snake, self.config.board_size, self.config.mode) {
            self.status = GameStatus::GameOver;
            return StepOutcome::Died;
        }

        self.snake.push_front(new_head);

        if new_head == self.food {
            self.score += defaults::FOOD_SCORE;
            if self.score > self.high_score {
                self.high_score = self.score;
            }
            self.speed_ms = self
                .speed_ms
                .saturating_sub(self.config.speed_increment_ms)
                .max(defaults::MIN_SPEED_MS);
            self.food = generate_food(&self.snake, self.config.board_size, rng);
            StepOutcome::Ate
        } else {
            self.snake.pop_back();
            StepOutcome::Moved
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            snake: self.snake.clone(),
            food: self.food,
            direction: self.direction,
            score: self.score,
            high_score: self.high_score,
            game_state: self.status,
            speed: self.speed_ms,
            mode: self.config.mode,
            board_size: self.config.board_size,
        }
    }
}

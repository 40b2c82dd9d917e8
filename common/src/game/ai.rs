use std::collections::VecDeque;

use crate::defaults;
use crate::models::LivePlayer;
use super::engine::{advance_head, check_collision, default_snake, generate_food, wrap_position};
use super::session_rng::SessionRng;
use super::types::{Direction, GameMode, Position};

/// Probability of steering toward the food instead of wandering.
const FOOD_BIAS: f32 = 0.7;

/// Picks the next direction for an exhibition player: never the reverse of
/// the current one, biased toward the food along the axis with the larger
/// distance, otherwise uniform among the remaining candidates.
pub fn choose_direction(
    snake: &VecDeque<Position>,
    food: Position,
    direction: Direction,
    rng: &mut SessionRng,
) -> Direction {
    let head = *snake.front().expect("snake body is never empty");
    let candidates: Vec<Direction> = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ]
    .into_iter()
    .filter(|d| !d.is_opposite(&direction))
    .collect();

    if rng.random::<f32>() < FOOD_BIAS {
        let dx = food.x - head.x;
        let dy = food.y - head.y;

        if dx.abs() > dy.abs() {
            if dx > 0 && candidates.contains(&Direction::Right) {
                return Direction::Right;
            }
            if dx < 0 && candidates.contains(&Direction::Left) {
                return Direction::Left;
            }
        } else {
            if dy > 0 && candidates.contains(&Direction::Down) {
                return Direction::Down;
            }
            if dy < 0 && candidates.contains(&Direction::Up) {
                return Direction::Up;
            }
        }
    }

    candidates[rng.random_range(0..candidates.len())]
}

/// Applies one AI tick: same movement, wrapping, collision and food rules
/// as a player session, except that a fatal move respawns the player in
/// place instead of ending the game.
pub fn advance_live_player(player: &mut LivePlayer, board_size: i32, rng: &mut SessionRng) {
    let direction = choose_direction(&player.snake, player.food, player.direction, rng);
    player.direction = direction;

    let head = *player.snake.front().expect("snake body is never empty");
    let mut new_head = advance_head(head, direction);
    if player.mode == GameMode::PassThrough {
        new_head = wrap_position(new_head, board_size);
    }

    if check_collision(new_head, &player.snake, board_size, player.mode) {
        player.snake = default_snake(board_size);
        player.score = 0;
        player.direction = Direction::Right;
        player.food = generate_food(&player.snake, board_size, rng);
        return;
    }

    player.snake.push_front(new_head);

    if new_head == player.food {
        player.score += defaults::FOOD_SCORE;
        player.food = generate_food(&player.snake, board_size, rng);
    } else {
        player.snake.pop_back();
    }
}

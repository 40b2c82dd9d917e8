use std::collections::VecDeque;

use super::session_rng::SessionRng;
use super::types::{Direction, GameMode, Position};

pub fn advance_head(head: Position, direction: Direction) -> Position {
    match direction {
        Direction::Up => Position::new(head.x, head.y - 1),
        Direction::Down => Position::new(head.x, head.y + 1),
        Direction::Left => Position::new(head.x - 1, head.y),
        Direction::Right => Position::new(head.x + 1, head.y),
    }
}

pub fn wrap_position(pos: Position, board_size: i32) -> Position {
    Position::new(
        ((pos.x % board_size) + board_size) % board_size,
        ((pos.y % board_size) + board_size) % board_size,
    )
}

/// `head` is the prospective new head, tested before it is prepended, so
/// segment 0 is excluded from the self-collision scan. In pass-through mode
/// the caller wraps the head first; an out-of-range head there is a caller
/// error and is not flagged.
pub fn check_collision(
    head: Position,
    snake: &VecDeque<Position>,
    board_size: i32,
    mode: GameMode,
) -> bool {
    if snake.iter().skip(1).any(|segment| *segment == head) {
        return true;
    }

    if mode == GameMode::Walls
        && (head.x < 0 || head.x >= board_size || head.y < 0 || head.y >= board_size)
    {
        return true;
    }

    false
}

/// Rejection-samples a cell that is not occupied by the snake.
/// Precondition: the snake covers fewer than `board_size * board_size` cells.
pub fn generate_food(
    snake: &VecDeque<Position>,
    board_size: i32,
    rng: &mut SessionRng,
) -> Position {
    loop {
        let candidate = Position::new(
            rng.random_range(0..board_size),
            rng.random_range(0..board_size),
        );
        if !snake.contains(&candidate) {
            return candidate;
        }
    }
}

pub fn default_snake(board_size: i32) -> VecDeque<Position> {
    let mid = board_size / 2;
    VecDeque::from([
        Position::new(mid, mid),
        Position::new(mid - 1, mid),
        Position::new(mid - 2, mid),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_food_stays_in_bounds() {
        let snake = VecDeque::from([Position::new(10, 10)]);
        let mut rng = SessionRng::new(7);

        for _ in 0..100 {
            let food = generate_food(&snake, 20, &mut rng);
            assert!(food.x >= 0 && food.x < 20);
            assert!(food.y >= 0 && food.y < 20);
        }
    }

    #[test]
    fn test_generate_food_avoids_snake() {
        let snake = default_snake(20);
        let mut rng = SessionRng::new(7);

        for _ in 0..100 {
            let food = generate_food(&snake, 20, &mut rng);
            assert!(!snake.contains(&food));
        }
    }

    #[test]
    fn test_generate_food_finds_last_free_cell() {
        let mut snake = VecDeque::new();
        for x in 0..3 {
            for y in 0..3 {
                if !(x == 2 && y == 2) {
                    snake.push_back(Position::new(x, y));
                }
            }
        }
        let mut rng = SessionRng::new(7);

        assert_eq!(generate_food(&snake, 3, &mut rng), Position::new(2, 2));
    }

    #[test]
    fn test_wrap_position_is_identity_in_range() {
        assert_eq!(wrap_position(Position::new(10, 10), 20), Position::new(10, 10));
        assert_eq!(wrap_position(Position::new(0, 19), 20), Position::new(0, 19));
    }

    #[test]
    fn test_wrap_position_edges() {
        assert_eq!(wrap_position(Position::new(20, 10), 20), Position::new(0, 10));
        assert_eq!(wrap_position(Position::new(-1, 10), 20), Position::new(19, 10));
        assert_eq!(wrap_position(Position::new(10, 20), 20), Position::new(10, 0));
        assert_eq!(wrap_position(Position::new(10, -1), 20), Position::new(10, 19));
    }

    #[test]
    fn test_wrap_position_corner() {
        assert_eq!(wrap_position(Position::new(-1, -1), 20), Position::new(19, 19));
    }

    #[test]
    fn test_check_collision_detects_self_overlap() {
        let snake = VecDeque::from([
            Position::new(10, 10),
            Position::new(10, 11),
            Position::new(10, 12),
            Position::new(10, 10),
        ]);
        let head = Position::new(10, 10);

        assert!(check_collision(head, &snake, 20, GameMode::Walls));
        assert!(check_collision(head, &snake, 20, GameMode::PassThrough));
    }

    #[test]
    fn test_check_collision_ignores_adjacent_body() {
        let snake = default_snake(20);
        let head = Position::new(10, 10);

        assert!(!check_collision(head, &snake, 20, GameMode::Walls));
    }

    #[test]
    fn test_check_collision_includes_tail_cell() {
        // The pre-move body is checked whole, so the cell the tail is about
        // to vacate still counts as occupied.
        let snake = VecDeque::from([
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(4, 6),
        ]);
        let tail = Position::new(4, 6);

        assert!(check_collision(tail, &snake, 20, GameMode::Walls));
        assert!(check_collision(tail, &snake, 20, GameMode::PassThrough));
    }

    #[test]
    fn test_check_collision_walls_mode_bounds() {
        let snake = VecDeque::from([Position::new(0, 0)]);

        assert!(check_collision(Position::new(-1, 5), &snake, 20, GameMode::Walls));
        assert!(check_collision(Position::new(20, 5), &snake, 20, GameMode::Walls));
        assert!(check_collision(Position::new(5, -1), &snake, 20, GameMode::Walls));
        assert!(check_collision(Position::new(5, 20), &snake, 20, GameMode::Walls));
        assert!(!check_collision(Position::new(5, 5), &snake, 20, GameMode::Walls));
    }

    #[test]
    fn test_check_collision_pass_through_ignores_bounds() {
        let snake = VecDeque::from([Position::new(0, 0)]);

        assert!(!check_collision(Position::new(-1, 5), &snake, 20, GameMode::PassThrough));
        assert!(!check_collision(Position::new(20, 5), &snake, 20, GameMode::PassThrough));
        assert!(!check_collision(Position::new(5, -1), &snake, 20, GameMode::PassThrough));
        assert!(!check_collision(Position::new(5, 20), &snake, 20, GameMode::PassThrough));
    }

    #[test]
    fn test_advance_head_moves_one_cell() {
        let head = Position::new(10, 10);

        assert_eq!(advance_head(head, Direction::Up), Position::new(10, 9));
        assert_eq!(advance_head(head, Direction::Down), Position::new(10, 11));
        assert_eq!(advance_head(head, Direction::Left), Position::new(9, 10));
        assert_eq!(advance_head(head, Direction::Right), Position::new(11, 10));
    }
}

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::game::{Direction, GameMode, GameStatus, Position};
use crate::identifiers::PlayerId;

/// Envelope shared by every REST endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthCredentials {
    pub email: String,
    pub password: String,
    pub username: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: String,
    pub rank: u32,
    pub username: String,
    pub score: u32,
    pub mode: GameMode,
    pub date: String,
}

/// An AI exhibition player. No lifecycle status: it runs from the moment it
/// is registered until the process exits.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LivePlayer {
    pub id: PlayerId,
    pub username: String,
    pub score: u32,
    pub mode: GameMode,
    pub snake: VecDeque<Position>,
    pub food: Position,
    pub direction: Direction,
    pub viewers: u32,
}

/// What a renderer reads on every tick.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub snake: VecDeque<Position>,
    pub food: Position,
    pub direction: Direction,
    pub score: u32,
    pub high_score: u32,
    pub game_state: GameStatus,
    pub speed: u64,
    pub mode: GameMode,
    pub board_size: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_mode_wire_names() {
        assert_eq!(serde_json::to_string(&GameMode::Walls).unwrap(), "\"walls\"");
        assert_eq!(
            serde_json::to_string(&GameMode::PassThrough).unwrap(),
            "\"pass-through\""
        );
    }

    #[test]
    fn test_direction_wire_names() {
        assert_eq!(serde_json::to_string(&Direction::Up).unwrap(), "\"UP\"");
        let parsed: Direction = serde_json::from_str("\"LEFT\"").unwrap();
        assert_eq!(parsed, Direction::Left);
    }

    #[test]
    fn test_api_response_shapes() {
        let ok = ApiResponse::ok(1u32);
        assert!(ok.success);
        assert_eq!(ok.data, Some(1));

        let err: ApiResponse<u32> = ApiResponse::err("nope");
        assert!(!err.success);
        assert_eq!(err.error.as_deref(), Some("nope"));
    }
}

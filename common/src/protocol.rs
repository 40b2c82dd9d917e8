use serde::{Deserialize, Serialize};

use crate::game::{Direction, GameMode};
use crate::models::{LeaderboardEntry, SessionSnapshot};

/// Commands a browser sends over the playable-session WebSocket.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientCommand {
    Login {
        username: String,
    },
    Start {
        #[serde(default)]
        mode: Option<GameMode>,
    },
    Pause,
    Resume,
    Reset,
    Turn {
        direction: Direction,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    State {
        state: SessionSnapshot,
    },
    /// Sent after the session transitions into game-over. `entry` carries
    /// the accepted leaderboard row; `notice` a recoverable submission
    /// failure. Both are absent for a zero score.
    GameOver {
        score: u32,
        mode: GameMode,
        entry: Option<LeaderboardEntry>,
        notice: Option<String>,
    },
    Error {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_command_round_trip() {
        let parsed: ClientCommand =
            serde_json::from_str(r#"{"type":"turn","direction":"DOWN"}"#).unwrap();
        match parsed {
            ClientCommand::Turn { direction } => assert_eq!(direction, Direction::Down),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_start_command_mode_is_optional() {
        let parsed: ClientCommand = serde_json::from_str(r#"{"type":"start"}"#).unwrap();
        match parsed {
            ClientCommand::Start { mode } => assert!(mode.is_none()),
            other => panic!("unexpected command: {:?}", other),
        }

        let parsed: ClientCommand =
            serde_json::from_str(r#"{"type":"start","mode":"pass-through"}"#).unwrap();
        match parsed {
            ClientCommand::Start { mode } => assert_eq!(mode, Some(GameMode::PassThrough)),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Local;
use tokio::sync::Mutex;

use common::game::GameMode;
use common::log;
use common::models::{AuthCredentials, LeaderboardEntry, User};

struct StoredUser {
    user: User,
    password: String,
}

struct StoreInner {
    users: HashMap<String, StoredUser>,
    leaderboard: Vec<LeaderboardEntry>,
    high_scores: HashMap<GameMode, u32>,
    next_entry_id: u64,
    next_user_id: u64,
}

/// In-memory datastore for users, leaderboard rows and per-mode high
/// scores. Owned explicitly and handed to handlers through the router
/// state; there is no process-wide instance.
#[derive(Clone)]
pub struct AppStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AppStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                users: HashMap::new(),
                leaderboard: Vec::new(),
                high_scores: HashMap::new(),
                next_entry_id: 1,
                next_user_id: 1,
            })),
        }
    }

    /// Loads the fixture users and leaderboard rows the service ships with.
    pub async fn seed(&self) {
        let mut inner = self.inner.lock().await;

        let users = [
            ("1", "PixelMaster", "player1@example.com"),
            ("2", "SnakeKing", "player2@example.com"),
            ("3", "RetroGamer", "player3@example.com"),
            ("4", "NeonHunter", "player4@example.com"),
            ("5", "ArcadeWizard", "player5@example.com"),
        ];
        for (id, username, email) in users {
            inner.users.insert(
                email.to_string(),
                StoredUser {
                    user: User {
                        id: id.to_string(),
                        username: username.to_string(),
                        email: email.to_string(),
                        created_at: "2024-01-15 00:00:00".to_string(),
                    },
                    password: "password123".to_string(),
                },
            );
        }
        inner.next_user_id = users.len() as u64 + 1;

        let rows = [
            ("1", 1, "PixelMaster", 2450, GameMode::Walls, "2024-12-01"),
            ("2", 2, "SnakeKing", 2120, GameMode::PassThrough, "2024-12-02"),
            ("3", 3, "RetroGamer", 1890, GameMode::Walls, "2024-11-28"),
            ("4", 4, "NeonHunter", 1750, GameMode::PassThrough, "2024-11-30"),
            ("5", 5, "ArcadeWizard", 1620, GameMode::Walls, "2024-12-01"),
            ("6", 6, "ByteCrusher", 1480, GameMode::PassThrough, "2024-11-25"),
            ("7", 7, "GlitchMaster", 1350, GameMode::Walls, "2024-11-29"),
            ("8", 8, "PixelPunk", 1200, GameMode::PassThrough, "2024-12-02"),
            ("9", 9, "CyberSnake", 1050, GameMode::Walls, "2024-11-27"),
            ("10", 10, "DataViper", 980, GameMode::PassThrough, "2024-11-26"),
        ];
        for (id, rank, username, score, mode, date) in rows {
            inner.leaderboard.push(LeaderboardEntry {
                id: id.to_string(),
                rank,
                username: username.to_string(),
                score,
                mode,
                date: date.to_string(),
            });
        }
        inner.next_entry_id = rows.len() as u64 + 1;

        log!(
            "Store seeded: {} users, {} leaderboard entries",
            inner.users.len(),
            inner.leaderboard.len()
        );
    }

    pub async fn login(&self, credentials: &AuthCredentials) -> Result<User, String> {
        let inner = self.inner.lock().await;
        match inner.users.get(&credentials.email) {
            Some(stored) if stored.password == credentials.password => Ok(stored.user.clone()),
            _ => Err("Invalid email or password".to_string()),
        }
    }

    pub async fn signup(&self, credentials: &AuthCredentials) -> Result<User, String> {
        let mut inner = self.inner.lock().await;

        if inner.users.contains_key(&credentials.email) {
            return Err("Email already registered".to_string());
        }
        let username = match credentials.username.as_deref() {
            Some(username) if !username.is_empty() => username.to_string(),
            _ => return Err("Username is required".to_string()),
        };

        let user = User {
            id: format!("user_{}", inner.next_user_id),
            username,
            email: credentials.email.clone(),
            created_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };
        inner.next_user_id += 1;
        inner.users.insert(
            credentials.email.clone(),
            StoredUser {
                user: user.clone(),
                password: credentials.password.clone(),
            },
        );

        log!("New user registered: {}", user.username);
        Ok(user)
    }

    pub async fn list_leaderboard(&self, mode: Option<GameMode>) -> Vec<LeaderboardEntry> {
        let inner = self.inner.lock().await;
        match mode {
            Some(mode) => inner
                .leaderboard
                .iter()
                .filter(|entry| entry.mode == mode)
                .cloned()
                .collect(),
            None => inner.leaderboard.clone(),
        }
    }

    /// Inserts a score and recomputes all ranks. The submitting player must
    /// match a registered username.
    pub async fn submit_score(
        &self,
        username: Option<&str>,
        score: u32,
        mode: GameMode,
    ) -> Result<LeaderboardEntry, String> {
        let mut inner = self.inner.lock().await;

        let known = username
            .map(|name| inner.users.values().any(|stored| stored.user.username == name))
            .unwrap_or(false);
        let Some(username) = username.filter(|_| known) else {
            return Err("Must be logged in to submit score".to_string());
        };

        let id = format!("score_{}", inner.next_entry_id);
        inner.next_entry_id += 1;
        inner.leaderboard.push(LeaderboardEntry {
            id: id.clone(),
            rank: 0,
            username: username.to_string(),
            score,
            mode,
            date: Local::now().format("%Y-%m-%d").to_string(),
        });

        inner.leaderboard.sort_by(|a, b| b.score.cmp(&a.score));
        for (index, entry) in inner.leaderboard.iter_mut().enumerate() {
            entry.rank = index as u32 + 1;
        }

        let entry = inner
            .leaderboard
            .iter()
            .find(|entry| entry.id == id)
            .cloned()
            .expect("entry was just inserted");
        log!(
            "Score submitted: {} points by {} ({}), rank {}",
            entry.score,
            entry.username,
            entry.mode,
            entry.rank
        );
        Ok(entry)
    }

    pub async fn high_score(&self, mode: GameMode) -> u32 {
        let inner = self.inner.lock().await;
        inner.high_scores.get(&mode).copied().unwrap_or(0)
    }

    pub async fn record_high_score(&self, mode: GameMode, score: u32) {
        let mut inner = self.inner.lock().await;
        let current = inner.high_scores.entry(mode).or_insert(0);
        if score > *current {
            log!("New {} high score: {}", mode, score);
            *current = score;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded_store() -> AppStore {
        common::logger::init_logger(None);
        let store = AppStore::new();
        store.seed().await;
        store
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let store = seeded_store().await;
        let credentials = AuthCredentials {
            email: "player1@example.com".to_string(),
            password: "wrong".to_string(),
            username: None,
        };

        let result = store.login(&credentials).await;
        assert_eq!(result.unwrap_err(), "Invalid email or password");
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let store = seeded_store().await;
        let credentials = AuthCredentials {
            email: "new@example.com".to_string(),
            password: "hunter2".to_string(),
            username: Some("Newcomer".to_string()),
        };

        let user = store.signup(&credentials).await.unwrap();
        assert_eq!(user.username, "Newcomer");

        let logged_in = store.login(&credentials).await.unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[tokio::test]
    async fn test_signup_rejects_duplicate_email() {
        let store = seeded_store().await;
        let credentials = AuthCredentials {
            email: "player1@example.com".to_string(),
            password: "password123".to_string(),
            username: Some("Impostor".to_string()),
        };

        let result = store.signup(&credentials).await;
        assert_eq!(result.unwrap_err(), "Email already registered");
    }

    #[tokio::test]
    async fn test_signup_requires_username() {
        let store = seeded_store().await;
        let credentials = AuthCredentials {
            email: "new@example.com".to_string(),
            password: "hunter2".to_string(),
            username: None,
        };

        let result = store.signup(&credentials).await;
        assert_eq!(result.unwrap_err(), "Username is required");
    }

    #[tokio::test]
    async fn test_submit_requires_known_username() {
        let store = seeded_store().await;

        let anonymous = store.submit_score(None, 500, GameMode::Walls).await;
        assert_eq!(anonymous.unwrap_err(), "Must be logged in to submit score");

        let unknown = store.submit_score(Some("Nobody"), 500, GameMode::Walls).await;
        assert_eq!(unknown.unwrap_err(), "Must be logged in to submit score");
    }

    #[tokio::test]
    async fn test_submit_ranks_new_entry() {
        let store = seeded_store().await;

        let entry = store
            .submit_score(Some("SnakeKing"), 2000, GameMode::Walls)
            .await
            .unwrap();

        assert_eq!(entry.rank, 3);
        assert_eq!(entry.score, 2000);

        let board = store.list_leaderboard(None).await;
        assert_eq!(board.len(), 11);
        for (index, entry) in board.iter().enumerate() {
            assert_eq!(entry.rank, index as u32 + 1);
        }
        for pair in board.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[tokio::test]
    async fn test_leaderboard_mode_filter() {
        let store = seeded_store().await;

        let walls = store.list_leaderboard(Some(GameMode::Walls)).await;
        assert_eq!(walls.len(), 5);
        assert!(walls.iter().all(|entry| entry.mode == GameMode::Walls));

        let pass = store.list_leaderboard(Some(GameMode::PassThrough)).await;
        assert_eq!(pass.len(), 5);
        assert!(pass.iter().all(|entry| entry.mode == GameMode::PassThrough));
    }

    #[tokio::test]
    async fn test_high_score_only_rises() {
        let store = seeded_store().await;

        store.record_high_score(GameMode::Walls, 100).await;
        store.record_high_score(GameMode::Walls, 50).await;

        assert_eq!(store.high_score(GameMode::Walls).await, 100);
        assert_eq!(store.high_score(GameMode::PassThrough).await, 0);
    }
}

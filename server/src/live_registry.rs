use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::time::{interval, MissedTickBehavior};

use common::game::{advance_live_player, default_snake, generate_food, Direction, GameMode, SessionRng};
use common::log;
use common::models::LivePlayer;
use common::PlayerId;

pub type WatchSender = mpsc::Sender<LivePlayer>;
pub type WatchReceiver = mpsc::Receiver<LivePlayer>;

struct RegistryInner {
    players: HashMap<PlayerId, LivePlayer>,
    watchers: HashMap<PlayerId, HashMap<u64, WatchSender>>,
    next_watcher_id: u64,
}

/// Registry of AI exhibition players. Each player's record is advanced by
/// exactly one task (spawned in `spawn_player_task`); everyone else only
/// reads snapshots. Viewer counts change on watch/unwatch, serialized by
/// the registry lock.
#[derive(Clone)]
pub struct LiveRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl Default for LiveRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(RegistryInner {
                players: HashMap::new(),
                watchers: HashMap::new(),
                next_watcher_id: 1,
            })),
        }
    }

    pub async fn register_player(&self, player: LivePlayer) {
        log!("Live player registered: {} ({})", player.username, player.id);
        let mut inner = self.inner.lock().await;
        inner.players.insert(player.id.clone(), player);
    }

    pub async fn list_players(&self) -> Vec<LivePlayer> {
        let inner = self.inner.lock().await;
        let mut players: Vec<LivePlayer> = inner.players.values().cloned().collect();
        players.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        players
    }

    pub async fn get_player(&self, id: &PlayerId) -> Option<LivePlayer> {
        let inner = self.inner.lock().await;
        inner.players.get(id).cloned()
    }

    /// Applies one AI tick to one player and fans the new snapshot out to
    /// its watchers. Returns None when the player is unknown.
    pub async fn advance_player(
        &self,
        id: &PlayerId,
        board_size: i32,
        rng: &mut SessionRng,
    ) -> Option<LivePlayer> {
        let (snapshot, senders) = {
            let mut inner = self.inner.lock().await;
            let player = inner.players.get_mut(id)?;
            advance_live_player(player, board_size, rng);
            let snapshot = player.clone();
            let senders: Vec<WatchSender> = inner
                .watchers
                .get(id)
                .map(|watchers| watchers.values().cloned().collect())
                .unwrap_or_default();
            (snapshot, senders)
        };

        // A lagging viewer drops frames rather than stalling the simulation.
        for sender in senders {
            let _ = sender.try_send(snapshot.clone());
        }

        Some(snapshot)
    }

    /// Subscribes a viewer to a player's stream and bumps the viewer count.
    pub async fn watch(&self, id: &PlayerId) -> Option<(u64, WatchReceiver)> {
        let mut inner = self.inner.lock().await;
        if !inner.players.contains_key(id) {
            return None;
        }

        let (tx, rx) = mpsc::channel(16);
        let watcher_id = inner.next_watcher_id;
        inner.next_watcher_id += 1;
        inner
            .watchers
            .entry(id.clone())
            .or_default()
            .insert(watcher_id, tx);
        if let Some(player) = inner.players.get_mut(id) {
            player.viewers += 1;
        }

        Some((watcher_id, rx))
    }

    pub async fn unwatch(&self, id: &PlayerId, watcher_id: u64) {
        let mut inner = self.inner.lock().await;
        if let Some(watchers) = inner.watchers.get_mut(id) {
            watchers.remove(&watcher_id);
            if watchers.is_empty() {
                inner.watchers.remove(id);
            }
        }
        if let Some(player) = inner.players.get_mut(id) {
            player.viewers = player.viewers.saturating_sub(1);
        }
    }

    /// Spawns the task that owns this player's simulation cadence.
    pub fn spawn_player_task(
        &self,
        id: PlayerId,
        board_size: i32,
        tick: Duration,
        mut rng: SessionRng,
    ) {
        let registry = self.clone();
        tokio::spawn(async move {
            let mut ticker = interval(tick);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if registry.advance_player(&id, board_size, &mut rng).await.is_none() {
                    log!("Live player {} gone, stopping simulation", id);
                    break;
                }
            }
        });
    }
}

/// The five AI players the spectator page ships with.
pub fn exhibition_lineup(board_size: i32, rng: &mut SessionRng) -> Vec<LivePlayer> {
    let lineup = [
        ("live1", "AIPlayer_Alpha", GameMode::Walls, 23),
        ("live2", "AIPlayer_Beta", GameMode::PassThrough, 45),
        ("live3", "AIPlayer_Gamma", GameMode::Walls, 12),
        ("live4", "AIPlayer_Delta", GameMode::PassThrough, 67),
        ("live5", "AIPlayer_Epsilon", GameMode::Walls, 34),
    ];

    lineup
        .into_iter()
        .map(|(id, username, mode, viewers)| {
            let snake = default_snake(board_size);
            let food = generate_food(&snake, board_size, rng);
            LivePlayer {
                id: PlayerId::new(id),
                username: username.to_string(),
                score: 0,
                mode,
                snake,
                food,
                direction: Direction::Right,
                viewers,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lineup_for_tests() -> Vec<LivePlayer> {
        let mut rng = SessionRng::new(5);
        exhibition_lineup(20, &mut rng)
    }

    #[tokio::test]
    async fn test_list_players_is_sorted_by_id() {
        common::logger::init_logger(None);
        let registry = LiveRegistry::new();
        for player in lineup_for_tests().into_iter().rev() {
            registry.register_player(player).await;
        }

        let players = registry.list_players().await;
        assert_eq!(players.len(), 5);
        for pair in players.windows(2) {
            assert!(pair[0].id.as_str() < pair[1].id.as_str());
        }
    }

    #[tokio::test]
    async fn test_advance_unknown_player_returns_none() {
        common::logger::init_logger(None);
        let registry = LiveRegistry::new();
        let mut rng = SessionRng::new(5);

        let result = registry
            .advance_player(&PlayerId::new("missing"), 20, &mut rng)
            .await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_watch_bumps_viewers_and_streams_ticks() {
        common::logger::init_logger(None);
        let registry = LiveRegistry::new();
        let player = lineup_for_tests().remove(0);
        let id = player.id.clone();
        let before = player.viewers;
        registry.register_player(player).await;

        let (watcher_id, mut rx) = registry.watch(&id).await.unwrap();
        assert_eq!(registry.get_player(&id).await.unwrap().viewers, before + 1);

        let mut rng = SessionRng::new(5);
        let advanced = registry.advance_player(&id, 20, &mut rng).await.unwrap();
        let streamed = rx.recv().await.unwrap();
        assert_eq!(streamed.snake, advanced.snake);
        assert_eq!(streamed.viewers, advanced.viewers);

        registry.unwatch(&id, watcher_id).await;
        assert_eq!(registry.get_player(&id).await.unwrap().viewers, before);
    }

    #[tokio::test]
    async fn test_watch_unknown_player_is_rejected() {
        let registry = LiveRegistry::new();
        assert!(registry.watch(&PlayerId::new("missing")).await.is_none());
    }
}

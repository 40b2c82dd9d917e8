use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use common::game::{GameMode, GameSession, GameStatus, SessionRng, StepOutcome};
use common::log;
use common::protocol::{ClientCommand, ServerEvent};

use crate::web_server::WebServerState;

pub async fn game_ws_upgrade(
    ws: WebSocketUpgrade,
    State(state): State<WebServerState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_game_socket(socket, state))
}

/// One playable session per connection. The tick loop owns the session;
/// commands arrive on the same task, so a direction change only mutates
/// the latched direction seen by the next tick.
async fn handle_game_socket(socket: WebSocket, state: WebServerState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerEvent>(128);

    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let payload = serde_json::to_string(&event).expect("server event serializes");
            if ws_sender.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    let mut rng = SessionRng::from_random();
    let initial_high_score = state.store.high_score(GameMode::Walls).await;
    let mut session = GameSession::new(
        state.config.game_config(GameMode::Walls),
        initial_high_score,
        &mut rng,
    );
    let mut username: Option<String> = None;

    log!("Game session opened (seed {})", rng.seed());
    send_event(&tx, ServerEvent::State { state: session.snapshot() }).await;

    let mut ticker = new_ticker(session.speed_ms);

    loop {
        tokio::select! {
            _ = ticker.tick(), if session.status == GameStatus::Playing => {
                let outcome = session.step(&mut rng);
                match outcome {
                    StepOutcome::Ate => {
                        // Speed changed, re-arm the timer at the new cadence.
                        ticker = new_ticker(session.speed_ms);
                    }
                    StepOutcome::Died => {
                        handle_game_over(&state, &session, username.as_deref(), &tx).await;
                    }
                    StepOutcome::Moved | StepOutcome::Skipped => {}
                }
                send_event(&tx, ServerEvent::State { state: session.snapshot() }).await;
            }
            incoming = ws_receiver.next() => {
                let message = match incoming {
                    Some(Ok(message)) => message,
                    Some(Err(_)) | None => break,
                };
                let text = match message {
                    Message::Text(text) => text,
                    Message::Close(_) => break,
                    _ => continue,
                };

                let command: ClientCommand = match serde_json::from_str(&text) {
                    Ok(command) => command,
                    Err(e) => {
                        send_event(&tx, ServerEvent::Error {
                            message: format!("Invalid command: {}", e),
                        }).await;
                        continue;
                    }
                };

                if apply_command(command, &mut session, &mut username, &mut rng, &state).await {
                    ticker = new_ticker(session.speed_ms);
                }
                send_event(&tx, ServerEvent::State { state: session.snapshot() }).await;
            }
        }
    }

    log!("Game session closed");
    send_task.abort();
}

/// Applies one client command. Returns true when the tick timer must be
/// re-armed (speed or run state changed).
async fn apply_command(
    command: ClientCommand,
    session: &mut GameSession,
    username: &mut Option<String>,
    rng: &mut SessionRng,
    state: &WebServerState,
) -> bool {
    match command {
        ClientCommand::Login { username: name } => {
            log!("Game session identified as {}", name);
            *username = Some(name);
            false
        }
        ClientCommand::Start { mode } => {
            if session.status != GameStatus::Idle && session.status != GameStatus::GameOver {
                return false;
            }
            // Mode is fixed per game, so it can only change on a fresh start.
            if let Some(mode) = mode {
                session.config.mode = mode;
            }
            session.high_score = state.store.high_score(session.mode()).await;
            session.start(rng);
            true
        }
        ClientCommand::Pause => {
            session.pause();
            false
        }
        ClientCommand::Resume => {
            let was_paused = session.status == GameStatus::Paused;
            session.resume();
            was_paused
        }
        ClientCommand::Reset => {
            session.reset(rng);
            false
        }
        ClientCommand::Turn { direction } => {
            session.set_direction(direction);
            false
        }
    }
}

/// Records the high score and fires the leaderboard submission without
/// blocking the session loop. The game-over stands whatever the
/// submission outcome is.
async fn handle_game_over(
    state: &WebServerState,
    session: &GameSession,
    username: Option<&str>,
    tx: &mpsc::Sender<ServerEvent>,
) {
    let score = session.score;
    let mode = session.mode();
    log!("Game over: {} points ({})", score, mode);

    state.store.record_high_score(mode, session.high_score).await;

    if score == 0 {
        send_event(
            tx,
            ServerEvent::GameOver {
                score,
                mode,
                entry: None,
                notice: None,
            },
        )
        .await;
        return;
    }

    let store = state.store.clone();
    let tx = tx.clone();
    let username = username.map(str::to_string);
    tokio::spawn(async move {
        let (entry, notice) = match store.submit_score(username.as_deref(), score, mode).await {
            Ok(entry) => (Some(entry), None),
            Err(error) => (None, Some(error)),
        };
        let _ = tx
            .send(ServerEvent::GameOver {
                score,
                mode,
                entry,
                notice,
            })
            .await;
    });
}

async fn send_event(tx: &mpsc::Sender<ServerEvent>, event: ServerEvent) {
    let _ = tx.send(event).await;
}

/// A fresh interval whose first tick is a full period away, so re-arming
/// never produces a double step.
fn new_ticker(speed_ms: u64) -> Interval {
    let period = Duration::from_millis(speed_ms);
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

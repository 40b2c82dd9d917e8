use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::Json;

use common::log;
use common::models::{ApiResponse, LivePlayer};
use common::PlayerId;

use crate::web_server::WebServerState;

pub async fn list_players(
    State(state): State<WebServerState>,
) -> Json<ApiResponse<Vec<LivePlayer>>> {
    let players = state.registry.list_players().await;
    Json(ApiResponse::ok(players))
}

pub async fn get_player(
    State(state): State<WebServerState>,
    Path(id): Path<String>,
) -> Json<ApiResponse<LivePlayer>> {
    match state.registry.get_player(&PlayerId::new(id)).await {
        Some(player) => Json(ApiResponse::ok(player)),
        None => Json(ApiResponse::empty()),
    }
}

pub async fn watch(
    State(state): State<WebServerState>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_watch(socket, state, PlayerId::new(id)))
}

/// Streams a live player's snapshots until the viewer leaves. The viewer
/// count rises on subscribe and falls again on disconnect.
async fn handle_watch(mut socket: WebSocket, state: WebServerState, id: PlayerId) {
    let Some((watcher_id, mut rx)) = state.registry.watch(&id).await else {
        let _ = socket.send(Message::Close(None)).await;
        return;
    };
    log!("Viewer joined stream for {}", id);

    // Current position first, ticks follow.
    if let Some(player) = state.registry.get_player(&id).await
        && send_snapshot(&mut socket, &player).await.is_err()
    {
        state.registry.unwatch(&id, watcher_id).await;
        return;
    }

    loop {
        tokio::select! {
            snapshot = rx.recv() => {
                match snapshot {
                    Some(player) => {
                        if send_snapshot(&mut socket, &player).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    state.registry.unwatch(&id, watcher_id).await;
    log!("Viewer left stream for {}", id);
}

async fn send_snapshot(socket: &mut WebSocket, player: &LivePlayer) -> Result<(), axum::Error> {
    let payload = serde_json::to_string(player).expect("live player serializes");
    socket.send(Message::Text(payload.into())).await
}

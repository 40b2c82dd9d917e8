use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use common::game::GameMode;
use common::models::{ApiResponse, LeaderboardEntry};

use crate::web_server::WebServerState;

#[derive(Deserialize)]
pub struct LeaderboardQuery {
    pub mode: Option<GameMode>,
}

#[derive(Deserialize)]
pub struct SubmitScoreRequest {
    pub username: Option<String>,
    pub score: u32,
    pub mode: GameMode,
}

pub async fn list(
    State(state): State<WebServerState>,
    Query(query): Query<LeaderboardQuery>,
) -> Json<ApiResponse<Vec<LeaderboardEntry>>> {
    let entries = state.store.list_leaderboard(query.mode).await;
    Json(ApiResponse::ok(entries))
}

pub async fn submit(
    State(state): State<WebServerState>,
    Json(request): Json<SubmitScoreRequest>,
) -> Json<ApiResponse<LeaderboardEntry>> {
    let result = state
        .store
        .submit_score(request.username.as_deref(), request.score, request.mode)
        .await;

    match result {
        Ok(entry) => Json(ApiResponse::ok(entry)),
        Err(error) => Json(ApiResponse::err(error)),
    }
}

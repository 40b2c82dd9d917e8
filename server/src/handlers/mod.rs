pub mod auth;
pub mod leaderboard;
pub mod live;

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct WelcomeMessage {
    pub message: &'static str,
}

pub async fn root() -> Json<WelcomeMessage> {
    Json(WelcomeMessage {
        message: "Welcome to Serpent Showdown API",
    })
}

use axum::extract::State;
use axum::Json;

use common::models::{ApiResponse, AuthCredentials, User};

use crate::web_server::WebServerState;

pub async fn login(
    State(state): State<WebServerState>,
    Json(credentials): Json<AuthCredentials>,
) -> Json<ApiResponse<User>> {
    match state.store.login(&credentials).await {
        Ok(user) => Json(ApiResponse::ok(user)),
        Err(error) => Json(ApiResponse::err(error)),
    }
}

pub async fn signup(
    State(state): State<WebServerState>,
    Json(credentials): Json<AuthCredentials>,
) -> Json<ApiResponse<User>> {
    match state.store.signup(&credentials).await {
        Ok(user) => Json(ApiResponse::ok(user)),
        Err(error) => Json(ApiResponse::err(error)),
    }
}

pub async fn logout() -> Json<ApiResponse<()>> {
    // Stateless mock: there is no token to revoke.
    Json(ApiResponse::empty())
}

pub async fn me() -> Json<ApiResponse<User>> {
    // Stateless mock: no session cookie, so the client goes through login.
    Json(ApiResponse::empty())
}

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use common::log;

use crate::handlers;
use crate::live_registry::LiveRegistry;
use crate::server_config::ServerConfig;
use crate::store::AppStore;
use crate::ws_handler;

#[derive(Clone)]
pub struct WebServerState {
    pub store: AppStore,
    pub registry: LiveRegistry,
    pub config: ServerConfig,
}

pub async fn run_web_server(state: WebServerState) {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(handlers::root))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
        .route(
            "/leaderboard",
            get(handlers::leaderboard::list).post(handlers::leaderboard::submit),
        )
        .route("/live/players", get(handlers::live::list_players))
        .route("/live/players/{id}", get(handlers::live::get_player))
        .route("/live/watch/{id}", get(handlers::live::watch))
        .route("/game/ws", get(ws_handler::game_ws_upgrade))
        .nest_service("/ui", ServeDir::new(&state.config.static_files_dir))
        .layer(cors)
        .with_state(state.clone());

    let addr = state.config.listen_addr.clone();
    log!("Web server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind web server address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Web server error");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for Ctrl+C");
    log!("Shutdown signal received");
}

mod handlers;
mod live_registry;
mod server_config;
mod store;
mod web_server;
mod ws_handler;

use std::time::Duration;

use clap::Parser;
use common::game::SessionRng;
use common::{log, logger};

use live_registry::{exhibition_lineup, LiveRegistry};
use server_config::ServerConfig;
use store::AppStore;
use web_server::{run_web_server, WebServerState};

#[derive(Parser)]
#[command(name = "serpent_server")]
struct Args {
    /// Path to a YAML config file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = ServerConfig::load(args.config.as_deref())?;

    let store = AppStore::new();
    store.seed().await;

    let mut root_rng = match config.rng_seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Simulation seed: {}", root_rng.seed());

    let registry = LiveRegistry::new();
    let live_tick = Duration::from_millis(config.live_tick_ms);
    for player in exhibition_lineup(config.board_size, &mut root_rng) {
        let player_id = player.id.clone();
        registry.register_player(player).await;
        registry.spawn_player_task(player_id, config.board_size, live_tick, root_rng.fork());
    }

    let state = WebServerState {
        store,
        registry,
        config,
    };
    run_web_server(state).await;

    log!("Server shut down gracefully");

    Ok(())
}

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tracing::info;

use scorebble::config::ServerConfig;
use scorebble::game::{BoardLayout, GameEngine};
use scorebble::http_api::{self, ApiState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting scorebble server");

    let config = ServerConfig::from_env();

    info!("Loading word list from {}", config.wordlist_path.display());
    let game_engine = GameEngine::new(&config.wordlist_path, BoardLayout::standard())?;
    info!("Dictionary holds {} words", game_engine.dictionary().word_count());

    let api_state = ApiState::new(game_engine);
    let http_router = http_api::create_router(api_state, &config);

    let http_addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("failed to bind {}", http_addr))?;

    info!("Starting HTTP API server on {}", http_addr);
    axum::serve(listener, http_router)
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))?;

    Ok(())
}

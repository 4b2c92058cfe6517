mod config;
mod error;
mod handlers;
mod question_payload;
mod session_response;
mod session_store;
mod upload;

use config::ServerConfig;
use docuquery::{DocumentProcessor, GeminiService};
use handlers::{router, AppState};
use session_store::SessionStore;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid server configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let gemini = match GeminiService::from_env() {
        Ok(gemini) => gemini,
        Err(e) => {
            eprintln!("Failed to initialize Gemini client: {:#}", e);
            std::process::exit(1);
        }
    };

    let state = AppState::new(Arc::new(gemini), DocumentProcessor::new());
    spawn_session_sweeper(state.sessions.clone(), &config);
    let app = router(state, config.max_upload_bytes);

    if let Err(e) = serve(config, app).await {
        log::error!("Server error: {:#}", e);
        std::process::exit(1);
    }
}

fn spawn_session_sweeper(sessions: SessionStore, config: &ServerConfig) {
    let ttl = config.session_ttl;
    let mut ticker = tokio::time::interval(config.sweep_interval());
    tokio::spawn(async move {
        loop {
            ticker.tick().await;
            let evicted = sessions.sweep_idle(ttl).await;
            if evicted > 0 {
                log::info!("Evicted {} idle sessions", evicted);
            }
        }
    });
}

async fn serve(config: ServerConfig, app: axum::Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    log::info!(
        "Listening on {} (max upload {} bytes, session ttl {}s)",
        listener.local_addr()?,
        config.max_upload_bytes,
        config.session_ttl.as_secs()
    );
    axum::serve(listener, app).await?;
    Ok(())
}

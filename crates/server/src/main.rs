//! HTTP server for PowerPoint translation.

use anyhow::{Context, Result};
use clap::Parser;
use ppt_translate_client::GoogleTranslator;
use ppt_translate_server::{create_router, AppState, ServerConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::parse();
    config.validate()?;

    let translator = GoogleTranslator::from_config(config.provider_config())?;
    let state = Arc::new(AppState::new(
        Arc::new(translator),
        config.translation_options(),
    ));
    let app = create_router(state, config.max_body_bytes());

    let listener = tokio::net::TcpListener::bind(config.address())
        .await
        .with_context(|| format!("Failed to bind {}", config.address()))?;

    log::info!("Listening on http://{}", config.address());
    log::info!("Translation provider: {}", config.endpoint);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

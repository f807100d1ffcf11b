//! DocSearch-RS: a document indexing and search service with LLM-assisted
//! answers, written in Rust.
//!
//! This is the main entry point for the application.

use anyhow::Result;
use docsearch_rs::{
    config::Settings,
    engine::EsClient,
    llm::LlmClient,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    info!("Starting DocSearch-RS v{}", docsearch_rs::VERSION);

    // Load configuration
    let settings = load_settings()?;
    info!(
        "Configured for search engine at {} (index '{}')",
        settings.engine.base_url(),
        settings.engine.index
    );

    // Connect to the search engine and bootstrap the index
    let engine = EsClient::connect(&settings.engine).await?;
    info!("Search engine reachable, index ready");

    // Completion client; the API key is only required on the summarize path
    let llm = LlmClient::new(&settings.llm);
    if settings.llm.api_key.is_empty() {
        info!("No LLM API key configured; /api/v1/search/llm will report a dependency error");
    }

    // Create application state
    let state = AppState::new(settings.clone(), engine, llm);

    // Create router
    let app = create_router(state);

    // Bind address
    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );

    info!("Starting server on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Load settings from file or use defaults
fn load_settings() -> Result<Settings> {
    // Check for settings file in various locations
    let paths = [
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/docsearch/settings.yml"),
        dirs::config_dir()
            .map(|p| p.join("docsearch-rs/settings.yml"))
            .unwrap_or_default(),
    ];

    // Check environment variable first
    if let Ok(path) = std::env::var("DOCSEARCH_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(&path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    // Try each default path
    for path in paths.iter() {
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    // Use defaults
    info!("No settings file found, using defaults");
    let mut settings = Settings::default();
    settings.merge_env();
    Ok(settings)
}

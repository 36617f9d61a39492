//! `MarcomDesk` server binary.

use std::sync::Arc;

use dotenvy::dotenv;
use marcom_desk::{
    config,
    errors::Result,
    http::{self, AppState},
    render::TextLetterRenderer,
    storage::DiskDocumentStore,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the application settings
    let settings = config::settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;
    info!("Settings loaded; binding to {}", settings.bind_address);

    // 4. Initialize the database
    let db = config::database::create_connection(&settings.database_url)
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database tables ready."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Wire up the boundary collaborators
    let state = AppState {
        db,
        store: Arc::new(DiskDocumentStore::new(settings.upload_dir.clone())),
        renderer: Arc::new(TextLetterRenderer::new(settings.letterhead.clone())),
    };

    // 6. Serve
    let listener = tokio::net::TcpListener::bind(&settings.bind_address).await?;
    info!("Listening on {}", settings.bind_address);
    axum::serve(listener, http::router(state)).await?;

    Ok(())
}

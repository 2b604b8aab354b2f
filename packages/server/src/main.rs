use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pixellens_server::config::AppConfig;
use pixellens_server::state::AppState;
use pixellens_server::video::{VideoMetadataProvider, YouTubeClient};
use pixellens_server::{build_router, database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.level)),
        )
        .init();

    let db = database::init_db(&config.database)
        .await
        .context("Failed to connect to database")?;
    seed::ensure_indexes(&db).await?;

    if let Some(admin) = &config.auth.bootstrap_admin {
        seed::ensure_bootstrap_admin(&db, admin)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create bootstrap admin: {e:?}"))?;
    }

    let video: Option<Arc<dyn VideoMetadataProvider>> = match config.youtube_api_key() {
        Some(key) => Some(Arc::new(
            YouTubeClient::new(&config.video, key).context("Failed to build video client")?,
        )),
        None => {
            info!("No YouTube API key configured; video lookups will use fallback metadata");
            None
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState { db, config, video };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("PixelLens server listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}

use std::sync::Arc;

use configs::{AppConfig, DatabaseConfig, StorageBackend};
use service::item::repository::{ItemRepository, SeaOrmItemRepository};
use service::item::service::ItemService;
use service::storage::memory::InMemoryItemRepository;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Construct the store gateway selected by configuration.
pub async fn build_repository(cfg: &DatabaseConfig) -> anyhow::Result<Arc<dyn ItemRepository>> {
    let repo: Arc<dyn ItemRepository> = match cfg.backend {
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(cfg).await?;
            Arc::new(SeaOrmItemRepository::new(db))
        }
        StorageBackend::Memory => {
            warn!("using in-memory storage; records are lost on shutdown");
            Arc::new(InMemoryItemRepository::new())
        }
    };
    Ok(repo)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Build the app from a validated config and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let repo = build_repository(&cfg.database).await?;
    let state = AppState::new(ItemService::new(repo));
    let app = routes::build_router(state, build_cors());

    let addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, backend = ?cfg.database.backend, "server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

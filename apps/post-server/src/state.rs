//! Application state - shared across all handlers.

use std::sync::Arc;

use post_core::{PostConfig, PostService};
use post_core::ports::{PostStore, TokenService};
use post_infra::{InMemoryPostStore, JwtTokenService};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub tokens: Arc<dyn TokenService>,
    /// Which store backs `posts`, reported by the health endpoint.
    pub storage: &'static str,
}

impl AppState {
    pub fn new(
        store: Arc<dyn PostStore>,
        tokens: Arc<dyn TokenService>,
        post_config: PostConfig,
        storage: &'static str,
    ) -> Self {
        Self {
            posts: PostService::new(store, post_config),
            tokens,
            storage,
        }
    }

    /// Build the application state with appropriate implementations.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let (store, storage) = open_store(config).await?;

        tracing::info!(storage, "Application state initialized");

        Ok(Self::new(store, tokens, config.post, storage))
    }
}

/// A configured database that cannot be reached is a startup error; the
/// in-memory store is only used when no database is configured.
#[cfg(feature = "postgres")]
async fn open_store(config: &AppConfig) -> anyhow::Result<(Arc<dyn PostStore>, &'static str)> {
    use post_infra::PostgresPostStore;
    use post_infra::database::connect;

    match &config.database {
        Some(db_config) => {
            let conn = connect(db_config).await?;
            Ok((Arc::new(PostgresPostStore::new(conn)), "postgres"))
        }
        None => {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            Ok((Arc::new(InMemoryPostStore::new()), "memory"))
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn open_store(config: &AppConfig) -> anyhow::Result<(Arc<dyn PostStore>, &'static str)> {
    if config.database.is_some() {
        tracing::warn!("DATABASE_URL is ignored: built without the postgres feature.");
    }
    tracing::info!("Running without postgres feature - using in-memory store");
    Ok((Arc::new(InMemoryPostStore::new()), "memory"))
}

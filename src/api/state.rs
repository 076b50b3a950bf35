use std::sync::Arc;

use crate::config::{CatalogBackend, Config};
use crate::db;
use crate::services::providers::{
    CatalogProvider, DocumentStoreCatalog, RemoteCatalog, StaticFileCatalog,
};
use crate::services::{FallbackPolicy, FilterOptionsSource, Recommender};

/// Shared application state
///
/// Read-only after startup; every request re-reads its data source.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogProvider>,
    pub filter_options: FilterOptionsSource,
    pub recommender: Recommender,
}

impl AppState {
    /// Creates state around an already-built catalog provider
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        filter_options: FilterOptionsSource,
        fallback: FallbackPolicy,
        max_results: usize,
    ) -> Self {
        let recommender = Recommender::new(catalog.clone(), fallback, max_results);
        Self {
            catalog,
            filter_options,
            recommender,
        }
    }

    /// Builds the catalog provider selected by `config`.
    ///
    /// The document store is connected (and migrated) here, so an unreachable
    /// database aborts startup.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let catalog: Arc<dyn CatalogProvider> = match config.catalog_backend {
            CatalogBackend::Static => Arc::new(StaticFileCatalog::new(config.catalog_paths())),
            CatalogBackend::Store => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))?;
                let pool = db::connect_document_store(url).await?;
                Arc::new(DocumentStoreCatalog::new(pool))
            }
            CatalogBackend::Remote => {
                let url = config
                    .remote_catalog_url
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("REMOTE_CATALOG_URL is not set"))?;
                Arc::new(RemoteCatalog::new(url))
            }
        };

        tracing::info!(provider = catalog.name(), "Catalog provider ready");

        Ok(Self::new(
            catalog,
            FilterOptionsSource::new(&config.filter_options_path),
            config.fallback_policy(),
            config.max_results,
        ))
    }
}

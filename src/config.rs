use std::path::PathBuf;

use serde::Deserialize;

use crate::services::{FallbackPolicy, MAX_RESULTS};

/// Which catalog implementation backs `/api/movies`
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CatalogBackend {
    /// JSON array on disk, re-read on every request
    Static,
    /// PostgreSQL table of JSONB movie documents
    Store,
    /// Another instance's `/api/movies` endpoint
    Remote,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Catalog implementation to serve
    #[serde(default = "default_catalog_backend")]
    pub catalog_backend: CatalogBackend,

    /// Candidate locations of the static catalog file, first existing one wins
    #[serde(default = "default_catalog_paths")]
    pub catalog_paths: Vec<String>,

    /// PostgreSQL connection URL, only read by the `store` backend
    #[serde(default)]
    pub database_url: Option<String>,

    /// Base URL of the upstream backend, only read by the `remote` backend
    #[serde(default)]
    pub remote_catalog_url: Option<String>,

    /// Precomputed filter-options document
    #[serde(default = "default_filter_options_path")]
    pub filter_options_path: String,

    /// Substitute the sample set when the catalog cannot be fetched
    #[serde(default)]
    pub fallback_on_fetch_error: bool,

    /// Result cap for recommendations
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_catalog_backend() -> CatalogBackend {
    CatalogBackend::Static
}

fn default_catalog_paths() -> Vec<String> {
    vec![
        "src/data/movies.json".to_string(),
        "data/movies.json".to_string(),
        "movies.json".to_string(),
    ]
}

fn default_filter_options_path() -> String {
    "public/filter-options.json".to_string()
}

fn default_max_results() -> usize {
    MAX_RESULTS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            catalog_backend: default_catalog_backend(),
            catalog_paths: default_catalog_paths(),
            database_url: None,
            remote_catalog_url: None,
            filter_options_path: default_filter_options_path(),
            fallback_on_fetch_error: false,
            max_results: default_max_results(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects a backend selection whose required setting is missing
    pub fn validate(&self) -> anyhow::Result<()> {
        match self.catalog_backend {
            CatalogBackend::Store if self.database_url.is_none() => {
                anyhow::bail!("DATABASE_URL is required when CATALOG_BACKEND=store")
            }
            CatalogBackend::Remote if self.remote_catalog_url.is_none() => {
                anyhow::bail!("REMOTE_CATALOG_URL is required when CATALOG_BACKEND=remote")
            }
            CatalogBackend::Static if self.catalog_paths.is_empty() => {
                anyhow::bail!("CATALOG_PATHS must name at least one file")
            }
            _ => {}
        }
        if self.max_results == 0 {
            anyhow::bail!("MAX_RESULTS must be at least 1");
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn catalog_paths(&self) -> Vec<PathBuf> {
        self.catalog_paths.iter().map(PathBuf::from).collect()
    }

    pub fn fallback_policy(&self) -> FallbackPolicy {
        if self.fallback_on_fetch_error {
            FallbackPolicy::SampleData
        } else {
            FallbackPolicy::Surface
        }
    }
}

/// Static JSON file catalog
///
/// Looks for the catalog among a list of candidate paths and re-reads the first
/// one that exists on every request, so edits to the file show up immediately.
use std::path::{Path, PathBuf};

use crate::{
    error::{AppError, AppResult},
    models::{CatalogPage, CatalogQuery, MovieRecord},
    services::providers::{page_in_memory, CatalogProvider},
};

#[derive(Debug, Clone)]
pub struct StaticFileCatalog {
    candidate_paths: Vec<PathBuf>,
}

impl StaticFileCatalog {
    pub fn new(candidate_paths: Vec<PathBuf>) -> Self {
        Self { candidate_paths }
    }

    /// First candidate that exists on disk
    async fn locate(&self) -> Option<&Path> {
        for path in &self.candidate_paths {
            if tokio::fs::try_exists(path).await.unwrap_or(false) {
                return Some(path.as_path());
            }
        }
        None
    }

    async fn load(&self) -> AppResult<Vec<MovieRecord>> {
        let path = self.locate().await.ok_or_else(|| {
            tracing::warn!(candidates = ?self.candidate_paths, "No catalog file found");
            AppError::NotFound("Movies data file not found".to_string())
        })?;

        let data = tokio::fs::read_to_string(path).await?;
        let movies: Vec<MovieRecord> = serde_json::from_str(&data)?;

        tracing::info!(
            path = %path.display(),
            count = movies.len(),
            provider = "static_file",
            "Catalog loaded"
        );

        Ok(movies)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for StaticFileCatalog {
    async fn fetch_all(&self) -> AppResult<Vec<MovieRecord>> {
        self.load().await
    }

    async fn fetch_page(&self, query: &CatalogQuery) -> AppResult<CatalogPage> {
        let movies = self.load().await?;
        Ok(page_in_memory(movies, query))
    }

    fn name(&self) -> &'static str {
        "static_file"
    }
}

/// HTTP client for another instance's `/api/movies`
///
/// Upstream may run either backend, so both response shapes (bare array and
/// page envelope) are accepted.
use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogPage, CatalogQuery, CatalogResponse, MovieRecord},
    services::providers::{page_in_memory, CatalogProvider},
};

#[derive(Debug, Clone)]
pub struct RemoteCatalog {
    http_client: HttpClient,
    base_url: String,
}

impl RemoteCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn movies_url(&self) -> String {
        format!("{}/api/movies", self.base_url)
    }

    async fn get(&self, query: Option<&CatalogQuery>) -> AppResult<CatalogResponse> {
        let mut request = self.http_client.get(self.movies_url());
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                url = %self.movies_url(),
                status = %status,
                "Upstream catalog request failed"
            );
            return Err(AppError::Transport(format!(
                "Failed to fetch movies data: {} {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for RemoteCatalog {
    async fn fetch_all(&self) -> AppResult<Vec<MovieRecord>> {
        let movies = self.get(None).await?.into_movies();

        tracing::info!(
            url = %self.movies_url(),
            count = movies.len(),
            provider = "remote",
            "Catalog fetched"
        );

        Ok(movies)
    }

    async fn fetch_page(&self, query: &CatalogQuery) -> AppResult<CatalogPage> {
        match self.get(Some(query)).await? {
            CatalogResponse::Paged(page) => Ok(page),
            // Static-file upstreams ignore paging parameters
            CatalogResponse::Full(movies) => Ok(page_in_memory(movies, query)),
        }
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

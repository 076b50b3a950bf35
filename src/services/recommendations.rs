use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use crate::{
    error::AppResult,
    models::{MovieRecord, SearchCriteria},
    services::{
        engine::filter_movies,
        pagination::{page_window, paginate, PAGE_SIZE, PAGE_WINDOW},
        providers::CatalogProvider,
    },
};

/// What to do when the catalog cannot be fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Return the error to the caller
    Surface,
    /// Filter the built-in sample set instead and mark the results as fallback
    SampleData,
}

/// Where a set of recommendations came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    Live,
    Fallback,
}

/// One page of the results screen
#[derive(Debug, Clone, Serialize)]
pub struct Recommendations {
    pub movies: Vec<MovieRecord>,
    pub page: usize,
    pub total_pages: usize,
    pub page_numbers: Vec<usize>,
    /// Number of matches after applying the result cap
    pub total_matches: usize,
    /// True when the cap was reached, so more movies may have matched
    pub capped: bool,
    pub criteria_summary: Vec<String>,
    pub source: ResultSource,
}

/// Generates recommendations: fetch, filter, cap and paginate
#[derive(Clone)]
pub struct Recommender {
    provider: Arc<dyn CatalogProvider>,
    fallback: FallbackPolicy,
    max_results: usize,
}

impl Recommender {
    pub fn new(
        provider: Arc<dyn CatalogProvider>,
        fallback: FallbackPolicy,
        max_results: usize,
    ) -> Self {
        Self {
            provider,
            fallback,
            max_results,
        }
    }

    /// Fetches the catalog fresh and returns the requested page of matches
    pub async fn recommend(
        &self,
        criteria: &SearchCriteria,
        page: usize,
    ) -> AppResult<Recommendations> {
        let (catalog, source) = match self.provider.fetch_all().await {
            Ok(movies) => (movies, ResultSource::Live),
            Err(e) if self.fallback == FallbackPolicy::SampleData => {
                tracing::warn!(
                    error = %e,
                    provider = self.provider.name(),
                    "Catalog fetch failed, using sample data"
                );
                (sample_movies(), ResultSource::Fallback)
            }
            Err(e) => return Err(e),
        };

        let results = filter_movies(&catalog, criteria, self.max_results);
        let capped = results.len() >= self.max_results;
        let page = paginate(&results, page, PAGE_SIZE);

        tracing::info!(
            provider = self.provider.name(),
            catalog = catalog.len(),
            matches = results.len(),
            page = page.page,
            source = ?source,
            "Recommendations generated"
        );

        Ok(Recommendations {
            page_numbers: page_window(page.page, page.total_pages, PAGE_WINDOW),
            movies: page.items,
            page: page.page,
            total_pages: page.total_pages,
            total_matches: results.len(),
            capped,
            criteria_summary: criteria.describe(),
            source,
        })
    }
}

/// Stand-in catalog used when the real one is unreachable
pub fn sample_movies() -> Vec<MovieRecord> {
    let sample = json!([{
        "id": 1,
        "title": "Sample Movie 1",
        "average_rating": 8.5,
        "release_date": "2023-01-01",
        "runtime": 120,
        "original_language": "en",
        "genres": "Action, Drama",
        "overview": "Sample movie description"
    }]);
    serde_json::from_value(sample).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, services::providers::MockCatalogProvider};

    fn catalog(count: usize) -> Vec<MovieRecord> {
        (0..count)
            .map(|i| MovieRecord {
                id: json!(i),
                title: format!("Movie {}", i),
                average_rating: i as f64,
                ..MovieRecord::default()
            })
            .collect()
    }

    fn mock_with(result: fn() -> AppResult<Vec<MovieRecord>>) -> Arc<dyn CatalogProvider> {
        let mut mock = MockCatalogProvider::new();
        mock.expect_fetch_all().times(1).returning(result);
        mock.expect_name().return_const("mock");
        Arc::new(mock)
    }

    #[tokio::test]
    async fn test_pages_capped_results() {
        let provider = mock_with(|| Ok(catalog(30)));
        let recommender = Recommender::new(provider, FallbackPolicy::Surface, 15);

        let result = recommender
            .recommend(&SearchCriteria::default(), 3)
            .await
            .unwrap();

        assert_eq!(result.total_matches, 15);
        assert!(result.capped);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.page_numbers, vec![1, 2, 3]);
        assert_eq!(result.movies.len(), 5);
        assert_eq!(result.movies[0].title, "Movie 19");
        assert_eq!(result.source, ResultSource::Live);
    }

    #[tokio::test]
    async fn test_twelve_matches_last_page_has_two() {
        let provider = mock_with(|| Ok(catalog(12)));
        let recommender = Recommender::new(provider, FallbackPolicy::Surface, 15);

        let result = recommender
            .recommend(&SearchCriteria::default(), 3)
            .await
            .unwrap();

        assert!(!result.capped);
        assert_eq!(result.movies.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_error_surfaces_by_default() {
        let provider = mock_with(|| Err(AppError::Transport("connection refused".into())));
        let recommender = Recommender::new(provider, FallbackPolicy::Surface, 15);

        let result = recommender.recommend(&SearchCriteria::default(), 1).await;
        assert!(matches!(result, Err(AppError::Transport(_))));
    }

    #[tokio::test]
    async fn test_fetch_error_uses_sample_when_enabled() {
        let provider = mock_with(|| Err(AppError::NotFound("gone".into())));
        let recommender = Recommender::new(provider, FallbackPolicy::SampleData, 15);

        let result = recommender
            .recommend(&SearchCriteria::default(), 1)
            .await
            .unwrap();

        assert_eq!(result.source, ResultSource::Fallback);
        assert_eq!(result.movies.len(), 1);
        assert_eq!(result.movies[0].title, "Sample Movie 1");
        assert_eq!(result.criteria_summary, vec!["Adult Content: No"]);
    }

    #[test]
    fn test_sample_movies_are_normalized() {
        let sample = sample_movies();
        assert_eq!(sample.len(), 1);
        assert_eq!(sample[0].genres, vec!["Action", "Drama"]);
        assert_eq!(sample[0].release_year(), Some(2023));
    }

    #[test]
    fn test_recommend_blocking() {
        let provider = mock_with(|| Ok(catalog(3)));
        let recommender = Recommender::new(provider, FallbackPolicy::Surface, 15);

        let result =
            tokio_test::block_on(recommender.recommend(&SearchCriteria::default(), 1)).unwrap();
        assert_eq!(result.total_matches, 3);
        assert_eq!(result.page_numbers, vec![1]);
    }
}

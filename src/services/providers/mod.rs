/// Catalog provider abstraction
///
/// The catalog can be served from a static JSON file, a document store, or
/// another running instance. All three sit behind `CatalogProvider` so the HTTP
/// layer and the recommendation flow never care which deployment they run in.
use crate::{
    error::AppResult,
    models::{CatalogPage, CatalogQuery, MovieRecord},
};

pub mod document_store;
pub mod remote;
pub mod static_file;

pub use document_store::DocumentStoreCatalog;
pub use remote::RemoteCatalog;
pub use static_file::StaticFileCatalog;

/// Trait for movie catalog sources
///
/// Implementations re-read their source on every call; nothing is cached.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Every movie in the catalog, in source order
    async fn fetch_all(&self) -> AppResult<Vec<MovieRecord>>;

    /// One page of the catalog, optionally narrowed by a case-insensitive
    /// title substring
    async fn fetch_page(&self, query: &CatalogQuery) -> AppResult<CatalogPage>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Pages an in-memory catalog the way the document store does
pub(crate) fn page_in_memory(movies: Vec<MovieRecord>, query: &CatalogQuery) -> CatalogPage {
    let needle = query.search_term().map(str::to_lowercase);

    let matching: Vec<MovieRecord> = movies
        .into_iter()
        .filter(|movie| match &needle {
            Some(needle) => movie.title.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .collect();

    let total = matching.len() as u64;
    let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
    let page = matching
        .into_iter()
        .skip(offset)
        .take(query.limit as usize)
        .collect();

    CatalogPage::new(total, query, page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> Vec<MovieRecord> {
        serde_json::from_value(json!([
            { "title": "The Matrix" },
            { "title": "Matrix Reloaded" },
            { "title": "Heat" },
            { "title": "The MATRIX Revolutions" }
        ]))
        .unwrap()
    }

    #[test]
    fn test_page_in_memory_search_is_case_insensitive() {
        let query = CatalogQuery {
            page: 1,
            limit: 50,
            search: Some("matrix".to_string()),
        };
        let page = page_in_memory(catalog(), &query);
        assert_eq!(page.total, 3);
        assert_eq!(page.movies.len(), 3);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_page_in_memory_slices() {
        let query = CatalogQuery {
            page: 2,
            limit: 3,
            search: None,
        };
        let page = page_in_memory(catalog(), &query);
        assert_eq!(page.total, 4);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.movies.len(), 1);
        assert_eq!(page.movies[0].title, "The MATRIX Revolutions");
    }
}

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::MovieRecord;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 50;

/// Paging and title search for a catalog listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    #[serde(default = "default_page", deserialize_with = "positive_or_default_page")]
    pub page: u32,
    #[serde(default = "default_limit", deserialize_with = "positive_or_default_limit")]
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: None,
        }
    }
}

impl CatalogQuery {
    /// Rows to skip before this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Search term with surrounding whitespace removed, `None` when blank
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

/// One page of a catalog listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub total: u64,
    pub total_pages: u64,
    pub current_page: u32,
    pub movies: Vec<MovieRecord>,
}

impl CatalogPage {
    pub fn new(total: u64, query: &CatalogQuery, movies: Vec<MovieRecord>) -> Self {
        Self {
            total,
            total_pages: total.div_ceil(u64::from(query.limit)),
            current_page: query.page,
            movies,
        }
    }
}

/// Either response shape of `GET /api/movies`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CatalogResponse {
    Full(Vec<MovieRecord>),
    Paged(CatalogPage),
}

impl CatalogResponse {
    pub fn into_movies(self) -> Vec<MovieRecord> {
        match self {
            CatalogResponse::Full(movies) => movies,
            CatalogResponse::Paged(page) => page.movies,
        }
    }
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Query strings arrive as text; garbage and zero mean "use the default"
fn positive_or<'de, D>(deserializer: D, fallback: u32) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    Ok(parsed.filter(|n| *n > 0).unwrap_or(fallback))
}

fn positive_or_default_page<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    positive_or(deserializer, DEFAULT_PAGE)
}

fn positive_or_default_limit<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    positive_or(deserializer, DEFAULT_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_defaults_for_garbage() {
        let query: CatalogQuery =
            serde_json::from_value(json!({ "page": "abc", "limit": "0" })).unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 50);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_offset_and_search_term() {
        let query = CatalogQuery {
            page: 3,
            limit: 20,
            search: Some("  ".to_string()),
        };
        assert_eq!(query.offset(), 40);
        assert_eq!(query.search_term(), None);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let query = CatalogQuery {
            page: 2,
            limit: 50,
            search: None,
        };
        let page = CatalogPage::new(101, &query, Vec::new());
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 2);

        let page = CatalogPage::new(0, &query, Vec::new());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_response_accepts_both_shapes() {
        let full: CatalogResponse =
            serde_json::from_value(json!([{ "title": "Alien" }])).unwrap();
        assert_eq!(full.into_movies().len(), 1);

        let paged: CatalogResponse = serde_json::from_value(json!({
            "total": 1,
            "totalPages": 1,
            "currentPage": 1,
            "movies": [{ "title": "Alien" }, { "title": "Aliens" }]
        }))
        .unwrap();
        assert_eq!(paged.into_movies().len(), 2);
    }
}

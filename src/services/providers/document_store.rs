/// PostgreSQL-backed document store catalog
///
/// Movies are stored as schema-less JSONB documents in a single `movies` table,
/// mirroring the loosely typed records the static file carries.
use sqlx::{types::Json, PgPool};

use crate::{
    error::AppResult,
    models::{CatalogPage, CatalogQuery, MovieRecord},
    services::providers::CatalogProvider,
};

#[derive(Debug, Clone)]
pub struct DocumentStoreCatalog {
    pool: PgPool,
}

impl DocumentStoreCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts documents as-is, returning how many were written
    pub async fn import(&self, documents: &[serde_json::Value]) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;
        for doc in documents {
            sqlx::query("INSERT INTO movies (doc) VALUES ($1)")
                .bind(Json(doc))
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        tracing::info!(count = documents.len(), "Imported movie documents");
        Ok(documents.len() as u64)
    }
}

/// `ILIKE` pattern matching `term` anywhere, with LIKE metacharacters escaped
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait::async_trait]
impl CatalogProvider for DocumentStoreCatalog {
    async fn fetch_all(&self) -> AppResult<Vec<MovieRecord>> {
        let rows: Vec<(Json<MovieRecord>,)> =
            sqlx::query_as("SELECT doc FROM movies ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        let movies: Vec<MovieRecord> = rows.into_iter().map(|(Json(movie),)| movie).collect();

        tracing::info!(
            count = movies.len(),
            provider = "document_store",
            "Catalog loaded"
        );

        Ok(movies)
    }

    async fn fetch_page(&self, query: &CatalogQuery) -> AppResult<CatalogPage> {
        let pattern = query.search_term().map(contains_pattern);
        let offset = i64::try_from(query.offset()).unwrap_or(i64::MAX);

        tracing::debug!(
            search = ?query.search_term(),
            page = query.page,
            limit = query.limit,
            "Querying document store"
        );

        let (total,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM movies WHERE $1::text IS NULL OR doc->>'title' ILIKE $1",
        )
        .bind(pattern.clone())
        .fetch_one(&self.pool)
        .await?;

        let rows: Vec<(Json<MovieRecord>,)> = sqlx::query_as(
            "SELECT doc FROM movies \
             WHERE $1::text IS NULL OR doc->>'title' ILIKE $1 \
             ORDER BY id OFFSET $2 LIMIT $3",
        )
        .bind(pattern)
        .bind(offset)
        .bind(i64::from(query.limit))
        .fetch_all(&self.pool)
        .await?;

        let movies: Vec<MovieRecord> = rows.into_iter().map(|(Json(movie),)| movie).collect();

        tracing::info!(
            total = total,
            returned = movies.len(),
            provider = "document_store",
            "Catalog page loaded"
        );

        Ok(CatalogPage::new(total.max(0) as u64, query, movies))
    }

    fn name(&self) -> &'static str {
        "document_store"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_metacharacters() {
        assert_eq!(contains_pattern("matrix"), "%matrix%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
    }
}

use sqlx::{postgres::PgPoolOptions, PgPool};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Connects to the document store and applies pending migrations.
///
/// Any failure here is fatal to startup.
pub async fn connect_document_store(database_url: &str) -> anyhow::Result<PgPool> {
    tracing::info!("Connecting to document store...");

    let pool = create_pool(database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Document store connection failed: {}", e))?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("Connected to document store");
    Ok(pool)
}

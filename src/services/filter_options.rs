use std::path::PathBuf;

use crate::{
    error::{AppError, AppResult},
    models::{FilterOptions, MovieRecord},
};

/// The precomputed filter-options document on disk
#[derive(Debug, Clone)]
pub struct FilterOptionsSource {
    path: PathBuf,
}

impl FilterOptionsSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the document; it is not derived from the live catalog
    pub async fn load(&self) -> AppResult<FilterOptions> {
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return Err(AppError::NotFound(
                "Filter options file not found".to_string(),
            ));
        }

        let data = tokio::fs::read_to_string(&self.path).await?;
        let options = serde_json::from_str(&data)?;
        Ok(options)
    }
}

/// Builds the options document from a catalog file and writes it to `out`
pub async fn generate_filter_options(
    catalog: &std::path::Path,
    out: &std::path::Path,
) -> anyhow::Result<FilterOptions> {
    let data = tokio::fs::read_to_string(catalog).await?;
    let movies: Vec<MovieRecord> = serde_json::from_str(&data)?;
    let options = FilterOptions::from_catalog(&movies);

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(out, serde_json::to_string_pretty(&options)?).await?;

    tracing::info!(
        movies = movies.len(),
        languages = options.languages.len(),
        genres = options.genres.len(),
        countries = options.countries.len(),
        years = options.years.len(),
        out = %out.display(),
        "Wrote filter options"
    );

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_load_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = FilterOptionsSource::new(dir.path().join("filter-options.json"));
        assert!(matches!(source.load().await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_load_bad_json_is_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filter-options.json");
        fs::write(&path, "[1, 2").unwrap();

        let source = FilterOptionsSource::new(path);
        assert!(matches!(source.load().await, Err(AppError::ReadFailure(_))));
    }

    #[tokio::test]
    async fn test_generate_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join("movies.json");
        let out = dir.path().join("public/filter-options.json");
        fs::write(
            &catalog,
            r#"[{"original_language": "ja", "genres": "Animation", "release_date": "2001-07-20"}]"#,
        )
        .unwrap();

        let generated = generate_filter_options(&catalog, &out).await.unwrap();
        let loaded = FilterOptionsSource::new(&out).load().await.unwrap();

        assert_eq!(generated, loaded);
        assert_eq!(loaded.languages, vec!["ja"]);
        assert_eq!(loaded.years, vec![2001]);
    }
}

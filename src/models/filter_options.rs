use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::MovieRecord;

/// Selectable values for the criteria form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub years: Vec<i32>,
}

impl FilterOptions {
    /// Derives the options document from a catalog.
    ///
    /// Languages, genres and countries are distinct and ascending; years are
    /// distinct and newest first. Run offline, not per request.
    pub fn from_catalog(movies: &[MovieRecord]) -> Self {
        let mut languages = BTreeSet::new();
        let mut genres = BTreeSet::new();
        let mut countries = BTreeSet::new();
        let mut years = BTreeSet::new();

        for movie in movies {
            if !movie.language().is_empty() {
                languages.insert(movie.language().to_string());
            }
            genres.extend(movie.genres.iter().cloned());
            countries.extend(movie.production_countries.iter().cloned());
            if let Some(year) = movie.release_year() {
                years.insert(year);
            }
        }

        Self {
            languages: languages.into_iter().collect(),
            genres: genres.into_iter().collect(),
            countries: countries.into_iter().collect(),
            years: years.into_iter().rev().collect(),
        }
    }
}

//! Filter, sort and cap a catalog against user criteria.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::models::{MovieRecord, SearchCriteria, SortBy};

/// Hard display cap on returned matches
pub const MAX_RESULTS: usize = 15;

/// Years either side of the requested release year that still match
pub const YEAR_TOLERANCE: i64 = 3;

/// Minutes either side of the requested runtime that still match
pub const RUNTIME_TOLERANCE: i64 = 15;

/// Returns at most `max_results` movies passing every active criterion,
/// ordered by `criteria.sort_by`. The input slice is left untouched.
pub fn filter_movies(
    movies: &[MovieRecord],
    criteria: &SearchCriteria,
    max_results: usize,
) -> Vec<MovieRecord> {
    let mut matches: Vec<&MovieRecord> = movies
        .iter()
        .filter(|movie| matches_criteria(movie, criteria))
        .collect();

    // sort_by is stable, so equal keys keep catalog order
    matches.sort_by(|a, b| compare(a, b, criteria.sort_by));

    tracing::debug!(
        candidates = movies.len(),
        matches = matches.len(),
        returned = matches.len().min(max_results),
        sort_by = ?criteria.sort_by,
        "Filtered catalog"
    );

    matches.into_iter().take(max_results).cloned().collect()
}

/// True when the movie passes every active predicate
pub fn matches_criteria(movie: &MovieRecord, criteria: &SearchCriteria) -> bool {
    if !criteria.language.is_empty() && movie.language() != criteria.language {
        return false;
    }

    if criteria.min_rating > 0.0 && movie.average_rating < criteria.min_rating {
        return false;
    }

    // Exact equality: adult=false excludes adult titles, adult=true requires them
    if movie.adult != criteria.adult {
        return false;
    }

    if !criteria.country.is_empty() && !movie.countries_joined().contains(&criteria.country) {
        return false;
    }

    if let (Some(target), Some(year)) = (criteria.release_year, movie.release_year()) {
        if i64::from(year).abs_diff(target) > YEAR_TOLERANCE.unsigned_abs() {
            return false;
        }
    }

    if let Some(target) = criteria.runtime {
        if movie.runtime != 0
            && movie.runtime.abs_diff(target) > RUNTIME_TOLERANCE.unsigned_abs()
        {
            return false;
        }
    }

    if !criteria.genre.is_empty() && !movie.genres_joined().contains(&criteria.genre) {
        return false;
    }

    true
}

fn compare(a: &MovieRecord, b: &MovieRecord, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Rating => b.average_rating.total_cmp(&a.average_rating),
        SortBy::Title => compare_titles(&a.title, &b.title),
        SortBy::ReleaseDate => release_sort_key(b).cmp(&release_sort_key(a)),
        SortBy::Runtime => b.runtime.cmp(&a.runtime),
    }
}

/// Missing dates sort as the Unix epoch; unparseable ones sort before everything
fn release_sort_key(movie: &MovieRecord) -> Option<NaiveDate> {
    match movie.release_date {
        None => NaiveDate::from_ymd_opt(1970, 1, 1),
        Some(_) => movie.release_day(),
    }
}

/// Locale-style ordering: letters compare ignoring case and accents first,
/// then lowercase sorts before uppercase, then raw code points break ties.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| case_key(a).cmp(&case_key(b)))
        .then_with(|| a.cmp(b))
}

fn collation_key(s: &str) -> Vec<char> {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(fold_accent)
        .collect()
}

/// Per character, `false` for lowercase so it orders first
fn case_key(s: &str) -> Vec<bool> {
    s.chars().map(char::is_uppercase).collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

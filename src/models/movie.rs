use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A catalog movie in canonical form.
///
/// Catalog sources are loosely typed: ratings may arrive as strings, genres and
/// production countries as either a comma-joined string or a list. Everything is
/// normalized once here so the engine never has to sniff types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawMovie")]
pub struct MovieRecord {
    pub id: Value,
    pub title: String,
    pub average_rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    pub runtime: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_language: Option<String>,
    pub genres: Vec<String>,
    pub production_countries: Vec<String>,
    pub adult: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    /// Fields the service does not interpret, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wire form of a movie document before normalization
#[derive(Debug, Default, Deserialize)]
struct RawMovie {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    title: Value,
    #[serde(default)]
    average_rating: Value,
    #[serde(default)]
    release_date: Value,
    #[serde(default)]
    runtime: Value,
    #[serde(default)]
    original_language: Value,
    #[serde(default)]
    genres: Value,
    #[serde(default)]
    production_countries: Value,
    #[serde(default)]
    adult: Value,
    #[serde(default)]
    overview: Value,
    #[serde(default)]
    poster_path: Value,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<RawMovie> for MovieRecord {
    fn from(raw: RawMovie) -> Self {
        Self {
            id: raw.id,
            title: string_or_empty(raw.title),
            average_rating: lenient_rating(&raw.average_rating),
            release_date: optional_string(raw.release_date),
            runtime: lenient_minutes(&raw.runtime),
            original_language: optional_string(raw.original_language),
            genres: normalize_list(raw.genres),
            production_countries: normalize_list(raw.production_countries),
            adult: raw.adult == Value::Bool(true),
            overview: optional_string(raw.overview),
            poster_path: optional_string(raw.poster_path),
            extra: raw.extra,
        }
    }
}

impl MovieRecord {
    /// Language code, empty when the source had none
    pub fn language(&self) -> &str {
        self.original_language.as_deref().unwrap_or("")
    }

    /// Genres joined the way the catalog files write them, used for substring matching
    pub fn genres_joined(&self) -> String {
        self.genres.join(", ")
    }

    /// Production countries joined with `", "`, used for substring matching
    pub fn countries_joined(&self) -> String {
        self.production_countries.join(", ")
    }

    pub fn release_day(&self) -> Option<NaiveDate> {
        self.release_date.as_deref().and_then(parse_release_date)
    }

    pub fn release_year(&self) -> Option<i32> {
        self.release_day().map(|day| day.year())
    }
}

/// Parses the date formats seen in catalog files: `YYYY-MM-DD` (optionally
/// followed by a time), RFC 3339 timestamps and bare years.
fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Some(day) = raw
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
    {
        return Some(day);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }

    if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw
            .parse()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }

    None
}

fn string_or_empty(value: Value) -> String {
    optional_string(value).unwrap_or_default()
}

fn optional_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}

fn lenient_rating(value: &Value) -> f64 {
    let rating = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    if rating.is_finite() {
        rating
    } else {
        0.0
    }
}

/// Integer minutes; numeric strings keep their leading digits ("120 min" is 120)
fn lenient_minutes(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => leading_integer(s).unwrap_or(0),
        _ => 0,
    }
}

pub(crate) fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

fn normalize_list(value: Value) -> Vec<String> {
    match value {
        Value::String(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect(),
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                _ => None,
            })
            .filter(|part| !part.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

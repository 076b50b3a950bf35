use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::movie::leading_integer;

/// Order applied to filtered results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "Option<String>")]
pub enum SortBy {
    /// Highest rating first
    #[default]
    Rating,
    /// Title, A to Z
    Title,
    /// Newest first
    ReleaseDate,
    /// Longest first
    Runtime,
}

impl From<Option<String>> for SortBy {
    fn from(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("title") => SortBy::Title,
            Some("release_date") => SortBy::ReleaseDate,
            Some("runtime") => SortBy::Runtime,
            // Unknown orders fall back to rating
            _ => SortBy::Rating,
        }
    }
}

/// Filter and sort parameters for one results request.
///
/// Empty strings and missing numbers mean "any". `adult` is always active and
/// compared for equality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchCriteria {
    pub language: String,
    #[serde(deserialize_with = "lenient_float")]
    pub min_rating: f64,
    #[serde(deserialize_with = "lenient_bool")]
    pub adult: bool,
    pub country: String,
    #[serde(deserialize_with = "lenient_integer")]
    pub release_year: Option<i64>,
    #[serde(deserialize_with = "lenient_integer")]
    pub runtime: Option<i64>,
    pub genre: String,
    pub sort_by: SortBy,
}

impl SearchCriteria {
    /// Human-readable list of the active criteria, in display order
    pub fn describe(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if !self.language.is_empty() {
            lines.push(format!("Language: {}", self.language));
        }
        if self.min_rating > 0.0 {
            lines.push(format!("Min Rating: {}", self.min_rating));
        }
        lines.push(format!(
            "Adult Content: {}",
            if self.adult { "Yes" } else { "No" }
        ));
        if !self.country.is_empty() {
            lines.push(format!("Country: {}", self.country));
        }
        if let Some(year) = self.release_year {
            lines.push(format!("Year: {} (±3)", year));
        }
        if let Some(runtime) = self.runtime {
            lines.push(format!("Runtime: {} min (±15)", runtime));
        }
        if !self.genre.is_empty() {
            lines.push(format!("Genre: {}", self.genre));
        }

        lines
    }
}

/// Accepts numbers, numeric strings, `""` and null. Zero counts as unset.
fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => leading_integer(&s),
        _ => None,
    };
    Ok(parsed.filter(|n| *n != 0))
}

fn lenient_float<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(parsed.filter(|f: &f64| f.is_finite()).unwrap_or(0.0))
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::String(s) => s == "true",
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_is_default() {
        let criteria: SearchCriteria = serde_json::from_value(json!({})).unwrap();
        assert_eq!(criteria, SearchCriteria::default());
        assert_eq!(criteria.sort_by, SortBy::Rating);
        assert!(!criteria.adult);
    }

    #[test]
    fn test_form_values_parse() {
        let criteria: SearchCriteria = serde_json::from_value(json!({
            "language": "en",
            "minRating": 7,
            "adult": false,
            "country": "",
            "releaseYear": "2020",
            "runtime": "",
            "genre": "Drama",
            "sortBy": "release_date"
        }))
        .unwrap();

        assert_eq!(criteria.language, "en");
        assert_eq!(criteria.min_rating, 7.0);
        assert_eq!(criteria.release_year, Some(2020));
        assert_eq!(criteria.runtime, None);
        assert_eq!(criteria.sort_by, SortBy::ReleaseDate);
    }

    #[test]
    fn test_unknown_sort_falls_back_to_rating() {
        let criteria: SearchCriteria =
            serde_json::from_value(json!({ "sortBy": "popularity" })).unwrap();
        assert_eq!(criteria.sort_by, SortBy::Rating);

        let criteria: SearchCriteria = serde_json::from_value(json!({ "sortBy": null })).unwrap();
        assert_eq!(criteria.sort_by, SortBy::Rating);
    }

    #[test]
    fn test_sort_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(SortBy::ReleaseDate).unwrap(),
            json!("release_date")
        );
    }

    #[test]
    fn test_describe() {
        let criteria = SearchCriteria {
            language: "fr".to_string(),
            min_rating: 6.5,
            release_year: Some(1999),
            runtime: Some(120),
            genre: "Comedy".to_string(),
            ..SearchCriteria::default()
        };

        assert_eq!(
            criteria.describe(),
            vec![
                "Language: fr",
                "Min Rating: 6.5",
                "Adult Content: No",
                "Year: 1999 (±3)",
                "Runtime: 120 min (±15)",
                "Genre: Comedy",
            ]
        );
    }

    #[test]
    fn test_describe_defaults_only_shows_adult() {
        assert_eq!(SearchCriteria::default().describe(), vec!["Adult Content: No"]);
    }
}

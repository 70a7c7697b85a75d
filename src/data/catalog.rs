//! Catalog Data Model
//! Typed title records and the immutable table the loader produces.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Sentinel written into missing director/cast/country cells.
pub const UNKNOWN: &str = "Unknown";

/// Delimiter used by the multi-valued string columns.
pub const LIST_DELIMITER: &str = ", ";

/// Kind of catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ContentType {
    #[serde(rename = "Movie")]
    Movie,
    #[serde(rename = "TV Show")]
    TvShow,
}

impl ContentType {
    pub const ALL: [ContentType; 2] = [ContentType::Movie, ContentType::TvShow];

    /// Label as it appears in the source data.
    pub fn label(self) -> &'static str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::TvShow => "TV Show",
        }
    }

    /// Parse a source label; surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "Movie" => Some(ContentType::Movie),
            "TV Show" => Some(ContentType::TvShow),
            _ => None,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One catalog entry after load-time repair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub show_id: Option<String>,
    pub title: Option<String>,
    pub content_type: ContentType,
    pub director: Vec<String>,
    pub cast: Vec<String>,
    /// Raw country label; co-productions stay joined ("United States, India").
    pub country: String,
    pub date_added: NaiveDate,
    pub year_added: i32,
    pub release_year: i32,
    pub rating: String,
    pub duration: String,
    pub listed_in: Vec<String>,
    pub description: Option<String>,
}

/// Split a comma-joined cell into trimmed, non-empty parts.
pub fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(LIST_DELIMITER)
        .map(str::trim)
        .filter(|part| !part.is_empty())
}

/// Immutable table of titles, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleTable {
    rows: Vec<Title>,
}

impl TitleTable {
    pub fn new(rows: Vec<Title>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Title] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Title> {
        self.rows.iter()
    }

    /// Distinct content types, first-encountered order.
    pub fn content_types(&self) -> Vec<ContentType> {
        unique_in_order(self.rows.iter().map(|t| t.content_type))
    }

    /// Distinct raw country labels, first-encountered order.
    pub fn countries(&self) -> Vec<String> {
        unique_in_order(self.rows.iter().map(|t| t.country.clone()))
    }

    /// Distinct ratings, first-encountered order.
    pub fn ratings(&self) -> Vec<String> {
        unique_in_order(self.rows.iter().map(|t| t.rating.clone()))
    }

    /// Inclusive (min, max) of `year_added`, or None for an empty table.
    pub fn year_added_bounds(&self) -> Option<(i32, i32)> {
        let min = self.rows.iter().map(|t| t.year_added).min()?;
        let max = self.rows.iter().map(|t| t.year_added).max()?;
        Some((min, max))
    }
}

impl<'a> IntoIterator for &'a TitleTable {
    type Item = &'a Title;
    type IntoIter = std::slice::Iter<'a, Title>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

fn unique_in_order<T, I>(values: I) -> Vec<T>
where
    T: Eq + std::hash::Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::fixtures::title;
    use super::*;

    #[test]
    fn content_type_parses_source_labels() {
        assert_eq!(ContentType::parse("Movie"), Some(ContentType::Movie));
        assert_eq!(ContentType::parse(" TV Show "), Some(ContentType::TvShow));
        assert_eq!(ContentType::parse("Podcast"), None);
        assert_eq!(ContentType::TvShow.to_string(), "TV Show");
    }

    #[test]
    fn observed_values_keep_first_seen_order() {
        let table = TitleTable::new(vec![
            title(ContentType::TvShow, "USA", 2020),
            title(ContentType::Movie, "India", 2018),
            title(ContentType::Movie, "USA", 2021),
        ]);
        assert_eq!(
            table.content_types(),
            vec![ContentType::TvShow, ContentType::Movie]
        );
        assert_eq!(table.countries(), vec!["USA", "India"]);
        assert_eq!(table.year_added_bounds(), Some((2018, 2021)));
        assert_eq!(TitleTable::default().year_added_bounds(), None);
    }

    #[test]
    fn split_list_skips_empty_parts() {
        let parts: Vec<&str> = split_list("Dramas, , Comedies").collect();
        assert_eq!(parts, vec!["Dramas", "Comedies"]);
    }
}

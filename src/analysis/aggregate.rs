//! Aggregation Module
//! Value counts, exploded counts and type pivots over a filtered title table.

use crate::data::{ContentType, Title, TitleTable, UNKNOWN};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Row limit for the ranking views.
pub const TOP_N: usize = 10;

/// Label -> count pairs, sorted by count descending.
///
/// Ties keep the order in which labels were first encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CountSeries {
    pub entries: Vec<(String, usize)>,
}

impl CountSeries {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, count)| *count)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(l, _)| l.as_str()).collect()
    }

    fn truncated(mut self, limit: usize) -> Self {
        self.entries.truncate(limit);
        self
    }
}

/// Counts per (key, content type), one column per observed type.
///
/// `counts[row][col]` belongs to `index[row]` and `columns[col]`; absent
/// combinations hold 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotTable<K> {
    pub index: Vec<K>,
    pub columns: Vec<ContentType>,
    pub counts: Vec<Vec<usize>>,
}

impl<K> Default for PivotTable<K> {
    fn default() -> Self {
        Self {
            index: Vec::new(),
            columns: Vec::new(),
            counts: Vec::new(),
        }
    }
}

impl<K: PartialEq> PivotTable<K> {
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, key: &K, column: ContentType) -> Option<usize> {
        let row = self.index.iter().position(|k| k == key)?;
        let col = self.columns.iter().position(|c| *c == column)?;
        Some(self.counts[row][col])
    }

    /// All counts of one type column, in index order.
    pub fn column(&self, column: ContentType) -> Option<Vec<usize>> {
        let col = self.columns.iter().position(|c| *c == column)?;
        Some(self.counts.iter().map(|row| row[col]).collect())
    }
}

/// Top genres per content type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenreBreakdown {
    pub movies: CountSeries,
    pub tv_shows: CountSeries,
}

fn value_counts<'a, I>(values: I) -> CountSeries
where
    I: IntoIterator<Item = &'a str>,
{
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<(String, usize)> = Vec::new();
    for value in values {
        match positions.get(value) {
            Some(&idx) => entries[idx].1 += 1,
            None => {
                positions.insert(value, entries.len());
                entries.push((value.to_string(), 1));
            }
        }
    }
    // Stable sort keeps first-encountered order among equal counts.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    CountSeries { entries }
}

fn pivot_by_type<K, F>(table: &TitleTable, key: F) -> PivotTable<K>
where
    K: Ord + Clone,
    F: Fn(&Title) -> K,
{
    let mut grouped: BTreeMap<K, BTreeMap<ContentType, usize>> = BTreeMap::new();
    let mut observed = BTreeSet::new();
    for title in table {
        observed.insert(title.content_type);
        *grouped
            .entry(key(title))
            .or_default()
            .entry(title.content_type)
            .or_insert(0) += 1;
    }

    let columns: Vec<ContentType> = observed.into_iter().collect();
    let (index, counts) = grouped
        .into_iter()
        .map(|(k, by_type)| {
            let row: Vec<usize> = columns
                .iter()
                .map(|c| by_type.get(c).copied().unwrap_or(0))
                .collect();
            (k, row)
        })
        .unzip();

    PivotTable {
        index,
        columns,
        counts,
    }
}

/// Number of titles per content type.
pub fn type_distribution(table: &TitleTable) -> CountSeries {
    value_counts(table.iter().map(|t| t.content_type.label()))
}

/// Titles added per year, split by type, ascending by year.
pub fn growth_over_time(table: &TitleTable) -> PivotTable<i32> {
    pivot_by_type(table, |t| t.year_added)
}

/// Countries with the most titles.
pub fn country_ranking(table: &TitleTable, limit: usize) -> CountSeries {
    value_counts(table.iter().map(|t| t.country.as_str())).truncated(limit)
}

/// Most frequent genres, computed separately for movies and TV shows.
pub fn genre_breakdown(table: &TitleTable, limit: usize) -> GenreBreakdown {
    let genres_of = |content_type: ContentType| {
        value_counts(
            table
                .iter()
                .filter(|t| t.content_type == content_type)
                .flat_map(|t| t.listed_in.iter().map(String::as_str)),
        )
        .truncated(limit)
    };
    GenreBreakdown {
        movies: genres_of(ContentType::Movie),
        tv_shows: genres_of(ContentType::TvShow),
    }
}

/// Titles per rating, split by type.
pub fn rating_distribution(table: &TitleTable) -> PivotTable<String> {
    pivot_by_type(table, |t| t.rating.clone())
}

/// Titles per release year, split by type, ascending by year.
pub fn release_year_distribution(table: &TitleTable) -> PivotTable<i32> {
    pivot_by_type(table, |t| t.release_year)
}

/// Directors credited on the most titles; the "Unknown" placeholder is skipped.
pub fn top_directors(table: &TitleTable, limit: usize) -> CountSeries {
    value_counts(
        table
            .iter()
            .flat_map(|t| t.director.iter().map(String::as_str))
            .filter(|d| *d != UNKNOWN),
    )
    .truncated(limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{title, with_directors, with_genres, with_rating, with_release_year};
    use crate::data::{apply_filter, FilterSelection};

    #[test]
    fn type_distribution_of_filtered_example() {
        let table = TitleTable::new(vec![
            title(ContentType::Movie, "India", 2019),
            title(ContentType::Movie, "India", 2020),
            title(ContentType::TvShow, "USA", 2019),
        ]);
        let mut selection = FilterSelection::all_observed(&table);
        selection.year_range = (2019, 2019);
        let dist = type_distribution(&apply_filter(&table, &selection));
        assert_eq!(dist.get("Movie"), Some(1));
        assert_eq!(dist.get("TV Show"), Some(1));
        assert_eq!(dist.len(), 2);
    }

    #[test]
    fn growth_pivot_fills_missing_combinations() {
        let table = TitleTable::new(vec![
            title(ContentType::TvShow, "USA", 2021),
            title(ContentType::Movie, "USA", 2019),
            title(ContentType::Movie, "USA", 2019),
            title(ContentType::TvShow, "USA", 2020),
        ]);
        let growth = growth_over_time(&table);
        assert_eq!(growth.index, vec![2019, 2020, 2021]);
        assert_eq!(growth.columns, vec![ContentType::Movie, ContentType::TvShow]);
        assert_eq!(growth.counts, vec![vec![2, 0], vec![0, 1], vec![0, 1]]);
        assert_eq!(growth.get(&2019, ContentType::TvShow), Some(0));
        assert_eq!(growth.column(ContentType::Movie), Some(vec![2, 0, 0]));
    }

    #[test]
    fn pivot_columns_are_observed_types_only() {
        let table = TitleTable::new(vec![title(ContentType::Movie, "USA", 2019)]);
        let growth = growth_over_time(&table);
        assert_eq!(growth.columns, vec![ContentType::Movie]);
        assert_eq!(growth.column(ContentType::TvShow), None);
    }

    #[test]
    fn country_ranking_is_top_n_desc_with_stable_ties() {
        let mut rows = Vec::new();
        for (i, country) in ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L"]
            .iter()
            .enumerate()
        {
            rows.push(title(ContentType::Movie, country, 2020));
            if i == 5 {
                rows.push(title(ContentType::Movie, country, 2020));
            }
        }
        let ranking = country_ranking(&TitleTable::new(rows), TOP_N);
        assert_eq!(ranking.len(), TOP_N);
        assert_eq!(ranking.entries[0], ("F".to_string(), 2));
        assert_eq!(
            ranking.labels()[1..],
            ["A", "B", "C", "D", "E", "G", "H", "I", "J"]
        );
    }

    #[test]
    fn genres_are_exploded_per_type() {
        let table = TitleTable::new(vec![
            with_genres(title(ContentType::Movie, "USA", 2020), &["Drama", "Comedy"]),
            with_genres(title(ContentType::Movie, "USA", 2020), &["Drama"]),
            with_genres(title(ContentType::TvShow, "USA", 2020), &["Kids' TV"]),
        ]);
        let genres = genre_breakdown(&table, TOP_N);
        assert_eq!(
            genres.movies.entries,
            vec![("Drama".to_string(), 2), ("Comedy".to_string(), 1)]
        );
        assert_eq!(genres.tv_shows.entries, vec![("Kids' TV".to_string(), 1)]);
    }

    #[test]
    fn ratings_pivot_is_sorted_by_rating() {
        let table = TitleTable::new(vec![
            with_rating(title(ContentType::TvShow, "USA", 2020), "TV-MA"),
            with_rating(title(ContentType::Movie, "USA", 2020), "PG"),
            with_rating(title(ContentType::Movie, "USA", 2020), "TV-MA"),
        ]);
        let ratings = rating_distribution(&table);
        assert_eq!(ratings.index, vec!["PG".to_string(), "TV-MA".to_string()]);
        assert_eq!(ratings.counts, vec![vec![1, 0], vec![1, 1]]);
    }

    #[test]
    fn release_years_ascend() {
        let table = TitleTable::new(vec![
            with_release_year(title(ContentType::Movie, "USA", 2020), 2001),
            with_release_year(title(ContentType::TvShow, "USA", 2020), 1999),
        ]);
        let years = release_year_distribution(&table);
        assert_eq!(years.index, vec![1999, 2001]);
        assert_eq!(years.counts, vec![vec![0, 1], vec![1, 0]]);
    }

    #[test]
    fn top_directors_skip_unknown() {
        let table = TitleTable::new(vec![
            title(ContentType::Movie, "USA", 2020),
            title(ContentType::Movie, "USA", 2020),
            with_directors(title(ContentType::Movie, "USA", 2020), &["Ava", "Ben"]),
            with_directors(title(ContentType::TvShow, "USA", 2020), &["Ben"]),
        ]);
        let directors = top_directors(&table, TOP_N);
        assert_eq!(
            directors.entries,
            vec![("Ben".to_string(), 2), ("Ava".to_string(), 1)]
        );
        assert_eq!(directors.get(UNKNOWN), None);
    }

    #[test]
    fn empty_input_gives_empty_results() {
        let table = TitleTable::default();
        assert!(type_distribution(&table).is_empty());
        assert!(growth_over_time(&table).is_empty());
        assert!(country_ranking(&table, TOP_N).is_empty());
        assert!(genre_breakdown(&table, TOP_N).movies.is_empty());
        assert!(rating_distribution(&table).is_empty());
        assert!(release_year_distribution(&table).is_empty());
        assert!(top_directors(&table, TOP_N).is_empty());
    }
}

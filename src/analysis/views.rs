//! Dashboard Views
//! Quick stats, dataset overview and the per-view aggregates recomputed on every filter change.

use crate::analysis::aggregate::{
    country_ranking, genre_breakdown, growth_over_time, rating_distribution,
    release_year_distribution, top_directors, type_distribution, CountSeries, GenreBreakdown,
    PivotTable, TOP_N,
};
use crate::charts::{ChartKind, ChartSpec};
use crate::data::{ContentType, LoadReport, Title, TitleTable};
use serde::Serialize;

/// Rows shown in the overview preview.
pub const PREVIEW_ROWS: usize = 11;

/// Column names of a title record, in source order.
pub const TITLE_COLUMNS: [&str; 13] = [
    "show_id",
    "type",
    "title",
    "director",
    "cast",
    "country",
    "date_added",
    "year_added",
    "release_year",
    "rating",
    "duration",
    "listed_in",
    "description",
];

pub const TYPE_CHART: &str = "type_distribution";
pub const GROWTH_CHART: &str = "growth_over_time";
pub const COUNTRY_CHART: &str = "top_countries";
pub const MOVIE_GENRE_CHART: &str = "movie_genres";
pub const TV_GENRE_CHART: &str = "tv_show_genres";
pub const RATING_CHART: &str = "ratings_by_type";
pub const RELEASE_YEAR_CHART: &str = "release_years";
pub const DIRECTOR_CHART: &str = "top_directors";

/// Sidebar headline numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuickStats {
    pub movies: usize,
    pub tv_shows: usize,
    pub oldest_release: Option<i32>,
    pub newest_release: Option<i32>,
}

impl QuickStats {
    pub fn compute(table: &TitleTable) -> Self {
        let count = |kind: ContentType| table.iter().filter(|t| t.content_type == kind).count();
        Self {
            movies: count(ContentType::Movie),
            tv_shows: count(ContentType::TvShow),
            oldest_release: table.iter().map(|t| t.release_year).min(),
            newest_release: table.iter().map(|t| t.release_year).max(),
        }
    }
}

/// Shape, preview rows and gaps of the filtered table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatasetOverview {
    pub rows: usize,
    pub columns: usize,
    pub preview: Vec<Title>,
    /// Per column: cells still empty after load repair; "Unknown" fills count as present.
    pub missing: Vec<(String, usize)>,
    /// Repairs done while loading the full catalog.
    pub repairs: LoadReport,
}

impl DatasetOverview {
    pub fn compute(table: &TitleTable, report: &LoadReport) -> Self {
        Self {
            rows: table.len(),
            columns: TITLE_COLUMNS.len(),
            preview: table.iter().take(PREVIEW_ROWS).cloned().collect(),
            missing: missing_values(table),
            repairs: report.clone(),
        }
    }
}

fn missing_values(table: &TitleTable) -> Vec<(String, usize)> {
    TITLE_COLUMNS
        .iter()
        .map(|&column| {
            let count = table
                .iter()
                .filter(|t| match column {
                    "show_id" => t.show_id.is_none(),
                    "title" => t.title.is_none(),
                    "listed_in" => t.listed_in.is_empty(),
                    "description" => t.description.is_none(),
                    _ => false,
                })
                .count();
            (column.to_string(), count)
        })
        .collect()
}

/// Everything one render of the dashboard needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardViews {
    pub quick_stats: QuickStats,
    pub overview: DatasetOverview,
    pub type_distribution: CountSeries,
    pub growth: PivotTable<i32>,
    pub countries: CountSeries,
    pub genres: GenreBreakdown,
    pub ratings: PivotTable<String>,
    pub release_years: PivotTable<i32>,
    pub directors: CountSeries,
}

impl DashboardViews {
    /// Recompute every view from a filtered table.
    pub fn compute(table: &TitleTable, report: &LoadReport) -> Self {
        Self {
            quick_stats: QuickStats::compute(table),
            overview: DatasetOverview::compute(table, report),
            type_distribution: type_distribution(table),
            growth: growth_over_time(table),
            countries: country_ranking(table, TOP_N),
            genres: genre_breakdown(table, TOP_N),
            ratings: rating_distribution(table),
            release_years: release_year_distribution(table),
            directors: top_directors(table, TOP_N),
        }
    }

    /// Chart for every view, in tab order.
    pub fn charts(&self) -> Vec<ChartSpec> {
        vec![
            ChartSpec::from_counts(
                TYPE_CHART,
                "Distribution of Content Type",
                ChartKind::Bar,
                "Type",
                &self.type_distribution,
            ),
            ChartSpec::from_pivot(
                GROWTH_CHART,
                "Content Added per Year",
                ChartKind::Area,
                "Year added",
                &self.growth,
            ),
            ChartSpec::from_counts(
                COUNTRY_CHART,
                "Top 10 Countries",
                ChartKind::Bar,
                "Country",
                &self.countries,
            ),
            ChartSpec::from_counts(
                MOVIE_GENRE_CHART,
                "Top Movie Genres",
                ChartKind::Bar,
                "Genre",
                &self.genres.movies,
            ),
            ChartSpec::from_counts(
                TV_GENRE_CHART,
                "Top TV Show Genres",
                ChartKind::Bar,
                "Genre",
                &self.genres.tv_shows,
            ),
            ChartSpec::from_pivot(
                RATING_CHART,
                "Content Ratings by Type",
                ChartKind::Bar,
                "Rating",
                &self.ratings,
            ),
            ChartSpec::from_pivot(
                RELEASE_YEAR_CHART,
                "Content by Release Year",
                ChartKind::Line,
                "Release year",
                &self.release_years,
            ),
            ChartSpec::from_counts(
                DIRECTOR_CHART,
                "Top 10 Directors",
                ChartKind::Bar,
                "Director",
                &self.directors,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{title, with_release_year};
    use crate::data::samples::SAMPLE_CSV;
    use crate::data::{load, DataSource};

    #[test]
    fn quick_stats_counts_types_and_years() {
        let table = TitleTable::new(vec![
            with_release_year(title(ContentType::Movie, "USA", 2020), 1999),
            with_release_year(title(ContentType::TvShow, "USA", 2020), 2015),
            with_release_year(title(ContentType::Movie, "USA", 2020), 2003),
        ]);
        let stats = QuickStats::compute(&table);
        assert_eq!(stats.movies, 2);
        assert_eq!(stats.tv_shows, 1);
        assert_eq!(stats.oldest_release, Some(1999));
        assert_eq!(stats.newest_release, Some(2015));
        assert_eq!(QuickStats::compute(&TitleTable::default()).oldest_release, None);
    }

    #[test]
    fn overview_reports_shape_and_placeholders() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("titles.csv");
        std::fs::write(&path, SAMPLE_CSV).expect("write csv");
        let loaded = load(&DataSource::Path(path)).expect("load");

        let overview = DatasetOverview::compute(&loaded.table, &loaded.report);
        assert_eq!(overview.rows, 4);
        assert_eq!(overview.columns, 13);
        assert_eq!(overview.preview.len(), 4);
        let missing = |name: &str| {
            overview
                .missing
                .iter()
                .find(|(c, _)| c == name)
                .map(|(_, n)| *n)
        };
        // Filled placeholders are repairs, not gaps.
        assert_eq!(missing("director"), Some(0));
        assert_eq!(missing("country"), Some(0));
        assert_eq!(missing("rating"), Some(0));
        assert_eq!(overview.repairs.filled_director, 1);
        assert_eq!(overview.repairs.filled_country, 1);
        assert_eq!(overview.repairs.dropped_missing, 2);
    }

    #[test]
    fn preview_is_capped() {
        let rows = (0..20)
            .map(|i| title(ContentType::Movie, "USA", 2000 + i))
            .collect();
        let overview = DatasetOverview::compute(&TitleTable::new(rows), &LoadReport::default());
        assert_eq!(overview.preview.len(), PREVIEW_ROWS);
    }

    #[test]
    fn charts_follow_tab_order_and_kinds() {
        let table = TitleTable::new(vec![
            title(ContentType::Movie, "India", 2019),
            title(ContentType::TvShow, "USA", 2020),
        ]);
        let views = DashboardViews::compute(&table, &LoadReport::default());
        let charts = views.charts();
        let ids: Vec<&str> = charts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                TYPE_CHART,
                GROWTH_CHART,
                COUNTRY_CHART,
                MOVIE_GENRE_CHART,
                TV_GENRE_CHART,
                RATING_CHART,
                RELEASE_YEAR_CHART,
                DIRECTOR_CHART
            ]
        );
        assert_eq!(charts[1].kind, ChartKind::Area);
        assert_eq!(charts[6].kind, ChartKind::Line);
        assert_eq!(charts[2].categories, vec!["India", "USA"]);
    }
}

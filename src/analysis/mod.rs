//! Analysis module - per-view aggregations over the filtered catalog

mod aggregate;
mod views;

pub use aggregate::{CountSeries, PivotTable};
pub use views::{
    DashboardViews, DatasetOverview, QuickStats, COUNTRY_CHART, DIRECTOR_CHART, GROWTH_CHART,
    MOVIE_GENRE_CHART, RATING_CHART, RELEASE_YEAR_CHART, TV_GENRE_CHART, TYPE_CHART,
};

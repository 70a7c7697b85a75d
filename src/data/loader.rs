//! CSV Data Loader Module
//! Fetches the catalog CSV, repairs it with Polars and builds typed title records.

use crate::data::catalog::{split_list, ContentType, Title, TitleTable, UNKNOWN};
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use serde::Serialize;
use std::fmt;
use std::io::Cursor;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Location of the public titles dataset.
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/meetgoel/ML-Projects/refs/heads/main/Datasets/netflix_titles.csv";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Columns the loader cannot work without.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "type",
    "director",
    "cast",
    "country",
    "date_added",
    "release_year",
    "rating",
    "duration",
    "listed_in",
];

/// Accepted `date_added` layouts ("September 25, 2021", "2021-09-25").
const DATE_FORMATS: [&str; 2] = ["%B %d, %Y", "%Y-%m-%d"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to fetch dataset: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Dataset request returned HTTP {0}")]
    Status(u16),
    #[error("Failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Required column missing: {0}")]
    MissingColumn(String),
}

/// Where the catalog CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    Path(PathBuf),
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Url(DEFAULT_DATASET_URL.to_string())
    }
}

impl DataSource {
    /// http(s) locations are fetched over the network, anything else is a file path.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::Path(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => f.write_str(url),
            DataSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// What the repair rules did to the raw rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub source: String,
    pub rows_read: usize,
    pub rows_kept: usize,
    pub filled_director: usize,
    pub filled_cast: usize,
    pub filled_country: usize,
    /// Rows without `date_added`, `rating` or `duration`.
    pub dropped_missing: usize,
    /// Rows whose `date_added` could not be parsed.
    pub dropped_bad_date: usize,
    /// Rows with an unknown `type` or a non-numeric `release_year`.
    pub dropped_invalid: usize,
}

/// Normalized table plus the repair summary.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub table: TitleTable,
    pub report: LoadReport,
}

/// Fetch and normalize the catalog. Every failure is fatal to the caller.
pub fn load(source: &DataSource) -> Result<LoadedCatalog, LoaderError> {
    info!(%source, "loading catalog");
    let bytes = fetch_bytes(source)?;
    debug!(bytes = bytes.len(), "dataset fetched");

    let mut loaded = parse_catalog(bytes)?;
    loaded.report.source = source.to_string();
    Ok(loaded)
}

fn fetch_bytes(source: &DataSource) -> Result<Vec<u8>, LoaderError> {
    match source {
        DataSource::Url(url) => {
            let client = reqwest::blocking::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()?;
            let response = client.get(url).send()?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoaderError::Status(status.as_u16()));
            }
            Ok(response.bytes()?.to_vec())
        }
        DataSource::Path(path) => Ok(std::fs::read(path)?),
    }
}

/// Parse raw CSV bytes and apply the repair rules.
pub fn parse_catalog(bytes: Vec<u8>) -> Result<LoadedCatalog, LoaderError> {
    // Read everything as text; typed parsing happens per row below.
    let raw = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;

    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|name| raw.get_column_index(name).is_none())
    {
        return Err(LoaderError::MissingColumn(missing.to_string()));
    }

    // Quoted-empty and whitespace-only cells count as missing, like absent ones.
    let raw = raw
        .lazy()
        .with_columns(REQUIRED_COLUMNS.map(blank_as_null))
        .collect()?;

    let mut report = LoadReport {
        rows_read: raw.height(),
        filled_director: raw.column("director")?.null_count(),
        filled_cast: raw.column("cast")?.null_count(),
        filled_country: raw.column("country")?.null_count(),
        ..LoadReport::default()
    };

    let repaired = raw
        .lazy()
        .with_columns([
            col("director").fill_null(lit(UNKNOWN)),
            col("cast").fill_null(lit(UNKNOWN)),
            col("country").fill_null(lit(UNKNOWN)),
        ])
        .filter(
            col("date_added")
                .is_not_null()
                .and(col("rating").is_not_null())
                .and(col("duration").is_not_null()),
        )
        .collect()?;
    report.dropped_missing = report.rows_read - repaired.height();

    let titles = build_titles(&repaired, &mut report)?;
    report.rows_kept = titles.len();

    info!(
        rows_read = report.rows_read,
        rows_kept = report.rows_kept,
        filled_director = report.filled_director,
        filled_cast = report.filled_cast,
        filled_country = report.filled_country,
        "catalog normalized"
    );
    if report.dropped_bad_date > 0 || report.dropped_invalid > 0 {
        warn!(
            bad_date = report.dropped_bad_date,
            invalid = report.dropped_invalid,
            "dropped rows with unparsable values"
        );
    }

    Ok(LoadedCatalog {
        table: TitleTable::new(titles),
        report,
    })
}

fn build_titles(df: &DataFrame, report: &mut LoadReport) -> Result<Vec<Title>, LoaderError> {
    let type_col = text_column(df, "type")?;
    let director_col = text_column(df, "director")?;
    let cast_col = text_column(df, "cast")?;
    let country_col = text_column(df, "country")?;
    let date_col = text_column(df, "date_added")?;
    let release_col = text_column(df, "release_year")?;
    let rating_col = text_column(df, "rating")?;
    let duration_col = text_column(df, "duration")?;
    let listed_col = text_column(df, "listed_in")?;
    let show_id_col = optional_column(df, "show_id");
    let title_col = optional_column(df, "title");
    let description_col = optional_column(df, "description");

    let mut titles = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let Some(date_added) = date_col.get(idx).and_then(parse_date_added) else {
            report.dropped_bad_date += 1;
            continue;
        };
        let Some(content_type) = type_col.get(idx).and_then(ContentType::parse) else {
            report.dropped_invalid += 1;
            continue;
        };
        let Some(release_year) = release_col
            .get(idx)
            .and_then(|v| v.trim().parse::<i32>().ok())
        else {
            report.dropped_invalid += 1;
            continue;
        };

        titles.push(Title {
            show_id: optional_text(show_id_col, idx),
            title: optional_text(title_col, idx),
            content_type,
            director: people_list(director_col.get(idx)),
            cast: people_list(cast_col.get(idx)),
            country: country_col
                .get(idx)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(UNKNOWN)
                .to_string(),
            date_added,
            year_added: date_added.year(),
            release_year,
            rating: rating_col.get(idx).unwrap_or_default().trim().to_string(),
            duration: duration_col.get(idx).unwrap_or_default().trim().to_string(),
            listed_in: listed_col
                .get(idx)
                .map(|v| split_list(v).map(String::from).collect())
                .unwrap_or_default(),
            description: optional_text(description_col, idx),
        });
    }
    Ok(titles)
}

fn blank_as_null(name: &str) -> Expr {
    let trimmed = col(name).str().strip_chars(lit(NULL));
    when(trimmed.eq(lit("")))
        .then(lit(NULL).cast(DataType::String))
        .otherwise(col(name))
        .alias(name)
}

/// Parse a `date_added` cell; leading/trailing blanks are common in the source.
pub fn parse_date_added(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

fn people_list(raw: Option<&str>) -> Vec<String> {
    let people: Vec<String> = raw
        .map(|v| split_list(v).map(String::from).collect())
        .unwrap_or_default();
    if people.is_empty() {
        vec![UNKNOWN.to_string()]
    } else {
        people
    }
}

fn text_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked, LoaderError> {
    Ok(df.column(name)?.str()?)
}

fn optional_column<'a>(df: &'a DataFrame, name: &str) -> Option<&'a StringChunked> {
    df.column(name).ok().and_then(|c| c.str().ok())
}

fn optional_text(column: Option<&StringChunked>, idx: usize) -> Option<String> {
    column
        .and_then(|c| c.get(idx))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

#[cfg(test)]
pub(crate) mod samples {
    /// Small CSV in the source layout, including every repair case.
    pub const SAMPLE_CSV: &str = "\
show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in,description
s1,Movie,Dick Johnson Is Dead,Kirsten Johnson,,United States,\"September 25, 2021\",2020,PG-13,90 min,Documentaries,A daughter's tribute
s2,TV Show,Blood & Water,,\"Ama Qamata, Khosi Ngema\",South Africa,\"September 24, 2021\",2021,TV-MA,2 Seasons,\"International TV Shows, TV Dramas, TV Mysteries\",Two teens
s3,TV Show,Ganglands,Julien Leclercq,Sami Bouajila,,\"September 24, 2021\",2021,TV-MA,1 Season,\"Crime TV Shows, International TV Shows\",A heist
s4,Movie,No Date,Someone,Someone Else,India,,2019,TV-14,100 min,Dramas,Missing date
s5,Movie,No Rating,Someone,Someone Else,India,\"May 1, 2019\",2019,,100 min,Dramas,Missing rating
s6,Movie,Bad Date,Someone,Someone Else,India,sometime soon,2019,TV-14,100 min,Dramas,Unparsable date
s7,Movie,Spaced Date,\"Rajiv Chilaka, Someone\",Vatsal Dubey,\"India, United States\",\" August 4, 2017\",2016,TV-Y7,67 min,\"Children & Family Movies, Comedies\",Leading blank
s8,Podcast,Odd Type,Someone,Someone Else,India,\"May 1, 2019\",2019,TV-14,100 min,Dramas,Unknown type
";
}

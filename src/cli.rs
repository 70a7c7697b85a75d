//! CLI argument definitions for the titles dashboard.

use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::data::{ContentType, DataSource, FilterSelection, TitleTable};

#[derive(Parser, Debug)]
#[command(
    name = "titles-dashboard",
    version,
    about = "Streaming catalog dashboard - filter and chart the netflix_titles dataset",
    long_about = "Load the streaming titles catalog, filter it by type, country, year added \
                  and rating, and explore eight descriptive views.\n\n\
                  Without --summary or --export the interactive dashboard window opens."
)]
pub struct Cli {
    /// Catalog to load: an http(s) URL or a local CSV path.
    #[arg(long = "source", value_name = "URL|PATH")]
    pub source: Option<String>,

    /// Keep only this content type ("Movie" or "TV Show"); repeatable.
    #[arg(long = "type", value_name = "TYPE", value_parser = parse_content_type)]
    pub types: Vec<ContentType>,

    /// Keep only this exact country label; repeatable.
    #[arg(long = "country", value_name = "COUNTRY")]
    pub countries: Vec<String>,

    /// Keep only this rating; repeatable.
    #[arg(long = "rating", value_name = "RATING")]
    pub ratings: Vec<String>,

    /// First year added to keep (inclusive).
    #[arg(long = "year-from", value_name = "YEAR")]
    pub year_from: Option<i32>,

    /// Last year added to keep (inclusive).
    #[arg(long = "year-to", value_name = "YEAR")]
    pub year_to: Option<i32>,

    /// Print every view as a terminal table and exit.
    #[arg(long = "summary")]
    pub summary: bool,

    /// Write one PNG per chart plus views.json into DIR and exit.
    #[arg(long = "export", value_name = "DIR")]
    pub export: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

fn parse_content_type(raw: &str) -> Result<ContentType, String> {
    ContentType::parse(raw).ok_or_else(|| {
        format!(
            "unknown content type '{raw}' (expected one of: {})",
            ContentType::ALL.map(ContentType::label).join(", ")
        )
    })
}

impl Cli {
    pub fn data_source(&self) -> DataSource {
        self.source
            .as_deref()
            .map(DataSource::parse)
            .unwrap_or_default()
    }

    /// True when the run should not open a window.
    pub fn is_headless(&self) -> bool {
        self.summary || self.export.is_some()
    }

    /// Build the filter selection; dimensions left unset select every observed value.
    pub fn selection(&self, table: &TitleTable) -> FilterSelection {
        let mut selection = FilterSelection::all_observed(table);
        if !self.types.is_empty() {
            selection.types = self.types.iter().copied().collect::<BTreeSet<_>>();
        }
        if !self.countries.is_empty() {
            selection.countries = self.countries.iter().cloned().collect::<HashSet<_>>();
        }
        if !self.ratings.is_empty() {
            selection.ratings = self.ratings.iter().cloned().collect::<HashSet<_>>();
        }
        if let Some(from) = self.year_from {
            selection.year_range.0 = from;
        }
        if let Some(to) = self.year_to {
            selection.year_range.1 = to;
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{title, with_rating};

    fn table() -> TitleTable {
        TitleTable::new(vec![
            with_rating(title(ContentType::Movie, "India", 2018), "TV-MA"),
            with_rating(title(ContentType::TvShow, "United States", 2020), "PG"),
        ])
    }

    #[test]
    fn defaults_open_the_window_on_the_fixed_url() {
        let cli = Cli::try_parse_from(["titles-dashboard"]).expect("parse");
        assert!(!cli.is_headless());
        assert_eq!(cli.data_source(), DataSource::default());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn repeated_flags_collect_values() {
        let cli = Cli::try_parse_from([
            "titles-dashboard",
            "--type",
            "TV Show",
            "--type",
            "Movie",
            "--country",
            "India",
            "--summary",
            "-vv",
        ])
        .expect("parse");
        assert_eq!(cli.types, vec![ContentType::TvShow, ContentType::Movie]);
        assert_eq!(cli.countries, vec!["India".to_string()]);
        assert!(cli.is_headless());
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(Cli::try_parse_from(["titles-dashboard", "--type", "Podcast"]).is_err());
    }

    #[test]
    fn local_source_is_a_path() {
        let cli = Cli::try_parse_from(["titles-dashboard", "--source", "data/titles.csv"])
            .expect("parse");
        assert_eq!(
            cli.data_source(),
            DataSource::Path(PathBuf::from("data/titles.csv"))
        );
    }

    #[test]
    fn unset_dimensions_select_everything_observed() {
        let table = table();
        let cli = Cli::try_parse_from(["titles-dashboard", "--year-from", "2019"]).expect("parse");
        let selection = cli.selection(&table);

        assert_eq!(selection.year_range, (2019, 2020));
        assert_eq!(selection.types.len(), 2);
        assert!(selection.countries.contains("India"));
        assert!(selection.ratings.contains("PG"));
    }

    #[test]
    fn explicit_dimensions_replace_defaults() {
        let table = table();
        let cli = Cli::try_parse_from([
            "titles-dashboard",
            "--rating",
            "PG",
            "--year-to",
            "2019",
        ])
        .expect("parse");
        let selection = cli.selection(&table);

        assert_eq!(selection.ratings, HashSet::from(["PG".to_string()]));
        assert_eq!(selection.year_range, (2018, 2019));
    }
}

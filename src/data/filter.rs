//! Filter Module
//! Boolean masking of the catalog on type, country, year-added range and rating.

use crate::data::catalog::{ContentType, Title, TitleTable};
use rayon::prelude::*;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// User-chosen predicate values. All four dimensions are ANDed.
///
/// An empty set matches nothing for its dimension; "no filter" is expressed by
/// selecting every observed value, see [`FilterSelection::all_observed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub types: BTreeSet<ContentType>,
    pub countries: HashSet<String>,
    /// Inclusive `(lo, hi)` bounds on `year_added`.
    pub year_range: (i32, i32),
    pub ratings: HashSet<String>,
}

impl FilterSelection {
    /// Selection that keeps every row of `table`.
    pub fn all_observed(table: &TitleTable) -> Self {
        Self {
            types: table.content_types().into_iter().collect(),
            countries: table.countries().into_iter().collect(),
            year_range: table.year_added_bounds().unwrap_or((i32::MIN, i32::MAX)),
            ratings: table.ratings().into_iter().collect(),
        }
    }

    pub fn matches(&self, title: &Title) -> bool {
        let (lo, hi) = self.year_range;
        self.types.contains(&title.content_type)
            && self.countries.contains(&title.country)
            && title.year_added >= lo
            && title.year_added <= hi
            && self.ratings.contains(&title.rating)
    }
}

/// Rows of `table` matching `selection`, in their original order.
pub fn apply_filter(table: &TitleTable, selection: &FilterSelection) -> TitleTable {
    let rows: Vec<Title> = table
        .rows()
        .par_iter()
        .filter(|title| selection.matches(title))
        .cloned()
        .collect();
    debug!(input = table.len(), output = rows.len(), "filter applied");
    TitleTable::new(rows)
}

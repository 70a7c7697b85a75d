//! Chart Specification
//! Render-neutral description of one chart, shared by the interactive and static renderers.

use crate::analysis::{CountSeries, PivotTable};
use serde::Serialize;
use std::fmt::Display;

/// How a chart is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Bar,
    Area,
    Line,
}

/// One named value column of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

/// Everything a renderer needs to draw a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Stable identifier, used for plot ids and export file names.
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    /// Display label per x position.
    pub categories: Vec<String>,
    /// X coordinate per category.
    pub x_values: Vec<f64>,
    /// True when `x_values` are real numbers (years) rather than slot indices.
    pub numeric_x: bool,
    pub series: Vec<Series>,
}

/// Keys a pivot table can be charted against.
pub trait PivotKey: Display {
    /// Numeric x coordinate, if the key has one.
    fn numeric(&self) -> Option<f64>;
}

impl PivotKey for i32 {
    fn numeric(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl PivotKey for String {
    fn numeric(&self) -> Option<f64> {
        None
    }
}

impl ChartSpec {
    /// Single-series chart from a value count.
    pub fn from_counts(
        id: &str,
        title: &str,
        kind: ChartKind,
        x_label: &str,
        counts: &CountSeries,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            kind,
            x_label: x_label.to_string(),
            y_label: "Count".to_string(),
            categories: counts.labels().into_iter().map(String::from).collect(),
            x_values: (0..counts.len()).map(|i| i as f64).collect(),
            numeric_x: false,
            series: vec![Series {
                name: "count".to_string(),
                values: counts.entries.iter().map(|(_, c)| *c as f64).collect(),
            }],
        }
    }

    /// One series per pivot column.
    pub fn from_pivot<K: PivotKey + PartialEq>(
        id: &str,
        title: &str,
        kind: ChartKind,
        x_label: &str,
        pivot: &PivotTable<K>,
    ) -> Self {
        let numeric: Option<Vec<f64>> = pivot.index.iter().map(PivotKey::numeric).collect();
        let numeric_x = numeric.is_some() && kind != ChartKind::Bar;
        let x_values = match numeric {
            Some(values) if numeric_x => values,
            _ => (0..pivot.index.len()).map(|i| i as f64).collect(),
        };

        let series = pivot
            .columns
            .iter()
            .map(|&content_type| Series {
                name: content_type.label().to_string(),
                values: pivot
                    .column(content_type)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|c| c as f64)
                    .collect(),
            })
            .collect();

        Self {
            id: id.to_string(),
            title: title.to_string(),
            kind,
            x_label: x_label.to_string(),
            y_label: "Count".to_string(),
            categories: pivot.index.iter().map(|k| k.to_string()).collect(),
            x_values,
            numeric_x,
            series,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Largest value across all series (0 when empty).
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::max)
    }

    /// Inclusive x extent with half a slot of padding on each side.
    pub fn x_range(&self) -> (f64, f64) {
        let min = self.x_values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.x_values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min.is_infinite() || max.is_infinite() {
            return (-0.5, 0.5);
        }
        (min - 0.5, max + 0.5)
    }

    /// Axis label for an x coordinate: the category at a slot, or the year itself.
    pub fn x_tick_label(&self, x: f64) -> String {
        if self.numeric_x {
            return format!("{:.0}", x);
        }
        let slot = x.round();
        if (x - slot).abs() > 1e-6 || slot < 0.0 {
            return String::new();
        }
        self.categories
            .get(slot as usize)
            .cloned()
            .unwrap_or_default()
    }

    /// Left offset and width of series `index` inside one bar slot.
    pub fn bar_slot(&self, index: usize) -> (f64, f64) {
        let n = self.series.len().max(1) as f64;
        let width = 0.8 / n;
        (-0.4 + width * index as f64, width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ContentType;

    fn counts() -> CountSeries {
        CountSeries {
            entries: vec![("India".to_string(), 3), ("USA".to_string(), 1)],
        }
    }

    fn pivot() -> PivotTable<i32> {
        PivotTable {
            index: vec![2019, 2021],
            columns: vec![ContentType::Movie, ContentType::TvShow],
            counts: vec![vec![2, 0], vec![1, 4]],
        }
    }

    #[test]
    fn counts_become_one_series() {
        let spec = ChartSpec::from_counts("c", "Countries", ChartKind::Bar, "Country", &counts());
        assert_eq!(spec.categories, vec!["India", "USA"]);
        assert_eq!(spec.x_values, vec![0.0, 1.0]);
        assert_eq!(spec.series.len(), 1);
        assert_eq!(spec.max_value(), 3.0);
        assert_eq!(spec.x_tick_label(1.0), "USA");
        assert_eq!(spec.x_tick_label(0.5), "");
        assert_eq!(spec.x_range(), (-0.5, 1.5));
    }

    #[test]
    fn year_pivot_uses_numeric_axis_for_lines() {
        let spec = ChartSpec::from_pivot("g", "Growth", ChartKind::Area, "Year", &pivot());
        assert!(spec.numeric_x);
        assert_eq!(spec.x_values, vec![2019.0, 2021.0]);
        assert_eq!(spec.series[1].name, "TV Show");
        assert_eq!(spec.series[1].values, vec![0.0, 4.0]);
        assert_eq!(spec.x_tick_label(2020.0), "2020");
    }

    #[test]
    fn bar_pivot_uses_slots() {
        let spec = ChartSpec::from_pivot("r", "Ratings", ChartKind::Bar, "Year", &pivot());
        assert!(!spec.numeric_x);
        assert_eq!(spec.x_values, vec![0.0, 1.0]);
        let (left, width) = spec.bar_slot(1);
        assert!((left - 0.0).abs() < 1e-9);
        assert!((width - 0.4).abs() < 1e-9);
    }

    #[test]
    fn empty_spec_has_unit_range() {
        let spec = ChartSpec::from_counts("e", "Empty", ChartKind::Bar, "x", &CountSeries::default());
        assert!(spec.is_empty());
        assert_eq!(spec.x_range(), (-0.5, 0.5));
        assert_eq!(spec.max_value(), 0.0);
    }
}

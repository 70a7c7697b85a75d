//! Terminal summary of the dashboard views.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::analysis::{DashboardViews, QuickStats};
use crate::charts::ChartSpec;
use crate::data::LoadReport;

pub fn print_summary(views: &DashboardViews) {
    println!("Titles matching filters: {}", views.overview.rows);
    println!("{}", stats_table(&views.quick_stats));
    println!("{}", repairs_table(&views.overview.repairs));
    for spec in views.charts() {
        println!("{}", spec.title);
        println!("{}", chart_table(&spec));
    }
}

fn stats_table(stats: &QuickStats) -> Table {
    let year = |y: Option<i32>| y.map_or_else(|| dim_cell("-"), Cell::new);
    let mut table = Table::new();
    table.set_header(vec![header_cell("Quick stats"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("Total Movies"), Cell::new(stats.movies)]);
    table.add_row(vec![Cell::new("Total TV Shows"), Cell::new(stats.tv_shows)]);
    table.add_row(vec![Cell::new("Oldest Content Year"), year(stats.oldest_release)]);
    table.add_row(vec![Cell::new("Newest Content Year"), year(stats.newest_release)]);
    align_column(&mut table, 1, CellAlignment::Right);
    table
}

fn repairs_table(report: &LoadReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Load repairs"), header_cell("Rows")]);
    apply_table_style(&mut table);
    let rows = [
        ("Rows read", report.rows_read),
        ("Rows kept", report.rows_kept),
        ("Director filled with Unknown", report.filled_director),
        ("Cast filled with Unknown", report.filled_cast),
        ("Country filled with Unknown", report.filled_country),
        ("Dropped: missing date/rating/duration", report.dropped_missing),
        ("Dropped: unparsable date", report.dropped_bad_date),
        ("Dropped: invalid type/year", report.dropped_invalid),
    ];
    for (label, count) in rows {
        let value = if count == 0 {
            dim_cell(count)
        } else {
            Cell::new(count)
        };
        table.add_row(vec![Cell::new(label), value]);
    }
    align_column(&mut table, 1, CellAlignment::Right);
    table
}

/// Numbers behind one chart: a row per category, a column per series.
pub fn chart_table(spec: &ChartSpec) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell(&spec.x_label)];
    header.extend(spec.series.iter().map(|s| header_cell(&s.name)));
    table.set_header(header);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    if spec.is_empty() {
        let mut row = vec![dim_cell("no titles")];
        row.extend(spec.series.iter().map(|_| dim_cell("-")));
        table.add_row(row);
        return table;
    }

    for (idx, category) in spec.categories.iter().enumerate() {
        let mut row = vec![Cell::new(category)];
        row.extend(spec.series.iter().map(|s| {
            let value = s.values.get(idx).copied().unwrap_or(0.0);
            Cell::new(format!("{value:.0}"))
        }));
        table.add_row(row);
    }
    for index in 1..=spec.series.len() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RATING_CHART;
    use crate::data::fixtures::{title, with_rating};
    use crate::data::{ContentType, TitleTable};

    fn views() -> DashboardViews {
        let table = TitleTable::new(vec![
            with_rating(title(ContentType::Movie, "India", 2019), "TV-MA"),
            with_rating(title(ContentType::Movie, "India", 2020), "TV-MA"),
            with_rating(title(ContentType::TvShow, "Japan", 2020), "TV-14"),
        ]);
        DashboardViews::compute(&table, &LoadReport::default())
    }

    #[test]
    fn pivot_chart_has_a_column_per_type() {
        let views = views();
        let charts = views.charts();
        let spec = charts
            .iter()
            .find(|c| c.id == RATING_CHART)
            .expect("rating chart");
        let rendered = chart_table(spec).to_string();

        assert!(rendered.contains("Movie"));
        assert!(rendered.contains("TV Show"));
        assert!(rendered.contains("TV-MA"));
        assert!(rendered.contains("TV-14"));
        assert_eq!(chart_table(spec).row_iter().count(), 2);
    }

    #[test]
    fn empty_chart_renders_placeholder_row() {
        let empty = DashboardViews::compute(&TitleTable::default(), &LoadReport::default());
        let charts = empty.charts();
        let rendered = chart_table(&charts[0]).to_string();
        assert!(rendered.contains("no titles"));
    }

    #[test]
    fn quick_stats_table_lists_counts() {
        let rendered = stats_table(&views().quick_stats).to_string();
        assert!(rendered.contains("Total Movies"));
        assert!(rendered.contains('2'));
    }
}

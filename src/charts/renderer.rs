//! Static Chart Renderer
//! Renders chart specs to PNG files with plotters and dumps the view data as JSON.
//!
//! Layout per image:
//! 1. Title centered on top
//! 2. Plot area with axis descriptions; category labels rotated for bar charts
//! 3. Series legend in the upper right when a chart has more than one series

use crate::analysis::DashboardViews;
use crate::charts::{ChartKind, ChartSpec};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, trace};

// Matches the interactive palette.
const PALETTE: [RGBColor; 6] = [
    RGBColor(229, 9, 20),
    RGBColor(52, 152, 219),
    RGBColor(46, 204, 113),
    RGBColor(243, 156, 18),
    RGBColor(155, 89, 182),
    RGBColor(96, 125, 139),
];

pub const DEFAULT_WIDTH: u32 = 1200;
pub const DEFAULT_HEIGHT: u32 = 800;

/// File name of the aggregate dump written next to the images.
pub const VIEWS_JSON: &str = "views.json";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
}

fn draw_err<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Draw(err.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render every dashboard chart plus `views.json` into `dir`.
    ///
    /// Returns the paths written, images first.
    pub fn export_all(views: &DashboardViews, dir: &Path) -> Result<Vec<PathBuf>, RenderError> {
        fs::create_dir_all(dir)?;
        let mut written = Vec::new();

        for spec in views.charts() {
            let path = dir.join(format!("{}.png", spec.id));
            Self::render_png(&spec, &path, DEFAULT_WIDTH, DEFAULT_HEIGHT)?;
            debug!(path = %path.display(), "chart written");
            written.push(path);
        }

        let json_path = dir.join(VIEWS_JSON);
        Self::write_json(views, &json_path)?;
        written.push(json_path);

        info!(dir = %dir.display(), files = written.len(), "dashboard exported");
        Ok(written)
    }

    /// Dump the aggregates as pretty-printed JSON.
    pub fn write_json(views: &DashboardViews, path: &Path) -> Result<(), RenderError> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, views)?;
        Ok(())
    }

    /// Render one chart to a PNG file.
    pub fn render_png(
        spec: &ChartSpec,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        if spec.is_empty() {
            let style = TextStyle::from(("sans-serif", 24).into_font())
                .pos(Pos::new(HPos::Center, VPos::Center));
            root.draw_text(
                &format!("{}: no titles match the current filters", spec.title),
                &style,
                (width as i32 / 2, height as i32 / 2),
            )
            .map_err(draw_err)?;
            root.present().map_err(draw_err)?;
            return Ok(());
        }

        let (x_min, x_max) = spec.x_range();
        let y_max = (spec.max_value() * 1.1).max(1.0);
        let rotate_labels = !spec.numeric_x;
        trace!(id = %spec.id, x_min, x_max, y_max, "rendering chart");

        let mut chart = ChartBuilder::on(&root)
            .caption(&spec.title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(if rotate_labels { 160 } else { 50 })
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)
            .map_err(draw_err)?;

        let tick_label = |x: &f64| spec.x_tick_label(*x);
        let x_label_style = if rotate_labels {
            ("sans-serif", 14)
                .into_font()
                .transform(FontTransform::Rotate90)
        } else {
            ("sans-serif", 14).into_font()
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            // Integer slots need at least one label per category.
            .x_labels(if rotate_labels {
                spec.categories.len() + 1
            } else {
                12
            })
            .x_label_style(x_label_style)
            .x_label_formatter(&tick_label)
            .y_label_formatter(&|y: &f64| format!("{:.0}", y))
            .draw()
            .map_err(draw_err)?;

        for (idx, series) in spec.series.iter().enumerate() {
            let color = PALETTE[idx % PALETTE.len()];
            let points: Vec<(f64, f64)> = spec
                .x_values
                .iter()
                .copied()
                .zip(series.values.iter().copied())
                .collect();

            let annotation = match spec.kind {
                ChartKind::Bar => {
                    let (left, width) = spec.bar_slot(idx);
                    chart
                        .draw_series(points.iter().map(|&(x, y)| {
                            Rectangle::new(
                                [(x + left, 0.0), (x + left + width, y)],
                                color.filled(),
                            )
                        }))
                        .map_err(draw_err)?
                }
                ChartKind::Area => chart
                    .draw_series(
                        AreaSeries::new(points, 0.0, &color.mix(0.3)).border_style(&color),
                    )
                    .map_err(draw_err)?,
                ChartKind::Line => chart
                    .draw_series(LineSeries::new(points, color.stroke_width(2)))
                    .map_err(draw_err)?,
            };
            annotation
                .label(series.name.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled()));
        }

        if spec.series.len() > 1 {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(&WHITE.mix(0.85))
                .border_style(&BLACK)
                .draw()
                .map_err(draw_err)?;
        }

        root.present().map_err(draw_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ContentType, LoadReport, TitleTable};
    use crate::data::fixtures::title;

    #[test]
    fn json_dump_contains_every_view() {
        let table = TitleTable::new(vec![
            title(ContentType::Movie, "India", 2019),
            title(ContentType::TvShow, "USA", 2020),
        ]);
        let views = DashboardViews::compute(&table, &LoadReport::default());
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(VIEWS_JSON);
        StaticChartRenderer::write_json(&views, &path).expect("write json");

        let text = fs::read_to_string(&path).expect("read json");
        let value: serde_json::Value = serde_json::from_str(&text).expect("parse json");
        for key in [
            "quick_stats",
            "overview",
            "type_distribution",
            "growth",
            "countries",
            "genres",
            "ratings",
            "release_years",
            "directors",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["quick_stats"]["movies"], 1);
        assert_eq!(value["growth"]["columns"][1], "TV Show");
    }
}

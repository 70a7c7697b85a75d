//! Chart Plotter Module
//! Draws chart specs as interactive egui_plot charts.

use crate::charts::{ChartKind, ChartSpec};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

/// Series colors, Movie first then TV Show.
pub const PALETTE: [Color32; 6] = [
    Color32::from_rgb(229, 9, 20),    // Red
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

/// Creates dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn series_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Draw a chart spec with the given plot height.
    pub fn draw_chart(ui: &mut egui::Ui, spec: &ChartSpec, height: f32) {
        if spec.is_empty() {
            ui.label(RichText::new("No titles match the current filters").color(Color32::GRAY));
            return;
        }

        let tick_spec = spec.clone();
        let (x_min, x_max) = spec.x_range();

        Plot::new(format!("plot_{}", spec.id))
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label(spec.x_label.as_str())
            .y_axis_label(spec.y_label.as_str())
            .include_x(x_min)
            .include_x(x_max)
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| tick_spec.x_tick_label(mark.value))
            .show(ui, |plot_ui| match spec.kind {
                ChartKind::Bar => {
                    for (idx, series) in spec.series.iter().enumerate() {
                        let (left, width) = spec.bar_slot(idx);
                        let bars: Vec<Bar> = spec
                            .x_values
                            .iter()
                            .zip(series.values.iter())
                            .zip(spec.categories.iter())
                            .map(|((&x, &value), category)| {
                                Bar::new(x + left + width / 2.0, value)
                                    .width(width)
                                    .name(category)
                            })
                            .collect();
                        plot_ui.bar_chart(
                            BarChart::new(bars)
                                .color(Self::series_color(idx))
                                .name(&series.name),
                        );
                    }
                }
                ChartKind::Area | ChartKind::Line => {
                    for (idx, series) in spec.series.iter().enumerate() {
                        let points: PlotPoints = spec
                            .x_values
                            .iter()
                            .zip(series.values.iter())
                            .map(|(&x, &y)| [x, y])
                            .collect();
                        let mut line = Line::new(points)
                            .color(Self::series_color(idx))
                            .width(2.0)
                            .name(&series.name);
                        if spec.kind == ChartKind::Area {
                            line = line.fill(0.0);
                        }
                        plot_ui.line(line);
                    }
                }
            });
    }

    /// Draw the numbers behind a chart as a grid.
    pub fn draw_data_table(ui: &mut egui::Ui, spec: &ChartSpec) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(format!("data_table_{}", spec.id)))
                    .striped(true)
                    .min_col_width(60.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new(&spec.x_label).strong().size(11.0));
                        for series in &spec.series {
                            ui.label(RichText::new(&series.name).strong().size(11.0));
                        }
                        ui.end_row();

                        for (row, category) in spec.categories.iter().enumerate() {
                            ui.label(RichText::new(category).size(11.0));
                            for series in &spec.series {
                                let value = series.values.get(row).copied().unwrap_or(0.0);
                                ui.label(RichText::new(format!("{value:.0}")).size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}

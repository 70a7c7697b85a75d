//! View Tabs Widget
//! Central panel with one tab per dashboard view.

use crate::analysis::{
    DashboardViews, DatasetOverview, COUNTRY_CHART, DIRECTOR_CHART, GROWTH_CHART,
    MOVIE_GENRE_CHART, RATING_CHART, RELEASE_YEAR_CHART, TV_GENRE_CHART, TYPE_CHART,
};
use crate::charts::{ChartPlotter, ChartSpec};
use egui::{Color32, RichText, ScrollArea};

const CHART_HEIGHT: f32 = 420.0;
const HALF_CHART_HEIGHT: f32 = 360.0;

const PREVIEW_HEADERS: [&str; 9] = [
    "show_id",
    "type",
    "title",
    "country",
    "date_added",
    "release_year",
    "rating",
    "duration",
    "listed_in",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewTab {
    Overview,
    TypeDistribution,
    Growth,
    Countries,
    Genres,
    Ratings,
    ReleaseYears,
    Directors,
}

impl ViewTab {
    pub const ALL: [ViewTab; 8] = [
        ViewTab::Overview,
        ViewTab::TypeDistribution,
        ViewTab::Growth,
        ViewTab::Countries,
        ViewTab::Genres,
        ViewTab::Ratings,
        ViewTab::ReleaseYears,
        ViewTab::Directors,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ViewTab::Overview => "Dataset Overview",
            ViewTab::TypeDistribution => "Content Type Distribution",
            ViewTab::Growth => "Content Growth Over Time",
            ViewTab::Countries => "Country Analysis",
            ViewTab::Genres => "Genre Breakdown",
            ViewTab::Ratings => "Content Ratings",
            ViewTab::ReleaseYears => "Release Year Distribution",
            ViewTab::Directors => "Top Directors",
        }
    }

    fn heading(self) -> &'static str {
        match self {
            ViewTab::Overview => "Dataset Overview",
            ViewTab::TypeDistribution => "Distribution of Content Type (Movies vs. TV Shows)",
            ViewTab::Growth => "How has the catalog grown over time?",
            ViewTab::Countries => "Top 10 Countries with Most Content",
            ViewTab::Genres => "Top Genres in Movies vs TV Shows",
            ViewTab::Ratings => "Content Ratings Distribution (by Type)",
            ViewTab::ReleaseYears => "Content Distribution by Release Year (Movies vs TV Shows)",
            ViewTab::Directors => "Top 10 Directors by Number of Titles",
        }
    }

    fn description(self) -> &'static str {
        match self {
            ViewTab::Overview => {
                "A quick look at the filtered dataset: its shape, the first rows and missing values."
            }
            ViewTab::TypeDistribution => "Proportion of Movies vs TV Shows in the filtered dataset.",
            ViewTab::Growth => "Yearly growth of Movies and TV Shows added to the catalog.",
            ViewTab::Countries => "Which countries contribute the most content.",
            ViewTab::Genres => "Popular genres for Movies and TV Shows.",
            ViewTab::Ratings => "How ratings are distributed among Movies and TV Shows.",
            ViewTab::ReleaseYears => "Distribution of content by release year.",
            ViewTab::Directors => "Directors credited on the most titles.",
        }
    }

    /// Charts shown on this tab, side by side.
    fn chart_ids(self) -> &'static [&'static str] {
        match self {
            ViewTab::Overview => &[],
            ViewTab::TypeDistribution => &[TYPE_CHART],
            ViewTab::Growth => &[GROWTH_CHART],
            ViewTab::Countries => &[COUNTRY_CHART],
            ViewTab::Genres => &[MOVIE_GENRE_CHART, TV_GENRE_CHART],
            ViewTab::Ratings => &[RATING_CHART],
            ViewTab::ReleaseYears => &[RELEASE_YEAR_CHART],
            ViewTab::Directors => &[DIRECTOR_CHART],
        }
    }
}

/// Tabbed view area.
pub struct ViewTabs {
    pub active: ViewTab,
    views: Option<DashboardViews>,
    charts: Vec<ChartSpec>,
}

impl Default for ViewTabs {
    fn default() -> Self {
        Self {
            active: ViewTab::Overview,
            views: None,
            charts: Vec::new(),
        }
    }
}

impl ViewTabs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.views = None;
        self.charts.clear();
    }

    /// Replace the displayed views; charts are derived once here, not per frame.
    pub fn set_views(&mut self, views: DashboardViews) {
        self.charts = views.charts();
        self.views = Some(views);
    }

    pub fn views(&self) -> Option<&DashboardViews> {
        self.views.as_ref()
    }

    fn chart(&self, id: &str) -> Option<&ChartSpec> {
        self.charts.iter().find(|c| c.id == id)
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            for tab in ViewTab::ALL {
                ui.selectable_value(&mut self.active, tab, tab.label());
            }
        });
        ui.separator();

        let Some(views) = &self.views else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        let tab = self.active;
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(tab.heading());
                ui.label(RichText::new(tab.description()).color(Color32::GRAY));
                ui.add_space(10.0);

                if tab == ViewTab::Overview {
                    Self::draw_overview(ui, &views.overview);
                    return;
                }

                let specs: Vec<&ChartSpec> =
                    tab.chart_ids().iter().filter_map(|id| self.chart(id)).collect();
                if let [single] = specs.as_slice() {
                    ChartPlotter::draw_chart(ui, single, CHART_HEIGHT);
                    ui.add_space(10.0);
                    ui.collapsing("Data", |ui| ChartPlotter::draw_data_table(ui, single));
                } else {
                    ui.columns(specs.len().max(1), |columns| {
                        for (column, spec) in columns.iter_mut().zip(specs.iter()) {
                            column.label(RichText::new(&spec.title).strong());
                            ChartPlotter::draw_chart(column, spec, HALF_CHART_HEIGHT);
                            column.add_space(10.0);
                            ChartPlotter::draw_data_table(column, spec);
                        }
                    });
                }
            });
    }

    fn draw_overview(ui: &mut egui::Ui, overview: &DatasetOverview) {
        ui.label(format!(
            "Shape of filtered dataset: ({}, {})",
            overview.rows, overview.columns
        ));
        ui.add_space(8.0);

        ui.label(RichText::new("First rows").strong());
        ScrollArea::horizontal().id_salt("preview_scroll").show(ui, |ui| {
            egui::Grid::new("overview_preview")
                .striped(true)
                .spacing([10.0, 4.0])
                .show(ui, |ui| {
                    for header in PREVIEW_HEADERS {
                        ui.label(RichText::new(header).strong().size(11.0));
                    }
                    ui.end_row();
                    for title in &overview.preview {
                        let cells = [
                            title.show_id.clone().unwrap_or_default(),
                            title.content_type.to_string(),
                            title.title.clone().unwrap_or_default(),
                            title.country.clone(),
                            title.date_added.to_string(),
                            title.release_year.to_string(),
                            title.rating.clone(),
                            title.duration.clone(),
                            title.listed_in.join(", "),
                        ];
                        for cell in cells {
                            ui.label(RichText::new(cell).size(11.0));
                        }
                        ui.end_row();
                    }
                });
        });

        ui.add_space(12.0);
        ui.columns(2, |columns| {
            columns[0].label(RichText::new("Missing values").strong());
            egui::Grid::new("overview_missing")
                .striped(true)
                .show(&mut columns[0], |ui| {
                    for (column, count) in &overview.missing {
                        ui.label(column);
                        ui.label(count.to_string());
                        ui.end_row();
                    }
                });

            let repairs = &overview.repairs;
            columns[1].label(RichText::new("Load repairs (full catalog)").strong());
            egui::Grid::new("overview_repairs")
                .striped(true)
                .show(&mut columns[1], |ui| {
                    let rows = [
                        ("Rows read", repairs.rows_read),
                        ("Rows kept", repairs.rows_kept),
                        ("Director filled", repairs.filled_director),
                        ("Cast filled", repairs.filled_cast),
                        ("Country filled", repairs.filled_country),
                        ("Dropped: missing date/rating/duration", repairs.dropped_missing),
                        ("Dropped: unparsable date", repairs.dropped_bad_date),
                        ("Dropped: invalid type/year", repairs.dropped_invalid),
                    ];
                    for (label, value) in rows {
                        ui.label(label);
                        ui.label(value.to_string());
                        ui.end_row();
                    }
                });
        });
    }
}

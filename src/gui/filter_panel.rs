//! Filter Panel Widget
//! Left side panel with the data source, filter controls, quick stats and actions.

use crate::analysis::QuickStats;
use crate::data::{ContentType, FilterSelection, TitleTable};
use egui::{Color32, RichText, ScrollArea};
use std::collections::{BTreeSet, HashSet};
use std::fmt::Display;
use std::hash::Hash;

/// Set types a multi-select can toggle.
trait SelectionSet<T> {
    fn has(&self, value: &T) -> bool;
    fn set(&mut self, value: &T, selected: bool);
}

impl<T: Eq + Hash + Clone> SelectionSet<T> for HashSet<T> {
    fn has(&self, value: &T) -> bool {
        self.contains(value)
    }

    fn set(&mut self, value: &T, selected: bool) {
        if selected {
            self.insert(value.clone());
        } else {
            self.remove(value);
        }
    }
}

impl<T: Ord + Clone> SelectionSet<T> for BTreeSet<T> {
    fn has(&self, value: &T) -> bool {
        self.contains(value)
    }

    fn set(&mut self, value: &T, selected: bool) {
        if selected {
            self.insert(value.clone());
        } else {
            self.remove(value);
        }
    }
}

/// Values observed in the loaded catalog, offered as filter options.
#[derive(Default, Clone)]
struct FilterOptions {
    types: Vec<ContentType>,
    countries: Vec<String>,
    ratings: Vec<String>,
    year_bounds: (i32, i32),
}

/// Left side panel with filter controls.
pub struct FilterPanel {
    pub selection: Option<FilterSelection>,
    options: FilterOptions,
    country_query: String,
    pub source_label: String,
    pub status: String,
    pub is_busy: bool,
}

impl Default for FilterPanel {
    fn default() -> Self {
        Self {
            selection: None,
            options: FilterOptions::default(),
            country_query: String::new(),
            source_label: String::new(),
            status: "Ready".to_string(),
            is_busy: false,
        }
    }
}

impl FilterPanel {
    pub fn new(source_label: String) -> Self {
        Self {
            source_label,
            ..Self::default()
        }
    }

    /// Offer the values of a freshly loaded catalog and select all of them.
    pub fn set_options(&mut self, table: &TitleTable) {
        let mut countries = table.countries();
        countries.sort();
        let mut ratings = table.ratings();
        ratings.sort();
        let mut types = table.content_types();
        types.sort();

        self.options = FilterOptions {
            types,
            countries,
            ratings,
            year_bounds: table.year_added_bounds().unwrap_or((0, 0)),
        };
        self.country_query.clear();
        self.selection = Some(FilterSelection::all_observed(table));
    }

    pub fn clear(&mut self) {
        self.selection = None;
        self.options = FilterOptions::default();
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the panel
    pub fn show(&mut self, ui: &mut egui::Ui, stats: Option<&QuickStats>) -> FilterPanelAction {
        let mut action = FilterPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🎬 Titles Dashboard")
                    .size(22.0)
                    .color(Color32::from_rgb(229, 9, 20)),
            );
            ui.label(
                RichText::new("Streaming catalog insights")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new(&self.source_label).size(11.0).color(Color32::GRAY));
                ui.add_space(4.0);
                ui.add_enabled_ui(!self.is_busy, |ui| {
                    if ui.button("🔄 Reload").clicked() {
                        action = FilterPanelAction::Reload;
                    }
                });
            });

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        let options = self.options.clone();
        if let Some(selection) = self.selection.as_mut() {
            ui.label(RichText::new("🔧 Filter Dashboard").size(14.0).strong());
            ui.add_space(8.0);

            let mut changed = false;

            ui.collapsing("Content Type", |ui| {
                changed |= multiselect(ui, &options.types, &mut selection.types);
            });

            ui.collapsing("Countries", |ui| {
                ui.horizontal(|ui| {
                    ui.label("Search:");
                    ui.text_edit_singleline(&mut self.country_query);
                });
                let query = self.country_query.to_lowercase();
                let visible: Vec<String> = options
                    .countries
                    .iter()
                    .filter(|c| query.is_empty() || c.to_lowercase().contains(&query))
                    .cloned()
                    .collect();
                ScrollArea::vertical()
                    .id_salt("country_options")
                    .max_height(180.0)
                    .show(ui, |ui| {
                        changed |= multiselect(ui, &visible, &mut selection.countries);
                    });
            });

            ui.add_space(5.0);
            ui.label("Year Added Range:");
            let (min_year, max_year) = options.year_bounds;
            let (mut lo, mut hi) = selection.year_range;
            let lo_changed = ui
                .add(egui::Slider::new(&mut lo, min_year..=max_year).text("from"))
                .changed();
            let hi_changed = ui
                .add(egui::Slider::new(&mut hi, min_year..=max_year).text("to"))
                .changed();
            if lo_changed && lo > hi {
                hi = lo;
            }
            if hi_changed && hi < lo {
                lo = hi;
            }
            if lo_changed || hi_changed {
                selection.year_range = (lo, hi);
                changed = true;
            }

            ui.add_space(5.0);
            ui.collapsing("Ratings", |ui| {
                changed |= multiselect(ui, &options.ratings, &mut selection.ratings);
            });

            if changed {
                action = FilterPanelAction::FiltersChanged;
            }

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            // ===== Quick Stats Section =====
            ui.label(RichText::new("📊 Quick Stats").size(14.0).strong());
            ui.add_space(5.0);
            if let Some(stats) = stats {
                let year = |y: Option<i32>| y.map(|v| v.to_string()).unwrap_or_else(|| "-".into());
                egui::Grid::new("quick_stats")
                    .num_columns(2)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("Total Movies:");
                        ui.label(stats.movies.to_string());
                        ui.end_row();
                        ui.label("Total TV Shows:");
                        ui.label(stats.tv_shows.to_string());
                        ui.end_row();
                        ui.label("Oldest Content Year:");
                        ui.label(year(stats.oldest_release));
                        ui.end_row();
                        ui.label("Newest Content Year:");
                        ui.label(year(stats.newest_release));
                        ui.end_row();
                    });
            }

            ui.add_space(15.0);
            ui.vertical_centered(|ui| {
                ui.add_enabled_ui(!self.is_busy, |ui| {
                    let button = egui::Button::new(RichText::new("🖼 Export Charts").size(14.0))
                        .min_size(egui::vec2(150.0, 30.0));
                    if ui.add(button).clicked() {
                        action = FilterPanelAction::Export;
                    }
                });
            });
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        if self.is_busy {
            ui.add(egui::Spinner::new());
        }
        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Checkbox list with select-all / clear-all; returns true when anything changed.
fn multiselect<T, S>(ui: &mut egui::Ui, options: &[T], selected: &mut S) -> bool
where
    T: Display,
    S: SelectionSet<T>,
{
    let mut changed = false;
    ui.horizontal(|ui| {
        if ui.small_button("Select All").clicked() {
            options.iter().for_each(|o| selected.set(o, true));
            changed = true;
        }
        if ui.small_button("Clear All").clicked() {
            options.iter().for_each(|o| selected.set(o, false));
            changed = true;
        }
    });
    for option in options {
        let mut checked = selected.has(option);
        if ui.checkbox(&mut checked, option.to_string()).changed() {
            selected.set(option, checked);
            changed = true;
        }
    }
    changed
}

/// Actions triggered by the filter panel
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPanelAction {
    None,
    FiltersChanged,
    Reload,
    Export,
}

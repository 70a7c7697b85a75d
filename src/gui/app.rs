//! Titles Dashboard Main Application
//! Main window with filter panel and view tabs.

use crate::analysis::DashboardViews;
use crate::charts::StaticChartRenderer;
use crate::data::{apply_filter, load, LoadedCatalog, Session, Snapshot};
use crate::gui::{FilterPanel, FilterPanelAction, ViewTabs};
use egui::SidePanel;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use tracing::{error, info, warn};

/// Catalog loading result from background thread
enum LoadResult {
    Complete(LoadedCatalog),
    Error(String),
}

/// Non-blocking poll; `None` while the loader is still running.
fn poll_load(rx: &Receiver<LoadResult>) -> Option<LoadResult> {
    match rx.try_recv() {
        Ok(result) => Some(result),
        Err(TryRecvError::Empty) => None,
        Err(TryRecvError::Disconnected) => Some(LoadResult::Error(
            "loader stopped without a result".to_string(),
        )),
    }
}

/// Main application window.
pub struct DashboardApp {
    session: Session,
    snapshot: Option<Snapshot>,
    filter_panel: FilterPanel,
    view_tabs: ViewTabs,

    // Async catalog loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, session: Session) -> Self {
        let source_label = session.source().to_string();
        let mut app = Self {
            session,
            snapshot: None,
            filter_panel: FilterPanel::new(source_label),
            view_tabs: ViewTabs::new(),
            load_rx: None,
            is_loading: false,
        };
        app.start_load();
        app
    }

    /// Use the cached snapshot, or fetch the catalog on a background thread.
    fn start_load(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(snapshot) = self.session.cached().cloned() {
            self.adopt_snapshot(snapshot);
            return;
        }

        self.is_loading = true;
        self.filter_panel.is_busy = true;
        self.filter_panel.set_status("Loading catalog...");

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        let source = self.session.source().clone();

        thread::spawn(move || {
            let result = match load(&source) {
                Ok(loaded) => LoadResult::Complete(loaded),
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for catalog loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match poll_load(&rx) {
            Some(LoadResult::Complete(loaded)) => {
                let snapshot = self.session.install(loaded);
                self.is_loading = false;
                self.adopt_snapshot(snapshot);
            }
            Some(LoadResult::Error(message)) => {
                error!(%message, "catalog load failed");
                self.is_loading = false;
                self.filter_panel.is_busy = false;
                self.filter_panel
                    .set_status(&format!("Error: {}. Use Reload to retry.", message));
            }
            None => {
                // Still loading; keep waiting.
                self.load_rx = Some(rx);
            }
        }
    }

    fn adopt_snapshot(&mut self, snapshot: Snapshot) {
        self.filter_panel.set_options(&snapshot.table);
        self.filter_panel.is_busy = false;
        self.filter_panel.set_status(&format!(
            "Loaded {} titles",
            snapshot.table.len()
        ));
        self.snapshot = Some(snapshot);
        self.recompute();
    }

    /// Re-run the filter and every view aggregation.
    fn recompute(&mut self) {
        let (Some(snapshot), Some(selection)) = (&self.snapshot, &self.filter_panel.selection)
        else {
            return;
        };
        let filtered = apply_filter(&snapshot.table, selection);
        let views = DashboardViews::compute(&filtered, &snapshot.report);
        self.view_tabs.set_views(views);
    }

    fn handle_reload(&mut self) {
        self.session.clear_cache();
        info!(epoch = self.session.epoch(), "reloading catalog");
        self.snapshot = None;
        self.filter_panel.clear();
        self.view_tabs.clear();
        self.start_load();
    }

    /// Render every chart to a user-chosen folder and open it.
    fn handle_export(&mut self) {
        let Some(views) = self.view_tabs.views() else {
            self.filter_panel.set_status("No charts to export");
            return;
        };

        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return; // User cancelled
        };

        match StaticChartRenderer::export_all(views, &dir) {
            Ok(files) => {
                self.filter_panel.set_status(&format!(
                    "Exported {} files to {}",
                    files.len(),
                    dir.display()
                ));
                if let Err(e) = open::that(&dir) {
                    warn!(error = %e, "could not open export folder");
                }
            }
            Err(e) => {
                error!(error = %e, "export failed");
                self.filter_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Filters
        SidePanel::left("filter_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let stats = self.view_tabs.views().map(|v| v.quick_stats.clone());
                    let action = self.filter_panel.show(ui, stats.as_ref());

                    match action {
                        FilterPanelAction::FiltersChanged => self.recompute(),
                        FilterPanelAction::Reload => self.handle_reload(),
                        FilterPanelAction::Export => self.handle_export(),
                        FilterPanelAction::None => {}
                    }
                });
            });

        // Central panel - View tabs
        egui::CentralPanel::default().show(ctx, |ui| {
            self.view_tabs.show(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{LoadReport, TitleTable};

    #[test]
    fn pending_load_keeps_waiting() {
        let (_tx, rx) = channel::<LoadResult>();
        assert!(poll_load(&rx).is_none());
    }

    #[test]
    fn finished_load_is_delivered() {
        let (tx, rx) = channel();
        let loaded = LoadedCatalog {
            table: TitleTable::default(),
            report: LoadReport::default(),
        };
        tx.send(LoadResult::Complete(loaded)).expect("send");
        assert!(matches!(poll_load(&rx), Some(LoadResult::Complete(_))));
    }

    #[test]
    fn vanished_loader_reports_an_error() {
        let (tx, rx) = channel::<LoadResult>();
        thread::spawn(move || drop(tx)).join().expect("join");
        assert!(matches!(poll_load(&rx), Some(LoadResult::Error(_))));
    }
}

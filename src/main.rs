//! Titles Dashboard - streaming catalog analysis & interactive chart viewer
//!
//! Loads the titles catalog, filters it and shows descriptive charts, either in a
//! window or headless from the command line.

mod analysis;
mod charts;
mod cli;
mod data;
mod gui;
mod logging;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use std::io::{self, IsTerminal};
use tracing::info;

use crate::analysis::DashboardViews;
use crate::charts::StaticChartRenderer;
use crate::cli::Cli;
use crate::data::{apply_filter, Session};
use crate::gui::DashboardApp;
use crate::logging::{init_logging, LogConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_config = LogConfig::from_verbosity(cli.verbose).with_ansi(io::stderr().is_terminal());
    init_logging(&log_config).context("failed to initialize logging")?;

    let session = Session::new(cli.data_source());
    if cli.is_headless() {
        run_headless(&cli, session)
    } else {
        run_gui(session)
    }
}

/// Load, filter, then print and/or export without opening a window.
fn run_headless(cli: &Cli, mut session: Session) -> Result<()> {
    let snapshot = session
        .snapshot()
        .with_context(|| format!("failed to load catalog from {}", session.source()))?;

    let selection = cli.selection(&snapshot.table);
    let filtered = apply_filter(&snapshot.table, &selection);
    let views = DashboardViews::compute(&filtered, &snapshot.report);

    if cli.summary {
        report::print_summary(&views);
    }
    if let Some(dir) = &cli.export {
        let files = StaticChartRenderer::export_all(&views, dir)
            .with_context(|| format!("failed to export charts to {}", dir.display()))?;
        info!(count = files.len(), dir = %dir.display(), "export finished");
    }
    Ok(())
}

fn run_gui(session: Session) -> Result<()> {
    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1100.0, 650.0])
            .with_title("Titles Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Titles Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, session)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}

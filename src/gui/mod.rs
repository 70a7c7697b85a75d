//! GUI module - User interface components

mod app;
mod filter_panel;
mod view_tabs;

pub use app::DashboardApp;
pub use filter_panel::{FilterPanel, FilterPanelAction};
pub use view_tabs::ViewTabs;

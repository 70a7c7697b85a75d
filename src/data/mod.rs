//! Data module - catalog loading, caching and filtering

mod catalog;
mod filter;
mod loader;
mod session;

pub use catalog::{ContentType, Title, TitleTable, UNKNOWN};
pub use filter::{apply_filter, FilterSelection};
pub use loader::{load, DataSource, LoadReport, LoadedCatalog};
pub use session::{Session, Snapshot};

#[cfg(test)]
pub(crate) use catalog::fixtures;
#[cfg(test)]
pub(crate) use loader::samples;

//! Session Cache
//! Owns the loaded catalog snapshot for one cache epoch.

use crate::data::catalog::TitleTable;
use crate::data::loader::{self, DataSource, LoadReport, LoadedCatalog, LoaderError};
use std::sync::Arc;
use tracing::{debug, info};

/// Immutable view of the loaded catalog, cheap to clone.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub table: Arc<TitleTable>,
    pub report: Arc<LoadReport>,
}

impl From<LoadedCatalog> for Snapshot {
    fn from(loaded: LoadedCatalog) -> Self {
        Self {
            table: Arc::new(loaded.table),
            report: Arc::new(loaded.report),
        }
    }
}

/// Application context holding the memoized load.
#[derive(Debug)]
pub struct Session {
    source: DataSource,
    snapshot: Option<Snapshot>,
    epoch: u64,
}

impl Session {
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            snapshot: None,
            epoch: 0,
        }
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Current cache epoch; bumped by every `clear_cache`.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Loaded snapshot, if this epoch already has one.
    pub fn cached(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Return the snapshot for this epoch, loading it on first use.
    pub fn snapshot(&mut self) -> Result<Snapshot, LoaderError> {
        if let Some(snapshot) = &self.snapshot {
            debug!(epoch = self.epoch, "reusing cached catalog");
            return Ok(snapshot.clone());
        }
        let loaded = loader::load(&self.source)?;
        Ok(self.install(loaded))
    }

    /// Adopt a catalog loaded elsewhere (e.g. on a background thread).
    pub fn install(&mut self, loaded: LoadedCatalog) -> Snapshot {
        let snapshot = Snapshot::from(loaded);
        info!(
            epoch = self.epoch,
            rows = snapshot.table.len(),
            "catalog cached"
        );
        self.snapshot = Some(snapshot.clone());
        snapshot
    }

    /// Start a new cache epoch; the next `snapshot` call refetches.
    pub fn clear_cache(&mut self) {
        self.snapshot = None;
        self.epoch += 1;
        info!(epoch = self.epoch, "catalog cache cleared");
    }
}

use std::path::Path;

use crate::data::classify::{classify, AxisSet};
use crate::data::loader::{self, LoadError, LoadOptions};
use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Session – one loaded table and its eligible axes
// ---------------------------------------------------------------------------

/// A loaded table together with its cached [`AxisSet`]. Each front end (or
/// user) owns its own session; nothing here is shared.
#[derive(Debug, Clone)]
pub struct Session {
    table: Table,
    axes: AxisSet,
}

impl Session {
    pub fn new(table: Table) -> Self {
        let axes = classify(&table);
        log::info!("{} numeric column(s) eligible as axes: {:?}", axes.len(), axes.names());
        Self { table, axes }
    }

    /// Load a file and classify its columns.
    pub fn open(path: &Path, options: &LoadOptions) -> Result<Self, LoadError> {
        loader::load_file(path, options).map(Self::new)
    }

    /// Swap in a freshly loaded table; the axis set is recomputed.
    pub fn replace(&mut self, table: Table) {
        *self = Self::new(table);
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn axes(&self) -> &AxisSet {
        &self.axes
    }
}

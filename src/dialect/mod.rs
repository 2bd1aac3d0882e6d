pub mod json_snapshot;

use anyhow::Result;

pub use json_snapshot::JsonSnapshotComparer;

use crate::{types::ModelSchema, utils::events::EventReporter};

/// Both sides of a comparison, fully read.
#[derive(Debug, Clone, Default)]
pub struct SchemaPair {
    pub source: ModelSchema,
    pub target: ModelSchema,
}

/// Supplies the raw object collections for one schema dialect.
///
/// Matching, status and skip handling never depend on which implementation is
/// in use.
pub trait SchemaComparer: Send {
    /// Short name of the dialect, used in logs.
    fn dialect(&self) -> &'static str;

    /// Reads both sides. Called again on every re-comparison.
    fn read_schemas(&mut self, events: &EventReporter) -> Result<SchemaPair>;

    /// Releases whatever the comparer holds open.
    fn disconnect(&mut self) {}
}

pub mod snapshots;

pub use snapshots::{SnapshotDir, source_model, target_model};

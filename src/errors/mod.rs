use std::path::PathBuf;

use thiserror::Error;

use crate::types::{ComparisonObjectStatus, ComparisonObjectType, UpdateAction};

/// Which side of a comparison an object was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Source,
    Target,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    #[error("{object_type} '{internal_name}' appears more than once in the {side} {scope}")]
    DuplicateInternalName {
        object_type: ComparisonObjectType,
        internal_name: String,
        side: Side,
        scope: String,
    },

    #[error("{object_type} '{name}' in the {side} has no internal name")]
    MissingInternalName {
        object_type: ComparisonObjectType,
        name: String,
        side: Side,
    },

    #[error("Action {action} is not allowed for {object_type} '{name}' with status {status}")]
    IllegalUpdateAction {
        object_type: ComparisonObjectType,
        name: String,
        status: ComparisonObjectStatus,
        action: UpdateAction,
    },

    #[error("Invalid skip selection for {object_type}: {reason}")]
    InvalidSkipSelection {
        object_type: ComparisonObjectType,
        reason: String,
    },

    #[error("Duplicate skip selection for {object_type} with status {status}")]
    DuplicateSkipSelection {
        object_type: ComparisonObjectType,
        status: ComparisonObjectStatus,
    },

    #[error("{object_type} '{name}' is inconsistent: {reason}")]
    InvariantViolation {
        object_type: ComparisonObjectType,
        name: String,
        reason: String,
    },

    #[error("Source compatibility level {source_level} does not match target level {target_level}")]
    CompatibilityLevelMismatch { source_level: u32, target_level: u32 },

    #[error("No matching comparison object found")]
    ObjectNotFound,
}

#[derive(Error, Debug)]
pub enum SchemaLoadError {
    #[error("Failed to read schema snapshot '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse schema snapshot '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to access session file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse session file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

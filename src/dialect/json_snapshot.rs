use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use crate::{
    dialect::{SchemaComparer, SchemaPair},
    errors::{SchemaLoadError, Side},
    types::ModelSchema,
    utils::events::{ComparisonEvent, EventReporter},
};

/// Reads each side from a JSON model snapshot on disk.
#[derive(Debug, Clone)]
pub struct JsonSnapshotComparer {
    source_path: PathBuf,
    target_path: PathBuf,
}

impl JsonSnapshotComparer {
    pub fn new(source_path: impl Into<PathBuf>, target_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            target_path: target_path.into(),
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }
}

pub fn read_snapshot(path: &Path) -> Result<ModelSchema, SchemaLoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| SchemaLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_snapshot(&content, path)
}

pub fn parse_snapshot(content: &str, path: &Path) -> Result<ModelSchema, SchemaLoadError> {
    serde_json::from_str(content).map_err(|source| SchemaLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Names of connections that impersonate an account without carrying its
/// password.
pub fn connections_needing_password(model: &ModelSchema) -> Vec<&str> {
    model
        .connections
        .iter()
        .filter(|c| {
            let Some(definition) = c.definition.as_deref() else {
                return false;
            };
            let Ok(Value::Object(map)) = serde_json::from_str::<Value>(definition) else {
                return false;
            };
            let impersonates = map
                .get("impersonationMode")
                .and_then(Value::as_str)
                .is_some_and(|m| m.eq_ignore_ascii_case("ImpersonateAccount"));
            let has_password = map
                .get("password")
                .and_then(Value::as_str)
                .is_some_and(|p| !p.is_empty());
            impersonates && !has_password
        })
        .map(|c| c.name.as_str())
        .collect()
}

impl SchemaComparer for JsonSnapshotComparer {
    fn dialect(&self) -> &'static str {
        "json-snapshot"
    }

    fn read_schemas(&mut self, events: &EventReporter) -> Result<SchemaPair> {
        let mut pair = SchemaPair::default();

        for (side, path) in [
            (Side::Source, &self.source_path),
            (Side::Target, &self.target_path),
        ] {
            events.progress(format!("Reading {} snapshot {}", side, path.display()));
            let model = read_snapshot(path)?;
            debug!(
                "Read {} snapshot '{}': {} table(s), compatibility level {}",
                side,
                path.display(),
                model.tables.len(),
                model.compatibility_level
            );

            for connection in connections_needing_password(&model) {
                events.report(ComparisonEvent::PasswordPromptNeeded {
                    connection: connection.to_string(),
                    side,
                });
            }

            match side {
                Side::Source => pair.source = model,
                Side::Target => pair.target = model,
            }
        }

        Ok(pair)
    }
}

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{compare::SkipSelections, errors::SessionError};

/// What a comparison session keeps between runs: where the two snapshots live
/// and which differences the user chose to skip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFile {
    pub source: PathBuf,
    pub target: PathBuf,
    #[serde(default)]
    pub skip_selections: SkipSelections,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

impl SessionFile {
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            skip_selections: SkipSelections::new(),
            saved_at: None,
        }
    }

    pub async fn load(path: &Path) -> Result<Self, SessionError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SessionError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&content).map_err(|source| SessionError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub async fn save(&mut self, path: &Path) -> Result<(), SessionError> {
        self.saved_at = Some(Utc::now());
        let content = serde_json::to_string_pretty(self).map_err(|source| SessionError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tokio::fs::write(path, content)
            .await
            .map_err(|source| SessionError::Io {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Snapshot paths, with relative ones resolved against the directory of
    /// the session file.
    pub fn resolved_paths(&self, session_path: &Path) -> (PathBuf, PathBuf) {
        let base = session_path.parent().unwrap_or_else(|| Path::new(""));
        let resolve = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                base.join(p)
            }
        };
        (resolve(&self.source), resolve(&self.target))
    }
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, ensure};
use tracing::info;

use crate::{
    compare::{Comparison, ComparisonObject, ObjectIdentity, ValidationMessage},
    config::{CompareConfig, Settings},
    dialect::JsonSnapshotComparer,
    errors::CompareError,
    session::SessionFile,
    types::{ComparisonObjectType, UpdateAction},
    utils::EventReporter,
};

/// Service layer for comparison sessions stored on disk
pub struct ComparisonService {
    settings: Settings,
}

impl ComparisonService {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn compare_config(&self) -> &CompareConfig {
        &self.settings.compare
    }

    /// Create a new session file pointing at two snapshots
    pub async fn init_session(
        &self,
        session_path: &Path,
        source: &Path,
        target: &Path,
    ) -> Result<SessionFile> {
        ensure!(
            !session_path.exists(),
            "Session file '{}' already exists",
            session_path.display()
        );

        let mut session = SessionFile::new(source, target);
        session
            .save(session_path)
            .await
            .context("Failed to create session file")?;

        info!("Created session {}", session_path.display());
        Ok(session)
    }

    pub async fn load_session(&self, session_path: &Path) -> Result<SessionFile> {
        SessionFile::load(session_path)
            .await
            .context(format!("Failed to load session '{}'", session_path.display()))
    }

    fn build_comparison(
        &self,
        source: PathBuf,
        target: PathBuf,
        exclude_object_types: Option<Vec<String>>,
    ) -> Result<Comparison> {
        let excluded_types = self
            .settings
            .compare
            .excluded_types(exclude_object_types)
            .map_err(|e| anyhow!(e))?;

        Ok(Comparison::new(
            Box::new(JsonSnapshotComparer::new(source, target)),
            self.settings.compare.comparators(),
        )
        .with_excluded_types(excluded_types))
    }

    /// Compare two snapshots without a session
    pub async fn compare_files(
        &self,
        source: &Path,
        target: &Path,
        exclude_object_types: Option<Vec<String>>,
        events: &EventReporter,
    ) -> Result<Comparison> {
        let mut comparison =
            self.build_comparison(source.to_path_buf(), target.to_path_buf(), exclude_object_types)?;
        comparison
            .compare_objects(events)
            .context("Failed to compare snapshots")?;
        Ok(comparison)
    }

    /// Compare the snapshots of a session and re-apply its skip selections
    pub async fn compare_session(
        &self,
        session_path: &Path,
        exclude_object_types: Option<Vec<String>>,
        events: &EventReporter,
    ) -> Result<(SessionFile, Comparison)> {
        let session = self.load_session(session_path).await?;
        let (source, target) = session.resolved_paths(session_path);

        let mut comparison = self
            .build_comparison(source, target, exclude_object_types)?
            .with_skip_selections(session.skip_selections.clone());
        comparison
            .compare_objects(events)
            .context(format!("Failed to compare session '{}'", session_path.display()))?;

        Ok((session, comparison))
    }

    /// Capture the skipped nodes of `comparison` into the session file
    pub async fn save_skip_selections(
        &self,
        session: &mut SessionFile,
        comparison: &mut Comparison,
        session_path: &Path,
    ) -> Result<usize> {
        comparison.refresh_skip_selections_from_comparison_objects()?;
        session.skip_selections = comparison.skip_selections().clone();
        session
            .save(session_path)
            .await
            .context("Failed to save skip selections")?;
        Ok(session.skip_selections.len())
    }

    /// Skip or restore one object and persist the resulting selections
    pub async fn set_skip(
        &self,
        session_path: &Path,
        identity: &ObjectIdentity,
        skip: bool,
        events: &EventReporter,
    ) -> Result<ComparisonObject> {
        let (mut session, mut comparison) =
            self.compare_session(session_path, None, events).await?;

        let status = comparison
            .find_by_identity(identity)
            .ok_or(CompareError::ObjectNotFound)?
            .status();
        let action = if skip {
            UpdateAction::Skip
        } else {
            UpdateAction::default_for(status)
        };
        comparison.set_update_action(identity, action)?;

        self.save_skip_selections(&mut session, &mut comparison, session_path)
            .await?;

        comparison
            .find_by_identity(identity)
            .cloned()
            .ok_or_else(|| CompareError::ObjectNotFound.into())
    }

    /// Skip or restore every differing object of one type
    pub async fn set_skip_for_type(
        &self,
        session_path: &Path,
        object_type: ComparisonObjectType,
        skip: bool,
        events: &EventReporter,
    ) -> Result<usize> {
        let (mut session, mut comparison) =
            self.compare_session(session_path, None, events).await?;

        let changed = comparison.set_skip_for_type(object_type, skip);
        self.save_skip_selections(&mut session, &mut comparison, session_path)
            .await?;
        Ok(changed)
    }

    /// Remove every stored skip selection
    pub async fn clear_skip_selections(&self, session_path: &Path) -> Result<usize> {
        let mut session = self.load_session(session_path).await?;
        let count = session.skip_selections.len();
        session.skip_selections.clear();
        session
            .save(session_path)
            .await
            .context("Failed to clear skip selections")?;
        Ok(count)
    }

    pub async fn validate_session(
        &self,
        session_path: &Path,
        events: &EventReporter,
    ) -> Result<Vec<ValidationMessage>> {
        let (_, comparison) = self.compare_session(session_path, None, events).await?;
        Ok(comparison.validate_selection(events))
    }
}

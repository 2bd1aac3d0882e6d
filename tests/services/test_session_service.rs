use anyhow::Result;
use semdiff::{config::Settings, services::AppServices, utils::EventReporter};

use crate::common::{SnapshotDir, source_model, target_model};

#[tokio::test]
async fn test_init_session_refuses_to_overwrite() -> Result<()> {
    let snapshots = SnapshotDir::new(&source_model(), &target_model());
    let services = AppServices::new(&Settings::default());

    let session = services
        .comparison_service
        .init_session(&snapshots.session, &snapshots.source, &snapshots.target)
        .await?;
    assert!(session.saved_at.is_some());
    assert!(snapshots.session.exists());

    let second = services
        .comparison_service
        .init_session(&snapshots.session, &snapshots.source, &snapshots.target)
        .await;
    assert!(second.is_err());
    Ok(())
}

#[tokio::test]
async fn test_session_with_relative_paths() -> Result<()> {
    let snapshots = SnapshotDir::new(&source_model(), &target_model());
    let services = AppServices::new(&Settings::default());

    services
        .comparison_service
        .init_session(
            &snapshots.session,
            std::path::Path::new("source.json"),
            std::path::Path::new("target.json"),
        )
        .await?;

    let (session, comparison) = services
        .comparison_service
        .compare_session(&snapshots.session, None, &EventReporter::disabled())
        .await?;

    assert_eq!(session.source, std::path::PathBuf::from("source.json"));
    assert!(!comparison.comparison_objects().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_missing_session_fails() {
    let snapshots = SnapshotDir::new(&source_model(), &target_model());
    let services = AppServices::new(&Settings::default());

    let result = services.comparison_service.load_session(&snapshots.session).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_corrupt_session_fails() -> Result<()> {
    let snapshots = SnapshotDir::new(&source_model(), &target_model());
    std::fs::write(&snapshots.session, "{ not json")?;
    let services = AppServices::new(&Settings::default());

    let result = services.comparison_service.load_session(&snapshots.session).await;
    assert!(result.is_err());
    Ok(())
}

use anyhow::Result;
use semdiff::{
    compare::{ObjectIdentity, ValidationStatus, planned_changes, summarize, walk},
    config::Settings,
    errors::CompareError,
    services::AppServices,
    types::{ComparisonObjectStatus, ComparisonObjectType, UpdateAction},
    utils::EventReporter,
};
use serde_json::json;

use crate::common::{SnapshotDir, source_model, target_model};

fn services() -> AppServices {
    AppServices::new(&Settings::default())
}

fn total_sales() -> ObjectIdentity {
    ObjectIdentity::new(
        "Total Sales",
        "m1",
        "Total Sales",
        "m1",
        ComparisonObjectType::Measure,
    )
}

fn admins() -> ObjectIdentity {
    ObjectIdentity::new("", "", "Admins", "r2", ComparisonObjectType::Role)
}

async fn init(snapshots: &SnapshotDir, services: &AppServices) -> Result<()> {
    services
        .comparison_service
        .init_session(&snapshots.session, &snapshots.source, &snapshots.target)
        .await?;
    Ok(())
}

#[tokio::test]
async fn test_compare_files_builds_forest() -> Result<()> {
    let snapshots = SnapshotDir::new(&source_model(), &target_model());
    let services = services();

    let comparison = services
        .comparison_service
        .compare_files(
            &snapshots.source,
            &snapshots.target,
            None,
            &EventReporter::disabled(),
        )
        .await?;

    let types: Vec<_> = comparison
        .comparison_objects()
        .iter()
        .map(|n| n.object_type())
        .collect();
    assert_eq!(
        types,
        vec![
            ComparisonObjectType::Connection,
            ComparisonObjectType::Table,
            ComparisonObjectType::Table,
            ComparisonObjectType::Perspective,
            ComparisonObjectType::Role,
            ComparisonObjectType::Role,
        ]
    );

    let summary = summarize(comparison.comparison_objects());
    assert_eq!(summary.same_definition, 4);
    assert_eq!(summary.different_definitions, 1);
    assert_eq!(summary.missing_in_target, 3);
    assert_eq!(summary.missing_in_source, 2);
    assert_eq!(summary.skipped, 0);

    let measure = comparison.find_by_identity(&total_sales()).unwrap();
    assert_eq!(measure.status(), ComparisonObjectStatus::DifferentDefinitions);
    assert_eq!(measure.update_action(), UpdateAction::Update);

    Ok(())
}

#[tokio::test]
async fn test_excluded_types_are_left_out() -> Result<()> {
    let snapshots = SnapshotDir::new(&source_model(), &target_model());
    let services = services();

    let comparison = services
        .comparison_service
        .compare_files(
            &snapshots.source,
            &snapshots.target,
            Some(vec!["role".to_string(), "Measure".to_string()]),
            &EventReporter::disabled(),
        )
        .await?;

    assert!(walk(comparison.comparison_objects()).all(|n| {
        n.object_type() != ComparisonObjectType::Role
            && n.object_type() != ComparisonObjectType::Measure
    }));
    Ok(())
}

#[tokio::test]
async fn test_unknown_excluded_type_is_rejected() {
    let snapshots = SnapshotDir::new(&source_model(), &target_model());

    let result = services()
        .comparison_service
        .compare_files(
            &snapshots.source,
            &snapshots.target,
            Some(vec!["column".to_string()]),
            &EventReporter::disabled(),
        )
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_compatibility_level_mismatch_fails() {
    let mut target = target_model();
    target["compatibilityLevel"] = json!(1400);
    let snapshots = SnapshotDir::new(&source_model(), &target);

    let err = services()
        .comparison_service
        .compare_files(
            &snapshots.source,
            &snapshots.target,
            None,
            &EventReporter::disabled(),
        )
        .await
        .unwrap_err();

    assert_eq!(
        err.root_cause().downcast_ref::<CompareError>(),
        Some(&CompareError::CompatibilityLevelMismatch {
            source_level: 1200,
            target_level: 1400,
        })
    );
}

#[tokio::test]
async fn test_skip_is_persisted_and_replayed() -> Result<()> {
    let snapshots = SnapshotDir::new(&source_model(), &target_model());
    let services = services();
    init(&snapshots, &services).await?;

    let object = services
        .comparison_service
        .set_skip(&snapshots.session, &total_sales(), true, &EventReporter::disabled())
        .await?;
    assert!(object.is_skipped());

    let session = services
        .comparison_service
        .load_session(&snapshots.session)
        .await?;
    assert_eq!(session.skip_selections.len(), 1);

    let (_, comparison) = services
        .comparison_service
        .compare_session(&snapshots.session, None, &EventReporter::disabled())
        .await?;
    assert!(comparison.find_by_identity(&total_sales()).unwrap().is_skipped());
    assert!(
        planned_changes(comparison.comparison_objects())
            .iter()
            .all(|c| c.name != "Total Sales")
    );

    Ok(())
}

#[tokio::test]
async fn test_skip_survives_rename() -> Result<()> {
    let snapshots = SnapshotDir::new(&source_model(), &target_model());
    let services = services();
    init(&snapshots, &services).await?;

    services
        .comparison_service
        .set_skip(&snapshots.session, &total_sales(), true, &EventReporter::disabled())
        .await?;

    let mut target = target_model();
    target["tables"][0]["measures"][0]["name"] = json!("Revenue");
    snapshots.write_target(&target);

    let (_, comparison) = services
        .comparison_service
        .compare_session(&snapshots.session, None, &EventReporter::disabled())
        .await?;

    let renamed = comparison
        .find(
            "Total Sales",
            "m1",
            "Revenue",
            "m1",
            ComparisonObjectType::Measure,
        )
        .unwrap();
    assert!(renamed.is_skipped());
    Ok(())
}

#[tokio::test]
async fn test_unskip_restores_default_action() -> Result<()> {
    let snapshots = SnapshotDir::new(&source_model(), &target_model());
    let services = services();
    init(&snapshots, &services).await?;

    let events = EventReporter::disabled();
    services
        .comparison_service
        .set_skip(&snapshots.session, &admins(), true, &events)
        .await?;
    let object = services
        .comparison_service
        .set_skip(&snapshots.session, &admins(), false, &events)
        .await?;

    assert_eq!(object.update_action(), UpdateAction::Delete);
    let session = services
        .comparison_service
        .load_session(&snapshots.session)
        .await?;
    assert!(session.skip_selections.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_skipping_identical_object_is_rejected() -> Result<()> {
    let snapshots = SnapshotDir::new(&source_model(), &target_model());
    let services = services();
    init(&snapshots, &services).await?;

    let readers = ObjectIdentity::new("Readers", "r1", "Readers", "r1", ComparisonObjectType::Role);
    let result = services
        .comparison_service
        .set_skip(&snapshots.session, &readers, true, &EventReporter::disabled())
        .await;

    assert!(matches!(
        result.unwrap_err().downcast_ref::<CompareError>(),
        Some(CompareError::IllegalUpdateAction { .. })
    ));
    let session = services
        .comparison_service
        .load_session(&snapshots.session)
        .await?;
    assert!(session.skip_selections.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_unknown_object_is_not_found() -> Result<()> {
    let snapshots = SnapshotDir::new(&source_model(), &target_model());
    let services = services();
    init(&snapshots, &services).await?;

    let ghost = ObjectIdentity::new("Ghost", "g1", "", "", ComparisonObjectType::Role);
    let result = services
        .comparison_service
        .set_skip(&snapshots.session, &ghost, true, &EventReporter::disabled())
        .await;

    assert_eq!(
        result.unwrap_err().downcast_ref::<CompareError>(),
        Some(&CompareError::ObjectNotFound)
    );
    Ok(())
}

#[tokio::test]
async fn test_orphaned_selection_dropped_on_save() -> Result<()> {
    let snapshots = SnapshotDir::new(&source_model(), &target_model());
    let services = services();
    init(&snapshots, &services).await?;

    services
        .comparison_service
        .set_skip(&snapshots.session, &admins(), true, &EventReporter::disabled())
        .await?;

    let mut target = target_model();
    target["roles"] = json!([{ "internalName": "r1", "name": "Readers", "definition": "read" }]);
    snapshots.write_target(&target);

    let (mut session, mut comparison) = services
        .comparison_service
        .compare_session(&snapshots.session, None, &EventReporter::disabled())
        .await?;
    assert_eq!(comparison.skip_selections().len(), 1);

    let saved = services
        .comparison_service
        .save_skip_selections(&mut session, &mut comparison, &snapshots.session)
        .await?;
    assert_eq!(saved, 0);
    Ok(())
}

#[tokio::test]
async fn test_skip_for_type_and_clear() -> Result<()> {
    let snapshots = SnapshotDir::new(&source_model(), &target_model());
    let services = services();
    init(&snapshots, &services).await?;

    let changed = services
        .comparison_service
        .set_skip_for_type(
            &snapshots.session,
            ComparisonObjectType::Measure,
            true,
            &EventReporter::disabled(),
        )
        .await?;
    assert_eq!(changed, 4);

    let cleared = services
        .comparison_service
        .clear_skip_selections(&snapshots.session)
        .await?;
    assert_eq!(cleared, 4);

    let session = services
        .comparison_service
        .load_session(&snapshots.session)
        .await?;
    assert!(session.skip_selections.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_validate_session_warns_on_skipped_parent() -> Result<()> {
    let snapshots = SnapshotDir::new(&source_model(), &target_model());
    let services = services();
    init(&snapshots, &services).await?;

    let budget = ObjectIdentity::new("Budget", "t2", "", "", ComparisonObjectType::Table);
    services
        .comparison_service
        .set_skip(&snapshots.session, &budget, true, &EventReporter::disabled())
        .await?;

    let messages = services
        .comparison_service
        .validate_session(&snapshots.session, &EventReporter::disabled())
        .await?;

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].status, ValidationStatus::Warning);
    assert_eq!(messages[0].object_type, ComparisonObjectType::Measure);
    assert_eq!(messages[0].name, "Planned");
    Ok(())
}

#[tokio::test]
async fn test_configured_exclusion_keeps_stored_skips() -> Result<()> {
    let snapshots = SnapshotDir::new(&source_model(), &target_model());
    let services = services();
    init(&snapshots, &services).await?;

    services
        .comparison_service
        .set_skip(&snapshots.session, &admins(), true, &EventReporter::disabled())
        .await?;

    let mut settings = Settings::default();
    settings.compare.exclude_object_types = Some(vec!["Role".to_string()]);
    let roles_excluded = AppServices::new(&settings);
    roles_excluded
        .comparison_service
        .set_skip(&snapshots.session, &total_sales(), true, &EventReporter::disabled())
        .await?;

    let session = services
        .comparison_service
        .load_session(&snapshots.session)
        .await?;
    let stored: Vec<_> = session
        .skip_selections
        .iter()
        .map(|s| s.comparison_object_type())
        .collect();
    assert_eq!(
        stored,
        vec![ComparisonObjectType::Role, ComparisonObjectType::Measure]
    );

    let (_, comparison) = services
        .comparison_service
        .compare_session(&snapshots.session, None, &EventReporter::disabled())
        .await?;
    assert!(comparison.find_by_identity(&admins()).unwrap().is_skipped());
    assert!(comparison.find_by_identity(&total_sales()).unwrap().is_skipped());
    Ok(())
}

#[tokio::test]
async fn test_compare_save_with_excluded_type_keeps_its_skips() -> Result<()> {
    let snapshots = SnapshotDir::new(&source_model(), &target_model());
    let services = services();
    init(&snapshots, &services).await?;

    services
        .comparison_service
        .set_skip(&snapshots.session, &admins(), true, &EventReporter::disabled())
        .await?;

    let (mut session, mut comparison) = services
        .comparison_service
        .compare_session(
            &snapshots.session,
            Some(vec!["role".to_string()]),
            &EventReporter::disabled(),
        )
        .await?;
    let saved = services
        .comparison_service
        .save_skip_selections(&mut session, &mut comparison, &snapshots.session)
        .await?;

    assert_eq!(saved, 1);
    Ok(())
}

#[tokio::test]
async fn test_measure_id_reused_across_tables_is_rejected() {
    let mut source = source_model();
    source["tables"][1]["measures"][0]["internalName"] = json!("m2");
    let snapshots = SnapshotDir::new(&source, &target_model());

    let err = services()
        .comparison_service
        .compare_files(
            &snapshots.source,
            &snapshots.target,
            None,
            &EventReporter::disabled(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err.root_cause().downcast_ref::<CompareError>(),
        Some(CompareError::DuplicateInternalName { internal_name, scope, .. })
            if internal_name == "m2" && scope == "model"
    ));
}

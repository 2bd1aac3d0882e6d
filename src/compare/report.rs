use serde::Serialize;

use crate::{
    compare::{ComparisonObject, walk},
    types::{ComparisonObjectStatus, ComparisonObjectType, UpdateAction},
};

/// A flattened view of one node, as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Top-level object type the row is grouped under.
    pub group: ComparisonObjectType,
    pub depth: usize,
    pub object_type: ComparisonObjectType,
    pub source_object_name: String,
    pub source_object_internal_name: String,
    pub target_object_name: String,
    pub target_object_internal_name: String,
    pub status: ComparisonObjectStatus,
    pub update_action: UpdateAction,
}

/// Accumulates rows while walking the forest; passed by value through the walk.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    include_same_definitions: bool,
    rows: Vec<ReportRow>,
}

impl ReportBuilder {
    pub fn new(include_same_definitions: bool) -> Self {
        Self {
            include_same_definitions,
            rows: Vec::new(),
        }
    }

    fn visit(mut self, node: &ComparisonObject, group: ComparisonObjectType, depth: usize) -> Self {
        if self.include_same_definitions || node.status().is_difference() {
            self.rows.push(ReportRow {
                group,
                depth,
                object_type: node.object_type(),
                source_object_name: node.source_object_name().to_string(),
                source_object_internal_name: node.source_object_internal_name().to_string(),
                target_object_name: node.target_object_name().to_string(),
                target_object_internal_name: node.target_object_internal_name().to_string(),
                status: node.status(),
                update_action: node.update_action(),
            });
        }
        node.children()
            .iter()
            .fold(self, |builder, child| builder.visit(child, group, depth + 1))
    }

    pub fn build(self, forest: &[ComparisonObject]) -> Vec<ReportRow> {
        forest
            .iter()
            .fold(self, |builder, node| builder.visit(node, node.object_type(), 0))
            .rows
    }
}

/// Rows for every node, or only the differences, in forest order.
pub fn flatten(forest: &[ComparisonObject], include_same_definitions: bool) -> Vec<ReportRow> {
    ReportBuilder::new(include_same_definitions).build(forest)
}

/// A change an updater is expected to apply to the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedChange {
    pub action: UpdateAction,
    pub object_type: ComparisonObjectType,
    pub name: String,
}

/// The actionable nodes in the order an updater walks them. Skipped and
/// identical nodes are left out.
pub fn planned_changes(forest: &[ComparisonObject]) -> Vec<PlannedChange> {
    walk(forest)
        .filter(|n| {
            matches!(
                n.update_action(),
                UpdateAction::Create | UpdateAction::Update | UpdateAction::Delete
            )
        })
        .map(|n| PlannedChange {
            action: n.update_action(),
            object_type: n.object_type(),
            name: n.display_name().to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonSummary {
    pub same_definition: usize,
    pub different_definitions: usize,
    pub missing_in_source: usize,
    pub missing_in_target: usize,
    pub skipped: usize,
}

pub fn summarize(forest: &[ComparisonObject]) -> ComparisonSummary {
    walk(forest).fold(ComparisonSummary::default(), |mut summary, n| {
        match n.status() {
            ComparisonObjectStatus::SameDefinition => summary.same_definition += 1,
            ComparisonObjectStatus::DifferentDefinitions => summary.different_definitions += 1,
            ComparisonObjectStatus::MissingInSource => summary.missing_in_source += 1,
            ComparisonObjectStatus::MissingInTarget => summary.missing_in_target += 1,
        }
        if n.is_skipped() {
            summary.skipped += 1;
        }
        summary
    })
}

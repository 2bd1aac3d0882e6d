use std::fmt;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::{
    compare::{
        ComparisonObject, DefinitionComparators, ObjectIdentity, SkipSelection, SkipSelections,
        ValidationMessage, build_forest, find_comparison_object, find_comparison_object_mut,
        validate_selection, walk, walk_mut,
    },
    dialect::SchemaComparer,
    errors::CompareError,
    types::{ComparisonObjectType, UpdateAction},
    utils::events::EventReporter,
};

/// One comparison session: a source/target pair, the difference forest built
/// from them, and the skip selections carried across re-comparisons.
pub struct Comparison {
    comparer: Box<dyn SchemaComparer>,
    comparators: DefinitionComparators,
    excluded_types: Vec<ComparisonObjectType>,
    compatibility_level: u32,
    comparison_objects: Vec<ComparisonObject>,
    skip_selections: SkipSelections,
}

impl Comparison {
    pub fn new(comparer: Box<dyn SchemaComparer>, comparators: DefinitionComparators) -> Self {
        Self {
            comparer,
            comparators,
            excluded_types: Vec::new(),
            compatibility_level: 0,
            comparison_objects: Vec::new(),
            skip_selections: SkipSelections::new(),
        }
    }

    pub fn with_excluded_types(mut self, excluded_types: Vec<ComparisonObjectType>) -> Self {
        self.excluded_types = excluded_types;
        self
    }

    pub fn with_skip_selections(mut self, skip_selections: SkipSelections) -> Self {
        self.skip_selections = skip_selections;
        self
    }

    pub fn comparison_objects(&self) -> &[ComparisonObject] {
        &self.comparison_objects
    }

    pub fn skip_selections(&self) -> &SkipSelections {
        &self.skip_selections
    }

    pub fn compatibility_level(&self) -> u32 {
        self.compatibility_level
    }

    /// Reads both schemas, rebuilds the forest from scratch and re-applies the
    /// stored skip selections.
    pub fn compare_objects(&mut self, events: &EventReporter) -> Result<()> {
        self.comparison_objects.clear();
        let pair = self.comparer.read_schemas(events)?;

        if pair.source.compatibility_level != pair.target.compatibility_level {
            return Err(CompareError::CompatibilityLevelMismatch {
                source_level: pair.source.compatibility_level,
                target_level: pair.target.compatibility_level,
            }
            .into());
        }

        events.progress("Comparing objects");
        self.comparison_objects = build_forest(
            &pair.source,
            &pair.target,
            &self.comparators,
            &self.excluded_types,
        )?;
        self.compatibility_level = pair.source.compatibility_level;

        self.refresh_comparison_objects_from_skip_selections();

        info!(
            "Compared {} models at compatibility level {}: {} top-level object(s)",
            self.comparer.dialect(),
            self.compatibility_level,
            self.comparison_objects.len()
        );
        Ok(())
    }

    /// Replaces the stored selections with exactly the nodes currently marked
    /// Skip. Selections for excluded types are kept as they are, since the
    /// forest cannot show them.
    pub fn refresh_skip_selections_from_comparison_objects(&mut self) -> Result<(), CompareError> {
        let excluded_types = &self.excluded_types;
        self.skip_selections
            .retain(|s| !is_observed(excluded_types, s.comparison_object_type()));
        for node in walk(&self.comparison_objects)
            .filter(|n| n.status().is_difference() && n.is_skipped())
        {
            self.skip_selections
                .insert(SkipSelection::from_comparison_object(node)?);
        }
        debug!("Captured {} skip selection(s)", self.skip_selections.len());
        Ok(())
    }

    /// Marks Skip every differing node described by a stored selection. Nodes
    /// without a match keep their action.
    pub fn refresh_comparison_objects_from_skip_selections(&mut self) {
        let selections = &self.skip_selections;
        let mut replayed = 0usize;
        walk_mut(&mut self.comparison_objects, &mut |node| {
            if node.status().is_difference()
                && selections.find_match(node).is_some()
                && node.skip().is_ok()
            {
                replayed += 1;
            }
        });
        debug!(
            "Replayed {} of {} skip selection(s)",
            replayed,
            self.skip_selections.len()
        );

        for orphan in self.skip_selections.iter().filter(|s| {
            is_observed(&self.excluded_types, s.comparison_object_type())
                && !walk(&self.comparison_objects)
                    .any(|n| n.status().is_difference() && s.matches(n))
        }) {
            warn!(
                "Skip selection for {} ({} / {}) with status {} matches no object",
                orphan.comparison_object_type(),
                orphan.source_object_internal_name(),
                orphan.target_object_internal_name(),
                orphan.status()
            );
        }
    }

    pub fn find(
        &self,
        source_object_name: &str,
        source_object_internal_name: &str,
        target_object_name: &str,
        target_object_internal_name: &str,
        object_type: ComparisonObjectType,
    ) -> Option<&ComparisonObject> {
        find_comparison_object(
            &self.comparison_objects,
            &ObjectIdentity::new(
                source_object_name,
                source_object_internal_name,
                target_object_name,
                target_object_internal_name,
                object_type,
            ),
        )
    }

    pub fn find_by_identity(&self, identity: &ObjectIdentity) -> Option<&ComparisonObject> {
        find_comparison_object(&self.comparison_objects, identity)
    }

    /// Changes the action of the node identified by `identity`.
    pub fn set_update_action(
        &mut self,
        identity: &ObjectIdentity,
        action: UpdateAction,
    ) -> Result<(), CompareError> {
        find_comparison_object_mut(&mut self.comparison_objects, identity)
            .ok_or(CompareError::ObjectNotFound)?
            .set_update_action(action)
    }

    /// Skips or restores every differing node of `object_type`.
    pub fn set_skip_for_type(&mut self, object_type: ComparisonObjectType, skip: bool) -> usize {
        let mut changed = 0usize;
        walk_mut(&mut self.comparison_objects, &mut |node| {
            if node.object_type() != object_type || !node.status().is_difference() {
                return;
            }
            let updated = if skip {
                node.skip().is_ok()
            } else {
                node.unskip();
                true
            };
            if updated {
                changed += 1;
            }
        });
        changed
    }

    pub fn validate_selection(&self, events: &EventReporter) -> Vec<ValidationMessage> {
        validate_selection(&self.comparison_objects, events)
    }

    /// Drops the forest and releases the comparer.
    pub fn disconnect(&mut self) {
        self.comparison_objects.clear();
        self.comparer.disconnect();
    }
}

impl fmt::Debug for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparison")
            .field("dialect", &self.comparer.dialect())
            .field("excluded_types", &self.excluded_types)
            .field("compatibility_level", &self.compatibility_level)
            .field("comparison_objects", &self.comparison_objects.len())
            .field("skip_selections", &self.skip_selections)
            .finish_non_exhaustive()
    }
}

/// Whether a comparison built with `excluded_types` contains nodes of
/// `object_type` at all.
fn is_observed(excluded_types: &[ComparisonObjectType], object_type: ComparisonObjectType) -> bool {
    !excluded_types.contains(&object_type)
        && !(object_type.is_table_child() && excluded_types.contains(&ComparisonObjectType::Table))
}

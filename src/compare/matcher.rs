use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::{
    compare::{ComparisonObject, DefinitionComparators},
    errors::{CompareError, Side},
    types::{
        ComparisonObjectStatus, ComparisonObjectType, ModelSchema, SchemaItem, SchemaObject,
        TableSchema,
    },
};

/// Indexes one side of a level by internal name, rejecting blank and repeated
/// identities.
fn index_by_internal_name<'a, T: SchemaItem>(
    object_type: ComparisonObjectType,
    items: &'a [T],
    side: Side,
    scope: &str,
) -> Result<HashMap<&'a str, &'a T>, CompareError> {
    let mut map = HashMap::with_capacity(items.len());
    for item in items {
        if item.internal_name().is_empty() {
            return Err(CompareError::MissingInternalName {
                object_type,
                name: item.name().to_string(),
                side,
            });
        }
        if map.insert(item.internal_name(), item).is_some() {
            return Err(CompareError::DuplicateInternalName {
                object_type,
                internal_name: item.internal_name().to_string(),
                side,
                scope: scope.to_string(),
            });
        }
    }
    Ok(map)
}

/// Pairs the objects of one level of the hierarchy.
///
/// Source objects come first in source order, followed by target-only objects
/// in target order. `children` builds the nested level for each emitted pair.
pub fn match_objects<T, F>(
    object_type: ComparisonObjectType,
    sources: &[T],
    targets: &[T],
    scope: &str,
    comparators: &DefinitionComparators,
    mut children: F,
) -> Result<Vec<ComparisonObject>, CompareError>
where
    T: SchemaItem,
    F: FnMut(Option<&T>, Option<&T>) -> Result<Vec<ComparisonObject>, CompareError>,
{
    let source_map = index_by_internal_name(object_type, sources, Side::Source, scope)?;
    let target_map = index_by_internal_name(object_type, targets, Side::Target, scope)?;

    let mut nodes = Vec::with_capacity(sources.len().max(targets.len()));
    let mut processed: HashSet<&str> = HashSet::with_capacity(source_map.len());

    for source in sources {
        processed.insert(source.internal_name());

        let target = target_map.get(source.internal_name()).copied();
        let status = match target {
            Some(target) => {
                if comparators.equivalent(
                    object_type,
                    source.definition().unwrap_or_default(),
                    target.definition().unwrap_or_default(),
                ) {
                    ComparisonObjectStatus::SameDefinition
                } else {
                    ComparisonObjectStatus::DifferentDefinitions
                }
            }
            None => ComparisonObjectStatus::MissingInTarget,
        };

        let nested = children(Some(source), target)?;
        nodes.push(ComparisonObject::new(object_type, Some(source), target, status).with_children(nested));
    }

    for target in targets {
        if processed.contains(target.internal_name()) {
            continue;
        }
        let nested = children(None, Some(target))?;
        nodes.push(
            ComparisonObject::new::<T, T>(
                object_type,
                None,
                Some(target),
                ComparisonObjectStatus::MissingInSource,
            )
            .with_children(nested),
        );
    }

    debug!(
        "Matched {} {} object(s) in {} ({} source, {} target)",
        nodes.len(),
        object_type,
        scope,
        sources.len(),
        targets.len()
    );

    Ok(nodes)
}

fn no_children<T>(_: Option<&T>, _: Option<&T>) -> Result<Vec<ComparisonObject>, CompareError> {
    Ok(Vec::new())
}

fn match_leaves(
    object_type: ComparisonObjectType,
    sources: &[SchemaObject],
    targets: &[SchemaObject],
    scope: &str,
    comparators: &DefinitionComparators,
) -> Result<Vec<ComparisonObject>, CompareError> {
    match_objects(object_type, sources, targets, scope, comparators, no_children)
}

/// Pairs relationships, measures and KPIs within the scope of one table.
fn match_table_children(
    source: Option<&TableSchema>,
    target: Option<&TableSchema>,
    comparators: &DefinitionComparators,
    excluded_types: &[ComparisonObjectType],
) -> Result<Vec<ComparisonObject>, CompareError> {
    let scope = format!(
        "table '{}'",
        source.or(target).map(|t| t.name.as_str()).unwrap_or_default()
    );

    let mut children = Vec::new();
    for object_type in ComparisonObjectType::TABLE_CHILDREN {
        if excluded_types.contains(&object_type) {
            continue;
        }
        let pick = |table: Option<&TableSchema>| -> Vec<SchemaObject> {
            table
                .map(|t| table_children(t, object_type).to_vec())
                .unwrap_or_default()
        };
        children.extend(match_leaves(
            object_type,
            &pick(source),
            &pick(target),
            &scope,
            comparators,
        )?);
    }
    Ok(children)
}

fn table_children(table: &TableSchema, object_type: ComparisonObjectType) -> &[SchemaObject] {
    match object_type {
        ComparisonObjectType::Relationship => &table.relationships,
        ComparisonObjectType::Measure => &table.measures,
        _ => &table.kpis,
    }
}

/// Relationships, measures and KPIs are identified by internal name alone, so
/// on each side an internal name may belong to one table only. Repeats inside
/// a single table are reported by the per-table match.
fn ensure_table_children_unique(
    model: &ModelSchema,
    side: Side,
    excluded_types: &[ComparisonObjectType],
) -> Result<(), CompareError> {
    for object_type in ComparisonObjectType::TABLE_CHILDREN {
        if excluded_types.contains(&object_type) {
            continue;
        }

        let mut owners: HashMap<&str, &str> = HashMap::new();
        for table in &model.tables {
            for item in table_children(table, object_type) {
                if item.internal_name.is_empty() {
                    continue;
                }
                let owner = owners
                    .entry(item.internal_name.as_str())
                    .or_insert(table.internal_name.as_str());
                if *owner != table.internal_name {
                    return Err(CompareError::DuplicateInternalName {
                        object_type,
                        internal_name: item.internal_name.clone(),
                        side,
                        scope: "model".to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Builds the whole forest: connections, tables (with their children),
/// perspectives, cultures, roles and actions, in that order.
pub fn build_forest(
    source: &ModelSchema,
    target: &ModelSchema,
    comparators: &DefinitionComparators,
    excluded_types: &[ComparisonObjectType],
) -> Result<Vec<ComparisonObject>, CompareError> {
    let mut forest = Vec::new();

    for object_type in ComparisonObjectType::TOP_LEVEL {
        if excluded_types.contains(&object_type) {
            continue;
        }

        let nodes = match object_type {
            ComparisonObjectType::Table => {
                ensure_table_children_unique(source, Side::Source, excluded_types)?;
                ensure_table_children_unique(target, Side::Target, excluded_types)?;
                match_objects(
                object_type,
                &source.tables,
                &target.tables,
                "model",
                comparators,
                |s, t| match_table_children(s, t, comparators, excluded_types),
                )?
            }
            _ => {
                let (sources, targets) = match object_type {
                    ComparisonObjectType::Connection => (&source.connections, &target.connections),
                    ComparisonObjectType::Perspective => {
                        (&source.perspectives, &target.perspectives)
                    }
                    ComparisonObjectType::Culture => (&source.cultures, &target.cultures),
                    ComparisonObjectType::Role => (&source.roles, &target.roles),
                    _ => (&source.actions, &target.actions),
                };
                match_leaves(object_type, sources, targets, "model", comparators)?
            }
        };
        forest.extend(nodes);
    }

    Ok(forest)
}

use crate::{
    compare::{ComparisonObject, walk},
    types::ComparisonObjectType,
};

/// The five fields that identify a node in the forest. Absent sides are empty
/// strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectIdentity {
    pub source_object_name: String,
    pub source_object_internal_name: String,
    pub target_object_name: String,
    pub target_object_internal_name: String,
    pub object_type: ComparisonObjectType,
}

impl ObjectIdentity {
    pub fn new(
        source_object_name: impl Into<String>,
        source_object_internal_name: impl Into<String>,
        target_object_name: impl Into<String>,
        target_object_internal_name: impl Into<String>,
        object_type: ComparisonObjectType,
    ) -> Self {
        Self {
            source_object_name: source_object_name.into(),
            source_object_internal_name: source_object_internal_name.into(),
            target_object_name: target_object_name.into(),
            target_object_internal_name: target_object_internal_name.into(),
            object_type,
        }
    }

    pub fn of(object: &ComparisonObject) -> Self {
        Self::new(
            object.source_object_name(),
            object.source_object_internal_name(),
            object.target_object_name(),
            object.target_object_internal_name(),
            object.object_type(),
        )
    }

    pub fn matches(&self, object: &ComparisonObject) -> bool {
        self.object_type == object.object_type()
            && self.source_object_name == object.source_object_name()
            && self.source_object_internal_name == object.source_object_internal_name()
            && self.target_object_name == object.target_object_name()
            && self.target_object_internal_name == object.target_object_internal_name()
    }
}

/// First node, depth-first, whose identity equals `identity` exactly.
pub fn find_comparison_object<'a>(
    forest: &'a [ComparisonObject],
    identity: &ObjectIdentity,
) -> Option<&'a ComparisonObject> {
    walk(forest).find(|n| identity.matches(n))
}

/// Mutable counterpart of [`find_comparison_object`].
pub fn find_comparison_object_mut<'a>(
    forest: &'a mut [ComparisonObject],
    identity: &ObjectIdentity,
) -> Option<&'a mut ComparisonObject> {
    for node in forest.iter_mut() {
        if identity.matches(node) {
            return Some(node);
        }
        if let Some(found) = find_comparison_object_mut(node.children_mut(), identity) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ComparisonObjectStatus, SchemaObject};

    fn forest() -> Vec<ComparisonObject> {
        let sales = SchemaObject::new("t1", "Sales");
        let total = SchemaObject::new("m1", "Total");
        let dropped = SchemaObject::new("m9", "Old");
        vec![
            ComparisonObject::new(
                ComparisonObjectType::Table,
                Some(&sales),
                Some(&sales),
                ComparisonObjectStatus::SameDefinition,
            )
            .with_children(vec![
                ComparisonObject::new(
                    ComparisonObjectType::Measure,
                    Some(&total),
                    Some(&total),
                    ComparisonObjectStatus::DifferentDefinitions,
                ),
                ComparisonObject::new::<SchemaObject, SchemaObject>(
                    ComparisonObjectType::Measure,
                    None,
                    Some(&dropped),
                    ComparisonObjectStatus::MissingInSource,
                ),
            ]),
        ]
    }

    #[test]
    fn test_finds_nested_node() {
        let forest = forest();
        let found = find_comparison_object(
            &forest,
            &ObjectIdentity::new("Total", "m1", "Total", "m1", ComparisonObjectType::Measure),
        );
        assert_eq!(found.map(|n| n.status()), Some(ComparisonObjectStatus::DifferentDefinitions));
    }

    #[test]
    fn test_absent_side_matches_empty_strings() {
        let forest = forest();
        let found = find_comparison_object(
            &forest,
            &ObjectIdentity::new("", "", "Old", "m9", ComparisonObjectType::Measure),
        );
        assert!(found.is_some());
    }

    #[test]
    fn test_any_differing_field_is_not_found() {
        let forest = forest();
        let misses = [
            ObjectIdentity::new("Total", "m1", "Total", "m1", ComparisonObjectType::Kpi),
            ObjectIdentity::new("total", "m1", "Total", "m1", ComparisonObjectType::Measure),
            ObjectIdentity::new("Total", "m2", "Total", "m1", ComparisonObjectType::Measure),
            ObjectIdentity::new("Total", "m1", "Totals", "m1", ComparisonObjectType::Measure),
            ObjectIdentity::new("Total", "m1", "Total", "", ComparisonObjectType::Measure),
        ];
        for identity in &misses {
            assert!(find_comparison_object(&forest, identity).is_none(), "{:?}", identity);
        }
    }

    #[test]
    fn test_find_mut_allows_changing_action() {
        let mut forest = forest();
        let identity = ObjectIdentity::new("", "", "Old", "m9", ComparisonObjectType::Measure);
        find_comparison_object_mut(&mut forest, &identity)
            .unwrap()
            .skip()
            .unwrap();
        assert!(find_comparison_object(&forest, &identity).unwrap().is_skipped());
    }
}

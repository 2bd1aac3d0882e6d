use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    compare::ComparisonObject,
    errors::CompareError,
    types::{ComparisonObjectStatus, ComparisonObjectType},
};

/// A remembered decision to leave one difference alone.
///
/// The internal name of the side an object is missing from is always empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipSelection {
    status: ComparisonObjectStatus,
    comparison_object_type: ComparisonObjectType,
    #[serde(default)]
    source_object_internal_name: String,
    #[serde(default)]
    target_object_internal_name: String,
}

impl SkipSelection {
    pub fn new(
        status: ComparisonObjectStatus,
        comparison_object_type: ComparisonObjectType,
        source_object_internal_name: impl Into<String>,
        target_object_internal_name: impl Into<String>,
    ) -> Result<Self, CompareError> {
        let selection = Self {
            status,
            comparison_object_type,
            source_object_internal_name: source_object_internal_name.into(),
            target_object_internal_name: target_object_internal_name.into(),
        };
        selection.validate()?;
        Ok(selection)
    }

    pub fn from_comparison_object(object: &ComparisonObject) -> Result<Self, CompareError> {
        Self::new(
            object.status(),
            object.object_type(),
            object.source_object_internal_name(),
            object.target_object_internal_name(),
        )
    }

    fn validate(&self) -> Result<(), CompareError> {
        let has_source = !self.source_object_internal_name.is_empty();
        let has_target = !self.target_object_internal_name.is_empty();

        let reason = match self.status {
            ComparisonObjectStatus::SameDefinition => {
                Some("identical objects cannot be skipped")
            }
            ComparisonObjectStatus::DifferentDefinitions if !(has_source && has_target) => {
                Some("both internal names are required for different definitions")
            }
            ComparisonObjectStatus::MissingInSource if has_source || !has_target => {
                Some("missing in source requires only a target internal name")
            }
            ComparisonObjectStatus::MissingInTarget if has_target || !has_source => {
                Some("missing in target requires only a source internal name")
            }
            _ => None,
        };

        match reason {
            Some(reason) => Err(CompareError::InvalidSkipSelection {
                object_type: self.comparison_object_type,
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn status(&self) -> ComparisonObjectStatus {
        self.status
    }

    pub fn comparison_object_type(&self) -> ComparisonObjectType {
        self.comparison_object_type
    }

    pub fn source_object_internal_name(&self) -> &str {
        &self.source_object_internal_name
    }

    pub fn target_object_internal_name(&self) -> &str {
        &self.target_object_internal_name
    }

    /// Whether this selection describes `object`. The internal name of a
    /// missing side takes no part in the match.
    pub fn matches(&self, object: &ComparisonObject) -> bool {
        self.status == object.status()
            && self.comparison_object_type == object.object_type()
            && (self.status == ComparisonObjectStatus::MissingInSource
                || self.source_object_internal_name == object.source_object_internal_name())
            && (self.status == ComparisonObjectStatus::MissingInTarget
                || self.target_object_internal_name == object.target_object_internal_name())
    }
}

/// The set of skip selections carried by a comparison session.
///
/// Keeps insertion order and never holds two equal selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkipSelections(Vec<SkipSelection>);

impl SkipSelections {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds a store from loose records, validating each and rejecting duplicates.
    pub fn try_from_vec(selections: Vec<SkipSelection>) -> Result<Self, CompareError> {
        let mut store = Self::new();
        for selection in selections {
            selection.validate()?;
            let (object_type, status) = (selection.comparison_object_type, selection.status);
            if !store.insert(selection) {
                return Err(CompareError::DuplicateSkipSelection {
                    object_type,
                    status,
                });
            }
        }
        Ok(store)
    }

    /// Adds `selection` unless an equal one is already present.
    pub fn insert(&mut self, selection: SkipSelection) -> bool {
        if self.0.contains(&selection) {
            return false;
        }
        self.0.push(selection);
        true
    }

    /// Keeps only the selections for which `keep` returns true, in order.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&SkipSelection) -> bool,
    {
        self.0.retain(keep);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkipSelection> {
        self.0.iter()
    }

    /// First selection that describes `object`.
    pub fn find_match(&self, object: &ComparisonObject) -> Option<&SkipSelection> {
        self.0.iter().find(|s| s.matches(object))
    }
}

impl<'de> Deserialize<'de> for SkipSelections {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let selections = Vec::<SkipSelection>::deserialize(deserializer)?;
        SkipSelections::try_from_vec(selections).map_err(serde::de::Error::custom)
    }
}

use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    compare::{DefinitionCompareMode, DefinitionComparators},
    types::ComparisonObjectType,
    utils::serde::deserialize_opt_vec_from_string,
};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CompareConfig {
    #[serde(default)]
    pub definition_compare_mode: DefinitionCompareMode,

    #[serde(default, deserialize_with = "deserialize_opt_vec_from_string")]
    pub exclude_object_types: Option<Vec<String>>,

    #[serde(default)]
    pub show_same_definitions: bool,
}

impl CompareConfig {
    pub fn comparators(&self) -> DefinitionComparators {
        DefinitionComparators::from_mode(self.definition_compare_mode)
    }

    /// Configured exclusions merged with `exclude_object_types`, without duplicates.
    pub fn combined_exclude_object_types(
        &self,
        exclude_object_types: Option<Vec<String>>,
    ) -> Option<Vec<String>> {
        let self_types_iter = self
            .exclude_object_types
            .as_deref()
            .unwrap_or_default()
            .iter();

        let param_types_iter = exclude_object_types.as_deref().unwrap_or_default().iter();

        let result: Vec<String> = param_types_iter
            .chain(self_types_iter)
            .map(|s| s.to_lowercase())
            .unique()
            .collect();

        if result.is_empty() {
            None
        } else {
            Some(result)
        }
    }

    /// Parses object type names, failing on the first unknown name.
    pub fn parse_object_types(names: &[String]) -> Result<Vec<ComparisonObjectType>, String> {
        names
            .iter()
            .map(|name| {
                ComparisonObjectType::from_str(name.trim())
                    .map_err(|_| format!("Unknown object type '{}'", name))
            })
            .collect()
    }

    pub fn excluded_types(
        &self,
        exclude_object_types: Option<Vec<String>>,
    ) -> Result<Vec<ComparisonObjectType>, String> {
        match self.combined_exclude_object_types(exclude_object_types) {
            Some(names) => Self::parse_object_types(&names),
            None => Ok(Vec::new()),
        }
    }
}

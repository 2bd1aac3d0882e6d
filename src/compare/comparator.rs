use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::types::ComparisonObjectType;

/// Decides whether two definitions of the same kind of object are equivalent.
///
/// Absent definitions arrive as empty strings.
pub trait DefinitionComparator: Send + Sync {
    fn equivalent(&self, source: &str, target: &str) -> bool;
}

/// Byte-for-byte equality.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactComparator;

impl DefinitionComparator for ExactComparator {
    fn equivalent(&self, source: &str, target: &str) -> bool {
        source == target
    }
}

/// Equality after collapsing every run of whitespace into a single space.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceInsensitiveComparator;

impl DefinitionComparator for WhitespaceInsensitiveComparator {
    fn equivalent(&self, source: &str, target: &str) -> bool {
        source.split_whitespace().eq(target.split_whitespace())
    }
}

/// Structural equality of JSON documents, so key order and formatting do not
/// produce differences. Falls back to exact text comparison when either side
/// is not valid JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonComparator;

impl DefinitionComparator for JsonComparator {
    fn equivalent(&self, source: &str, target: &str) -> bool {
        match (
            serde_json::from_str::<serde_json::Value>(source),
            serde_json::from_str::<serde_json::Value>(target),
        ) {
            (Ok(s), Ok(t)) => s == t,
            _ => source == target,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DefinitionCompareMode {
    #[default]
    Exact,
    Whitespace,
    Json,
}

impl DefinitionCompareMode {
    pub fn comparator(&self) -> Box<dyn DefinitionComparator> {
        match self {
            DefinitionCompareMode::Exact => Box::new(ExactComparator),
            DefinitionCompareMode::Whitespace => Box::new(WhitespaceInsensitiveComparator),
            DefinitionCompareMode::Json => Box::new(JsonComparator),
        }
    }
}

/// A default comparator plus per-object-type overrides.
pub struct DefinitionComparators {
    default: Box<dyn DefinitionComparator>,
    overrides: HashMap<ComparisonObjectType, Box<dyn DefinitionComparator>>,
}

impl Default for DefinitionComparators {
    fn default() -> Self {
        Self::new(Box::new(ExactComparator))
    }
}

impl DefinitionComparators {
    pub fn new(default: Box<dyn DefinitionComparator>) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    pub fn from_mode(mode: DefinitionCompareMode) -> Self {
        Self::new(mode.comparator())
    }

    pub fn with_override(
        mut self,
        object_type: ComparisonObjectType,
        comparator: Box<dyn DefinitionComparator>,
    ) -> Self {
        self.overrides.insert(object_type, comparator);
        self
    }

    pub fn for_type(&self, object_type: ComparisonObjectType) -> &dyn DefinitionComparator {
        self.overrides
            .get(&object_type)
            .map(|c| c.as_ref())
            .unwrap_or(self.default.as_ref())
    }

    pub fn equivalent(&self, object_type: ComparisonObjectType, source: &str, target: &str) -> bool {
        self.for_type(object_type).equivalent(source, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_exact_comparator() {
        assert!(ExactComparator.equivalent("SUM(x)", "SUM(x)"));
        assert!(!ExactComparator.equivalent("SUM(x)", "SUM( x )"));
        assert!(ExactComparator.equivalent("", ""));
    }

    #[test]
    fn test_whitespace_comparator() {
        let c = WhitespaceInsensitiveComparator;
        assert!(c.equivalent("SUM(Sales[Amount])\n", "  SUM(Sales[Amount])"));
        assert!(c.equivalent("a   b\tc", "a b c"));
        assert!(!c.equivalent("a b", "ab"));
    }

    #[test]
    fn test_json_comparator_ignores_key_order() {
        let c = JsonComparator;
        assert!(c.equivalent(r#"{"a":1,"b":[1,2]}"#, r#"{ "b": [1, 2], "a": 1 }"#));
        assert!(!c.equivalent(r#"{"a":1}"#, r#"{"a":2}"#));
    }

    #[test]
    fn test_json_comparator_falls_back_to_text() {
        let c = JsonComparator;
        assert!(c.equivalent("not json", "not json"));
        assert!(!c.equivalent("not json", r#"{"a":1}"#));
        assert!(c.equivalent("", ""));
    }

    #[test]
    fn test_overrides_apply_per_type() {
        let comparators = DefinitionComparators::default().with_override(
            ComparisonObjectType::Measure,
            Box::new(WhitespaceInsensitiveComparator),
        );

        assert!(comparators.equivalent(ComparisonObjectType::Measure, "a  b", "a b"));
        assert!(!comparators.equivalent(ComparisonObjectType::Table, "a  b", "a b"));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(
            DefinitionCompareMode::from_str("JSON").unwrap(),
            DefinitionCompareMode::Json
        );
        assert_eq!(DefinitionCompareMode::default(), DefinitionCompareMode::Exact);
        assert!(DefinitionCompareMode::from_str("fuzzy").is_err());
    }
}

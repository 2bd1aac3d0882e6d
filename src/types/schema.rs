use serde::{Deserialize, Serialize};

use crate::utils::serde::deserialize_definition;

/// Identity and definition shared by every item a schema source hands to the matcher.
pub trait SchemaItem {
    fn internal_name(&self) -> &str;
    fn name(&self) -> &str;
    fn definition(&self) -> Option<&str>;
}

/// A single schema object as read from one side of the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SchemaObject {
    pub internal_name: String,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_definition")]
    pub definition: Option<String>,
}

impl SchemaObject {
    pub fn new(internal_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            internal_name: internal_name.into(),
            name: name.into(),
            definition: None,
        }
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }
}

impl SchemaItem for SchemaObject {
    fn internal_name(&self) -> &str {
        &self.internal_name
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn definition(&self) -> Option<&str> {
        self.definition.as_deref()
    }
}

/// A table together with the objects scoped to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    pub internal_name: String,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_definition")]
    pub definition: Option<String>,
    #[serde(default)]
    pub relationships: Vec<SchemaObject>,
    #[serde(default)]
    pub measures: Vec<SchemaObject>,
    #[serde(default)]
    pub kpis: Vec<SchemaObject>,
}

impl TableSchema {
    pub fn new(internal_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            internal_name: internal_name.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }
}

impl SchemaItem for TableSchema {
    fn internal_name(&self) -> &str {
        &self.internal_name
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn definition(&self) -> Option<&str> {
        self.definition.as_deref()
    }
}

/// Everything one side of a comparison exposes, already fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ModelSchema {
    #[serde(default)]
    pub compatibility_level: u32,
    #[serde(default)]
    pub connections: Vec<SchemaObject>,
    #[serde(default)]
    pub tables: Vec<TableSchema>,
    #[serde(default)]
    pub perspectives: Vec<SchemaObject>,
    #[serde(default)]
    pub cultures: Vec<SchemaObject>,
    #[serde(default)]
    pub roles: Vec<SchemaObject>,
    #[serde(default)]
    pub actions: Vec<SchemaObject>,
}

use colored::*;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "PascalCase", ascii_case_insensitive)]
pub enum ComparisonObjectType {
    Connection,
    Table,
    Relationship,
    Measure,
    Kpi,
    Perspective,
    Culture,
    Role,
    Action,
}

impl ComparisonObjectType {
    /// Object types that live directly in the forest, in the order they are emitted.
    pub const TOP_LEVEL: [ComparisonObjectType; 6] = [
        ComparisonObjectType::Connection,
        ComparisonObjectType::Table,
        ComparisonObjectType::Perspective,
        ComparisonObjectType::Culture,
        ComparisonObjectType::Role,
        ComparisonObjectType::Action,
    ];

    /// Object types nested under a table.
    pub const TABLE_CHILDREN: [ComparisonObjectType; 3] = [
        ComparisonObjectType::Relationship,
        ComparisonObjectType::Measure,
        ComparisonObjectType::Kpi,
    ];

    pub fn is_table_child(&self) -> bool {
        Self::TABLE_CHILDREN.contains(self)
    }

    pub fn to_colored_string(&self) -> String {
        match self {
            ComparisonObjectType::Connection => "Connection".cyan().to_string(),
            ComparisonObjectType::Table => "Table".blue().bold().to_string(),
            other => other.to_string().bright_black().to_string(),
        }
    }
}

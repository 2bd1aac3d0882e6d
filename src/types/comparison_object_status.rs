use colored::*;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonObjectStatus {
    SameDefinition,
    DifferentDefinitions,
    MissingInSource,
    MissingInTarget,
}

impl ComparisonObjectStatus {
    pub fn is_difference(&self) -> bool {
        *self != ComparisonObjectStatus::SameDefinition
    }

    pub fn to_colored_string(&self) -> String {
        match self {
            ComparisonObjectStatus::SameDefinition => "SAME".bright_black().to_string(),
            ComparisonObjectStatus::DifferentDefinitions => "DIFFERENT".yellow().bold().to_string(),
            ComparisonObjectStatus::MissingInSource => "MISSING IN SOURCE".red().bold().to_string(),
            ComparisonObjectStatus::MissingInTarget => {
                "MISSING IN TARGET".green().bold().to_string()
            }
        }
    }
}

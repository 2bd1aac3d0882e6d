use colored::*;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::types::ComparisonObjectStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum UpdateAction {
    /// Held only by nodes whose definitions are identical.
    None,
    Create,
    Update,
    Delete,
    Skip,
}

impl UpdateAction {
    /// The action a freshly matched node starts with.
    pub fn default_for(status: ComparisonObjectStatus) -> Self {
        match status {
            ComparisonObjectStatus::SameDefinition => UpdateAction::None,
            ComparisonObjectStatus::DifferentDefinitions => UpdateAction::Update,
            ComparisonObjectStatus::MissingInTarget => UpdateAction::Create,
            ComparisonObjectStatus::MissingInSource => UpdateAction::Delete,
        }
    }

    /// Whether a node in `status` may hold this action.
    pub fn is_allowed_for(&self, status: ComparisonObjectStatus) -> bool {
        match status {
            ComparisonObjectStatus::SameDefinition => *self == UpdateAction::None,
            _ => *self == UpdateAction::Skip || *self == Self::default_for(status),
        }
    }

    pub fn to_colored_string(&self) -> String {
        match self {
            UpdateAction::None => "".to_string(),
            UpdateAction::Create => "CREATE".green().bold().to_string(),
            UpdateAction::Update => "UPDATE".yellow().bold().to_string(),
            UpdateAction::Delete => "DELETE".red().bold().to_string(),
            UpdateAction::Skip => "SKIP".bright_black().to_string(),
        }
    }
}

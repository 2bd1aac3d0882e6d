use colored::*;
use strum_macros::Display;
use tracing::warn;

use crate::{
    compare::ComparisonObject,
    types::{ComparisonObjectStatus, ComparisonObjectType, UpdateAction},
    utils::events::{ComparisonEvent, EventReporter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationStatus {
    Warning,
    Informational,
}

impl ValidationStatus {
    pub fn to_colored_string(&self) -> String {
        match self {
            ValidationStatus::Warning => "WARNING".yellow().bold().to_string(),
            ValidationStatus::Informational => "INFO".blue().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationMessage {
    pub status: ValidationStatus,
    pub object_type: ComparisonObjectType,
    pub name: String,
    pub message: String,
}

/// Checks table children whose chosen action conflicts with the action on their
/// table. Every message is also emitted on `events`.
pub fn validate_selection(
    forest: &[ComparisonObject],
    events: &EventReporter,
) -> Vec<ValidationMessage> {
    let mut messages = Vec::new();

    for table in forest
        .iter()
        .filter(|n| n.object_type() == ComparisonObjectType::Table)
    {
        for child in table.children() {
            if let Some(message) = check_child(table, child) {
                messages.push(message);
            }
        }
    }

    for message in &messages {
        if message.status == ValidationStatus::Warning {
            warn!("{} '{}': {}", message.object_type, message.name, message.message);
        }
        events.report(ComparisonEvent::Validation(message.clone()));
    }

    messages
}

fn check_child(table: &ComparisonObject, child: &ComparisonObject) -> Option<ValidationMessage> {
    let (status, message) = match (table.status(), table.update_action(), child.update_action()) {
        (ComparisonObjectStatus::MissingInTarget, UpdateAction::Skip, UpdateAction::Create) => (
            ValidationStatus::Warning,
            format!(
                "cannot be created because table '{}' does not exist in the target and is skipped",
                table.display_name()
            ),
        ),
        (ComparisonObjectStatus::MissingInTarget, UpdateAction::Create, UpdateAction::Skip) => (
            ValidationStatus::Informational,
            format!(
                "is skipped and will not be created with table '{}'",
                table.display_name()
            ),
        ),
        (ComparisonObjectStatus::MissingInSource, UpdateAction::Delete, UpdateAction::Skip) => (
            ValidationStatus::Warning,
            format!(
                "is skipped but will be deleted together with table '{}'",
                table.display_name()
            ),
        ),
        _ => return None,
    };

    Some(ValidationMessage {
        status,
        object_type: child.object_type(),
        name: child.display_name().to_string(),
        message,
    })
}

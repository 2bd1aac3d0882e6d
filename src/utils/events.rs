use tokio::sync::mpsc;

use crate::{compare::ValidationMessage, errors::Side};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonEvent {
    Progress(String),
    Validation(ValidationMessage),
    /// A connection needs credentials the schema source could not supply.
    PasswordPromptNeeded { connection: String, side: Side },
}

/// One-way event emission. Sending is a no-op when nobody subscribed, and a
/// dropped receiver is ignored.
#[derive(Debug, Clone, Default)]
pub struct EventReporter(Option<mpsc::UnboundedSender<ComparisonEvent>>);

impl EventReporter {
    pub fn new(tx: Option<mpsc::UnboundedSender<ComparisonEvent>>) -> Self {
        Self(tx)
    }

    pub fn disabled() -> Self {
        Self(None)
    }

    pub fn report(&self, event: ComparisonEvent) {
        if let Some(tx) = &self.0 {
            let _ = tx.send(event);
        }
    }

    pub fn progress(&self, message: impl Into<String>) {
        self.report(ComparisonEvent::Progress(message.into()));
    }
}

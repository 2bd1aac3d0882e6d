use serde::Serialize;

use crate::{
    errors::CompareError,
    types::{ComparisonObjectStatus, ComparisonObjectType, SchemaItem, UpdateAction},
};

/// One schema entity observed on the source side, the target side, or both.
///
/// Absent sides are represented by empty strings so identity lookups compare
/// consistently. Identity fields are fixed at construction; only the update
/// action changes during a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonObject {
    object_type: ComparisonObjectType,
    source_object_name: String,
    source_object_internal_name: String,
    source_object_definition: String,
    target_object_name: String,
    target_object_internal_name: String,
    target_object_definition: String,
    status: ComparisonObjectStatus,
    update_action: UpdateAction,
    children: Vec<ComparisonObject>,
}

impl ComparisonObject {
    /// Pairs the two sides. The caller decides the status; the action starts at
    /// the status default.
    pub fn new<S: SchemaItem + ?Sized, T: SchemaItem + ?Sized>(
        object_type: ComparisonObjectType,
        source: Option<&S>,
        target: Option<&T>,
        status: ComparisonObjectStatus,
    ) -> Self {
        let (source_object_name, source_object_internal_name, source_object_definition) =
            side_fields(source);
        let (target_object_name, target_object_internal_name, target_object_definition) =
            side_fields(target);

        Self {
            object_type,
            source_object_name,
            source_object_internal_name,
            source_object_definition,
            target_object_name,
            target_object_internal_name,
            target_object_definition,
            status,
            update_action: UpdateAction::default_for(status),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<ComparisonObject>) -> Self {
        self.children = children;
        self
    }

    pub fn object_type(&self) -> ComparisonObjectType {
        self.object_type
    }

    pub fn source_object_name(&self) -> &str {
        &self.source_object_name
    }

    pub fn source_object_internal_name(&self) -> &str {
        &self.source_object_internal_name
    }

    pub fn source_object_definition(&self) -> &str {
        &self.source_object_definition
    }

    pub fn target_object_name(&self) -> &str {
        &self.target_object_name
    }

    pub fn target_object_internal_name(&self) -> &str {
        &self.target_object_internal_name
    }

    pub fn target_object_definition(&self) -> &str {
        &self.target_object_definition
    }

    pub fn status(&self) -> ComparisonObjectStatus {
        self.status
    }

    pub fn update_action(&self) -> UpdateAction {
        self.update_action
    }

    pub fn children(&self) -> &[ComparisonObject] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [ComparisonObject] {
        &mut self.children
    }

    /// Name shown for the node: the source name when present, else the target name.
    pub fn display_name(&self) -> &str {
        if self.source_object_name.is_empty() {
            &self.target_object_name
        } else {
            &self.source_object_name
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.update_action == UpdateAction::Skip
    }

    /// Moves the node to `action` if its status allows it.
    pub fn set_update_action(&mut self, action: UpdateAction) -> Result<(), CompareError> {
        if !action.is_allowed_for(self.status) {
            return Err(CompareError::IllegalUpdateAction {
                object_type: self.object_type,
                name: self.display_name().to_string(),
                status: self.status,
                action,
            });
        }
        self.update_action = action;
        Ok(())
    }

    pub fn skip(&mut self) -> Result<(), CompareError> {
        self.set_update_action(UpdateAction::Skip)
    }

    /// Restores the status default action.
    pub fn unskip(&mut self) {
        self.update_action = UpdateAction::default_for(self.status);
    }

    /// Checks that the side fields agree with the status, for this node and
    /// every descendant.
    pub fn check_invariants(&self) -> Result<(), CompareError> {
        let has_source = !self.source_object_internal_name.is_empty();
        let has_target = !self.target_object_internal_name.is_empty();

        let reason = match self.status {
            ComparisonObjectStatus::SameDefinition | ComparisonObjectStatus::DifferentDefinitions
                if !(has_source && has_target) =>
            {
                Some("matched status without both sides present")
            }
            ComparisonObjectStatus::MissingInSource if has_source => {
                Some("missing in source but source side is populated")
            }
            ComparisonObjectStatus::MissingInSource if !has_target => {
                Some("missing in source but target side is empty")
            }
            ComparisonObjectStatus::MissingInTarget if has_target => {
                Some("missing in target but target side is populated")
            }
            ComparisonObjectStatus::MissingInTarget if !has_source => {
                Some("missing in target but source side is empty")
            }
            _ => None,
        };

        if let Some(reason) = reason {
            return Err(CompareError::InvariantViolation {
                object_type: self.object_type,
                name: self.display_name().to_string(),
                reason: reason.to_string(),
            });
        }

        if !self.update_action.is_allowed_for(self.status) {
            return Err(CompareError::InvariantViolation {
                object_type: self.object_type,
                name: self.display_name().to_string(),
                reason: format!("action {} held with status {}", self.update_action, self.status),
            });
        }

        self.children.iter().try_for_each(|c| c.check_invariants())
    }
}

fn side_fields<I: SchemaItem + ?Sized>(item: Option<&I>) -> (String, String, String) {
    match item {
        Some(item) => (
            item.name().to_string(),
            item.internal_name().to_string(),
            item.definition().unwrap_or_default().to_string(),
        ),
        None => (String::new(), String::new(), String::new()),
    }
}

/// Depth-first, pre-order iterator over a forest.
pub struct Walk<'a> {
    stack: Vec<&'a ComparisonObject>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a ComparisonObject;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

pub fn walk(forest: &[ComparisonObject]) -> Walk<'_> {
    Walk {
        stack: forest.iter().rev().collect(),
    }
}

/// Visits every node of the forest depth-first, pre-order, with mutable access.
pub fn walk_mut<F>(forest: &mut [ComparisonObject], visit: &mut F)
where
    F: FnMut(&mut ComparisonObject),
{
    for node in forest.iter_mut() {
        visit(node);
        walk_mut(&mut node.children, visit);
    }
}

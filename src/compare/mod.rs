pub mod comparator;
pub mod comparison;
pub mod comparison_object;
pub mod lookup;
pub mod matcher;
pub mod report;
pub mod skip_selection;
pub mod validation;

pub use comparator::{
    DefinitionCompareMode, DefinitionComparator, DefinitionComparators, ExactComparator,
    JsonComparator, WhitespaceInsensitiveComparator,
};
pub use comparison::Comparison;
pub use comparison_object::{ComparisonObject, walk, walk_mut};
pub use lookup::{ObjectIdentity, find_comparison_object, find_comparison_object_mut};
pub use matcher::{build_forest, match_objects};
pub use report::{ComparisonSummary, PlannedChange, ReportRow, flatten, planned_changes, summarize};
pub use skip_selection::{SkipSelection, SkipSelections};
pub use validation::{ValidationMessage, ValidationStatus, validate_selection};

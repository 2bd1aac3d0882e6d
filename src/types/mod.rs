mod comparison_object_status;
mod comparison_object_type;
mod schema;
mod update_action;

pub use comparison_object_status::ComparisonObjectStatus;
pub use comparison_object_type::ComparisonObjectType;
pub use schema::{ModelSchema, SchemaItem, SchemaObject, TableSchema};
pub use update_action::UpdateAction;

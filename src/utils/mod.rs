pub mod events;
pub mod fs;
pub mod logger;
pub mod serde;

pub use events::{ComparisonEvent, EventReporter};
pub use fs::validate_file;

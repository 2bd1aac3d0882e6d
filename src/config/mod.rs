pub mod compare;
pub mod log;
pub mod settings;

pub use compare::CompareConfig;
pub use log::LogConfig;
pub use settings::Settings;

pub mod comparison_service;

pub use comparison_service::ComparisonService;

use crate::config::Settings;

pub struct AppServices {
    pub comparison_service: ComparisonService,
}

impl AppServices {
    pub fn new(settings: &Settings) -> Self {
        Self {
            comparison_service: ComparisonService::new(settings.clone()),
        }
    }
}

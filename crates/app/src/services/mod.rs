mod statistics;

use std::sync::Arc;

use crate::app::AppConfig;

pub use statistics::StatisticsService;

type SharedConfig = Arc<AppConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub statistics: StatisticsService,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Self {
        let shared = Arc::new(config.clone());
        Self {
            statistics: StatisticsService::new(shared),
        }
    }
}

use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;
use crate::services::AppServices;
use telemetry_db::{DEFAULT_BUSY_TIMEOUT, Db};

/// Storage settings shared by every service.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub busy_timeout: Duration,
}

impl AppConfig {
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            db_path,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    pub fn open_db(&self) -> Result<Db> {
        Ok(Db::open_with_timeout(&self.db_path, self.busy_timeout)?)
    }
}

/// Application state handed to the HTTP layer.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let services = AppServices::new(&config);
        Self { config, services }
    }

    pub fn is_fresh_db(&self) -> bool {
        !self.config.db_path.exists()
    }

    /// Opens the database and applies pending migrations. Returns the names
    /// of the migrations that ran.
    pub fn setup_db(&self) -> Result<Vec<&'static str>> {
        let mut db = self.config.open_db()?;
        Ok(db.migrate()?)
    }
}

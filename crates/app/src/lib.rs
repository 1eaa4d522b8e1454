pub mod app;
pub mod config;
pub mod error;
pub mod services;
pub mod startup;
pub mod util;

pub use app::{AppConfig, AppState};
pub use config::WindowParams;
pub use error::{ApiError, AppError, Result};
pub use services::{AppServices, StatisticsService};
pub use startup::{AppPaths, ensure_app_data_dir};
pub use util::time::{DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS, resolve_window, today_utc};

use std::path::PathBuf;
use std::time::Duration;

use app_api::AppContext;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct HttpState {
    pub context: AppContext,
    pub static_dir: PathBuf,
    pub request_timeout: Duration,
}

impl HttpState {
    pub fn new(context: AppContext, static_dir: PathBuf) -> Self {
        Self {
            context,
            static_dir,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

/// Serves the dashboard directory; unknown paths get `index.html`.
pub fn static_files(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}

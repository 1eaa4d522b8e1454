use std::path::PathBuf;

use crate::Result;

const DB_FILE_NAME: &str = "statistics.sqlite";

#[derive(Clone, Debug)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
}

impl AppPaths {
    pub fn new(data_dir: PathBuf) -> Self {
        let db_path = data_dir.join(DB_FILE_NAME);
        Self { data_dir, db_path }
    }
}

pub fn ensure_app_data_dir(paths: &AppPaths) -> Result<()> {
    std::fs::create_dir_all(&paths.data_dir)?;
    Ok(())
}

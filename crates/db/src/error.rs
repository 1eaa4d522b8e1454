use std::fmt;

/// Step of a statistics write that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePhase {
    LatestState,
    DailyStats,
    Commit,
}

impl fmt::Display for WritePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::LatestState => "latest-state",
            Self::DailyStats => "daily-stats",
            Self::Commit => "commit",
        };
        f.write_str(label)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("{phase} write failed: {source}")]
    Write {
        phase: WritePhase,
        #[source]
        source: rusqlite::Error,
    },
    #[error("database schema version {found} is newer than supported version {supported}")]
    UnsupportedSchema { found: u32, supported: u32 },
}

impl DbError {
    pub(crate) fn write(phase: WritePhase) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::Write { phase, source }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;

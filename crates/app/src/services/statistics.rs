use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::{AppError, Result};
use crate::services::SharedConfig;
use crate::util::time::today_utc;
use telemetry_core::{DailyRollup, DeviceStatisticsRecord, StatisticsOverview, StatisticsReport};
use telemetry_db::{Db, DbError, WritePhase};

const SAVE_FAILED: &str = "Failed to save statistics";
const FETCH_FAILED: &str = "Failed to fetch statistics";
const FETCH_DEVICE_FAILED: &str = "Failed to fetch device statistics";
const FETCH_DAILY_FAILED: &str = "Failed to fetch daily statistics";
const DEVICE_NOT_FOUND: &str = "No statistics found for device";

#[derive(Clone)]
pub struct StatisticsService {
    config: SharedConfig,
}

impl StatisticsService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self, message: &'static str) -> Result<Db> {
        self.config.open_db().map_err(|err| match err {
            AppError::Db(source) => AppError::Storage { message, source },
            other => other,
        })
    }

    /// Normalizes a client payload and stores it.
    pub fn ingest(&self, payload: &Value) -> Result<DeviceStatisticsRecord> {
        let report = ingest::normalize_payload(payload);
        self.record(&report)
    }

    /// Raw request body variant of [`Self::ingest`]; unparseable bodies are
    /// stored as an all-default report.
    pub fn ingest_body(&self, body: &[u8]) -> Result<DeviceStatisticsRecord> {
        let report = ingest::normalize_body(body);
        self.record(&report)
    }

    pub fn record(&self, report: &StatisticsReport) -> Result<DeviceStatisticsRecord> {
        let mut db = self.db(SAVE_FAILED)?;
        match db.record_statistics(report) {
            Ok(record) => {
                debug!(device_id = %record.device_id, date = %record.date, "statistics recorded");
                Ok(record)
            }
            Err(err) => {
                if let DbError::Write {
                    phase: WritePhase::DailyStats,
                    ..
                } = &err
                {
                    error!(
                        device_id = %report.device_id,
                        error = %err,
                        "daily stats write failed; rolled back latest-state write"
                    );
                }
                Err(AppError::storage(SAVE_FAILED)(err))
            }
        }
    }

    pub fn overview(&self) -> Result<StatisticsOverview> {
        let mut db = self.db(FETCH_FAILED)?;
        db.statistics_overview()
            .map_err(AppError::storage(FETCH_FAILED))
    }

    pub fn device(&self, device_id: &str) -> Result<DeviceStatisticsRecord> {
        let db = self.db(FETCH_DEVICE_FAILED)?;
        db.device_statistics(device_id)
            .map_err(AppError::storage(FETCH_DEVICE_FAILED))?
            .ok_or_else(|| AppError::NotFound(DEVICE_NOT_FOUND.to_string()))
    }

    pub fn daily_rollup(&self, days: u32) -> Result<Vec<DailyRollup>> {
        self.daily_rollup_at(days, today_utc())
    }

    pub fn daily_rollup_at(&self, days: u32, today: NaiveDate) -> Result<Vec<DailyRollup>> {
        let db = self.db(FETCH_DAILY_FAILED)?;
        db.daily_rollup(days, today)
            .map_err(AppError::storage(FETCH_DAILY_FAILED))
    }
}

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Transaction, TransactionBehavior, params};
use telemetry_core::{DailyStatEntry, DeviceStatisticsRecord, StatisticsReport};

use crate::Db;
use crate::error::{DbError, Result, WritePhase};
use crate::helpers::{DEVICE_COLUMNS, day_key, row_to_daily_entry, row_to_device_record};

impl Db {
    pub fn record_statistics(&mut self, report: &StatisticsReport) -> Result<DeviceStatisticsRecord> {
        self.record_statistics_at(report, Utc::now())
    }

    /// Replaces the device's latest-state row and its entry for the current
    /// day as one transaction. `now` stamps `last_updated` and picks the day;
    /// nothing is kept from earlier reports.
    pub fn record_statistics_at(
        &mut self,
        report: &StatisticsReport,
        now: DateTime<Utc>,
    ) -> Result<DeviceStatisticsRecord> {
        let last_updated = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        let date = day_key(now.date_naive());

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let record = upsert_latest_state(&tx, report, &last_updated, &date)
            .map_err(DbError::write(WritePhase::LatestState))?;
        upsert_daily_stats(&tx, report, &date).map_err(DbError::write(WritePhase::DailyStats))?;
        tx.commit().map_err(DbError::write(WritePhase::Commit))?;
        Ok(record)
    }

    pub fn daily_entries(&self, device_id: &str) -> Result<Vec<DailyStatEntry>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT device_id, date,
                   COALESCE(recording_time, 0.0), COALESCE(sessions, 0),
                   COALESCE(app_usage_time, 0.0), COALESCE(photos, 0)
            FROM daily_stats
            WHERE device_id = ?1
            ORDER BY date DESC
            "#,
        )?;
        let rows = stmt.query_map(params![device_id], row_to_daily_entry)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}

fn upsert_latest_state(
    tx: &Transaction<'_>,
    report: &StatisticsReport,
    last_updated: &str,
    date: &str,
) -> std::result::Result<DeviceStatisticsRecord, rusqlite::Error> {
    let sql = format!(
        r#"
        INSERT INTO statistics (
          device_id, total_recording_time, total_sessions, daily_recording_time,
          daily_sessions, app_usage_time, total_photos, daily_photos, total_devices,
          device_model, device_name, last_updated, date
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
        ON CONFLICT(device_id) DO UPDATE SET
          total_recording_time = excluded.total_recording_time,
          total_sessions = excluded.total_sessions,
          daily_recording_time = excluded.daily_recording_time,
          daily_sessions = excluded.daily_sessions,
          app_usage_time = excluded.app_usage_time,
          total_photos = excluded.total_photos,
          daily_photos = excluded.daily_photos,
          total_devices = excluded.total_devices,
          device_model = excluded.device_model,
          device_name = excluded.device_name,
          last_updated = excluded.last_updated,
          date = excluded.date
        RETURNING {}
        "#,
        DEVICE_COLUMNS
    );
    tx.query_row(
        &sql,
        params![
            report.device_id,
            report.total_recording_time,
            report.total_sessions,
            report.daily_recording_time,
            report.daily_sessions,
            report.app_usage_time,
            report.total_photos,
            report.daily_photos,
            report.total_devices,
            report.device_model,
            report.device_name,
            last_updated,
            date,
        ],
        row_to_device_record,
    )
}

fn upsert_daily_stats(
    tx: &Transaction<'_>,
    report: &StatisticsReport,
    date: &str,
) -> std::result::Result<usize, rusqlite::Error> {
    tx.execute(
        r#"
        INSERT INTO daily_stats (device_id, date, recording_time, sessions, app_usage_time, photos)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ON CONFLICT(device_id, date) DO UPDATE SET
          recording_time = excluded.recording_time,
          sessions = excluded.sessions,
          app_usage_time = excluded.app_usage_time,
          photos = excluded.photos
        "#,
        params![
            report.device_id,
            date,
            report.daily_recording_time,
            report.daily_sessions,
            report.app_usage_time,
            report.daily_photos,
        ],
    )
}

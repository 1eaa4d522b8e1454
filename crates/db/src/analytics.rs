use chrono::{Days, NaiveDate};
use rusqlite::{OptionalExtension, params};
use telemetry_core::{DailyRollup, DeviceStatisticsRecord, GlobalAggregate, StatisticsOverview};

use crate::Db;
use crate::error::Result;
use crate::helpers::{
    DEVICE_COLUMNS, LATEST_PER_DEVICE, day_key, row_to_daily_rollup, row_to_device_record,
};

impl Db {
    /// Global aggregate plus every device's latest row, newest first.
    ///
    /// Both queries share one read transaction so the aggregate always
    /// describes exactly the listed devices.
    pub fn statistics_overview(&mut self) -> Result<StatisticsOverview> {
        let tx = self.conn.transaction()?;
        let aggregate = tx.query_row(
            &format!(
                r#"
                WITH latest AS ({})
                SELECT
                  COUNT(*),
                  COALESCE(SUM(total_recording_time), 0.0),
                  COALESCE(SUM(total_photos), 0),
                  MAX(last_updated)
                FROM latest
                "#,
                LATEST_PER_DEVICE
            ),
            [],
            |row| {
                Ok(GlobalAggregate {
                    device_count: row.get::<_, i64>(0)?.max(0) as u64,
                    total_recording_time: row.get(1)?,
                    total_photos: row.get(2)?,
                    last_updated: row.get(3)?,
                })
            },
        )?;
        let devices = {
            let mut stmt = tx.prepare(&format!(
                r#"
                WITH latest AS ({})
                SELECT {}
                FROM latest
                ORDER BY last_updated DESC, id DESC
                "#,
                LATEST_PER_DEVICE, DEVICE_COLUMNS
            ))?;
            let rows = stmt.query_map([], row_to_device_record)?;
            rows.collect::<std::result::Result<Vec<_>, _>>()?
        };
        tx.commit()?;
        Ok(StatisticsOverview { aggregate, devices })
    }

    pub fn device_statistics(&self, device_id: &str) -> Result<Option<DeviceStatisticsRecord>> {
        let record = self
            .conn
            .query_row(
                &format!(
                    r#"
                    SELECT {}
                    FROM statistics
                    WHERE device_id = ?1
                    ORDER BY last_updated DESC, id DESC
                    LIMIT 1
                    "#,
                    DEVICE_COLUMNS
                ),
                params![device_id],
                row_to_device_record,
            )
            .optional()?;
        Ok(record)
    }

    /// Per-date totals across all devices for `today` and the `days` days
    /// before it, newest first. Dates nobody reported on are omitted.
    pub fn daily_rollup(&self, days: u32, today: NaiveDate) -> Result<Vec<DailyRollup>> {
        let cutoff = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        let mut stmt = self.conn.prepare(
            r#"
            SELECT
              date,
              COALESCE(SUM(recording_time), 0.0),
              COALESCE(SUM(sessions), 0),
              COALESCE(SUM(app_usage_time), 0.0),
              COALESCE(SUM(photos), 0)
            FROM daily_stats
            WHERE date >= ?1
            GROUP BY date
            ORDER BY date DESC
            "#,
        )?;
        let rows = stmt.query_map(params![day_key(cutoff)], row_to_daily_rollup)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}

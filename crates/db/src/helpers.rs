use chrono::NaiveDate;
use rusqlite::Row;
use telemetry_core::{DailyRollup, DailyStatEntry, DeviceStatisticsRecord};

/// Column list matching [`row_to_device_record`]; legacy rows may hold NULLs.
pub(crate) const DEVICE_COLUMNS: &str = r#"
    id,
    device_id,
    COALESCE(total_recording_time, 0.0),
    COALESCE(total_sessions, 0),
    COALESCE(daily_recording_time, 0.0),
    COALESCE(daily_sessions, 0),
    COALESCE(app_usage_time, 0.0),
    COALESCE(total_photos, 0),
    COALESCE(daily_photos, 0),
    COALESCE(total_devices, 1),
    COALESCE(device_model, ''),
    COALESCE(device_name, ''),
    COALESCE(last_updated, ''),
    COALESCE(date, '')
"#;

/// Latest row per device; equal timestamps resolve to the highest id.
pub(crate) const LATEST_PER_DEVICE: &str = r#"
    SELECT *
    FROM (
      SELECT
        statistics.*,
        ROW_NUMBER() OVER (
          PARTITION BY device_id
          ORDER BY last_updated DESC, id DESC
        ) AS row_rank
      FROM statistics
    )
    WHERE row_rank = 1
"#;

pub(crate) fn row_to_device_record(
    row: &Row<'_>,
) -> std::result::Result<DeviceStatisticsRecord, rusqlite::Error> {
    Ok(DeviceStatisticsRecord {
        id: row.get(0)?,
        device_id: row.get(1)?,
        total_recording_time: row.get(2)?,
        total_sessions: row.get(3)?,
        daily_recording_time: row.get(4)?,
        daily_sessions: row.get(5)?,
        app_usage_time: row.get(6)?,
        total_photos: row.get(7)?,
        daily_photos: row.get(8)?,
        total_devices: row.get(9)?,
        device_model: row.get(10)?,
        device_name: row.get(11)?,
        last_updated: row.get(12)?,
        date: row.get(13)?,
    })
}

pub(crate) fn row_to_daily_entry(
    row: &Row<'_>,
) -> std::result::Result<DailyStatEntry, rusqlite::Error> {
    Ok(DailyStatEntry {
        device_id: row.get(0)?,
        date: row.get(1)?,
        recording_time: row.get(2)?,
        sessions: row.get(3)?,
        app_usage_time: row.get(4)?,
        photos: row.get(5)?,
    })
}

pub(crate) fn row_to_daily_rollup(
    row: &Row<'_>,
) -> std::result::Result<DailyRollup, rusqlite::Error> {
    Ok(DailyRollup {
        date: row.get(0)?,
        total_recording_time: row.get(1)?,
        total_sessions: row.get(2)?,
        total_app_usage: row.get(3)?,
        total_photos: row.get(4)?,
    })
}

pub(crate) fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

mod support;

use rusqlite::Connection;
use support::{at, make_report};
use telemetry_db::{Db, DbError, SCHEMA_VERSION};

fn seed_legacy(db_path: &std::path::Path, sql: &str) {
    let conn = Connection::open(db_path).expect("open conn");
    conn.execute_batch(include_str!("../migrations/0001_init.sql"))
        .expect("create tables");
    conn.execute_batch(sql).expect("seed legacy rows");
}

#[test]
fn fresh_database_reaches_current_version() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut db = Db::open(dir.path().join("fresh.sqlite")).expect("open db");

    let applied = db.migrate().expect("migrate");

    assert_eq!(
        applied,
        vec!["0001_init", "0002_device_details", "0003_unique_device"]
    );
    assert_eq!(db.schema_version().expect("version"), SCHEMA_VERSION);
}

#[test]
fn migrate_is_a_no_op_when_current() {
    let mut db = Db::open_in_memory().expect("open db");
    db.migrate().expect("first migrate");

    let applied = db.migrate().expect("second migrate");

    assert!(applied.is_empty());
    assert_eq!(db.schema_version().expect("version"), SCHEMA_VERSION);
}

#[test]
fn migrate_adopts_unversioned_database_with_duplicates() {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("legacy.sqlite");
    {
        let conn = Connection::open(&db_path).expect("open conn");
        conn.execute_batch(include_str!("../migrations/0001_init.sql"))
            .expect("create tables");
        // Columns added ad hoc by older servers.
        conn.execute_batch(
            r#"
            ALTER TABLE statistics ADD COLUMN total_photos INTEGER DEFAULT 0;
            ALTER TABLE statistics ADD COLUMN device_model TEXT DEFAULT '';
            INSERT INTO statistics (device_id, total_recording_time, total_photos, last_updated, date)
            VALUES ('phone', 10.0, 1, '2025-03-01 08:00:00', '2025-03-01');
            INSERT INTO statistics (device_id, total_recording_time, total_photos, last_updated, date)
            VALUES ('phone', 40.0, 4, '2025-03-02 08:00:00', '2025-03-02');
            INSERT INTO statistics (device_id, total_recording_time, total_photos, last_updated, date)
            VALUES ('phone', 20.0, 2, '2025-03-01 12:00:00', '2025-03-01');
            INSERT INTO statistics (device_id, total_recording_time, last_updated, date)
            VALUES ('tablet', 5.0, '2025-03-01 09:00:00', '2025-03-01');
            "#,
        )
        .expect("seed legacy rows");
    }

    let mut db = Db::open(&db_path).expect("open db");
    db.migrate().expect("migrate");

    assert_eq!(db.schema_version().expect("version"), SCHEMA_VERSION);
    let phone = db
        .device_statistics("phone")
        .expect("lookup")
        .expect("phone row");
    assert_eq!(phone.total_recording_time, 40.0);
    assert_eq!(phone.total_photos, 4);
    assert_eq!(phone.total_devices, 1);
    assert_eq!(phone.device_name, "");

    let conn = Connection::open(&db_path).expect("open conn");
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM statistics", [], |row| row.get(0))
        .expect("count rows");
    assert_eq!(rows, 2);
    let photos_column: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info('daily_stats') WHERE name = 'photos'",
            [],
            |row| row.get(0),
        )
        .expect("photos column");
    assert_eq!(photos_column, 1);
}

#[test]
fn migrate_zeroes_non_numeric_legacy_values() {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("legacy.sqlite");
    seed_legacy(
        &db_path,
        r#"
        INSERT INTO statistics (device_id, total_recording_time, total_sessions, app_usage_time, last_updated, date)
        VALUES ('broken', 'abc', 2.7, 'NaN?', '2025-03-01 08:00:00', '2025-03-01');
        INSERT INTO statistics (device_id, total_recording_time, total_sessions, last_updated, date)
        VALUES ('healthy', 30.0, 3, '2025-03-01 09:00:00', '2025-03-01');
        INSERT INTO daily_stats (device_id, date, recording_time, sessions)
        VALUES ('broken', '2025-03-01', 'abc', 'x');
        INSERT INTO daily_stats (device_id, date, recording_time, sessions)
        VALUES ('healthy', '2025-03-01', 12.0, 1);
        "#,
    );

    let mut db = Db::open(&db_path).expect("open db");
    db.migrate().expect("migrate");

    let overview = db.statistics_overview().expect("overview");
    assert_eq!(overview.aggregate.device_count, 2);
    assert_eq!(overview.aggregate.total_recording_time, 30.0);
    let broken = overview.device("broken").expect("broken device");
    assert_eq!(broken.total_recording_time, 0.0);
    assert_eq!(broken.total_sessions, 2);
    assert_eq!(broken.app_usage_time, 0.0);

    let rollup = db
        .daily_rollup(3650, support::day(2025, 3, 2))
        .expect("rollup");
    assert_eq!(rollup.len(), 1);
    assert_eq!(rollup[0].total_recording_time, 12.0);
    assert_eq!(rollup[0].total_sessions, 1);
}

#[test]
fn migrated_timestamps_order_with_new_reports() {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("legacy.sqlite");
    seed_legacy(
        &db_path,
        r#"
        INSERT INTO statistics (device_id, total_recording_time, last_updated, date)
        VALUES ('legacy', 10.0, '2025-03-10 12:00:00', '2025-03-10');
        "#,
    );

    let mut db = Db::open(&db_path).expect("open db");
    db.migrate().expect("migrate");
    db.record_statistics_at(&make_report("fresh"), at(2025, 3, 10, 9))
        .expect("record");

    let overview = db.statistics_overview().expect("overview");
    let order: Vec<&str> = overview
        .devices
        .iter()
        .map(|record| record.device_id.as_str())
        .collect();
    assert_eq!(order, vec!["legacy", "fresh"]);
    assert_eq!(overview.devices[0].last_updated, "2025-03-10T12:00:00.000Z");
    assert_eq!(
        overview.aggregate.last_updated.as_deref(),
        Some("2025-03-10T12:00:00.000Z")
    );
}

#[test]
fn newer_schema_is_refused() {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("future.sqlite");
    {
        let conn = Connection::open(&db_path).expect("open conn");
        conn.pragma_update(None, "user_version", SCHEMA_VERSION + 1)
            .expect("set version");
    }

    let mut db = Db::open(&db_path).expect("open db");
    let err = db.migrate().expect_err("newer schema");

    assert!(matches!(
        err,
        DbError::UnsupportedSchema { found, supported }
            if found == SCHEMA_VERSION + 1 && supported == SCHEMA_VERSION
    ));
}

use rusqlite::Connection;

use crate::Db;
use crate::error::{DbError, Result};

const MIGRATION_0001: &str = include_str!("../migrations/0001_init.sql");
const MIGRATION_0003: &str = include_str!("../migrations/0003_unique_device.sql");

/// Schema version written by the newest migration.
pub const SCHEMA_VERSION: u32 = 3;

struct Migration {
    version: u32,
    name: &'static str,
    apply: fn(&Connection) -> Result<()>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "0001_init",
        apply: create_tables,
    },
    Migration {
        version: 2,
        name: "0002_device_details",
        apply: add_device_details,
    },
    Migration {
        version: 3,
        name: "0003_unique_device",
        apply: collapse_duplicate_devices,
    },
];

/// Columns added by `0002_device_details`: (table, column, definition).
const DEVICE_DETAIL_COLUMNS: &[(&str, &str, &str)] = &[
    ("statistics", "total_photos", "INTEGER DEFAULT 0"),
    ("statistics", "daily_photos", "INTEGER DEFAULT 0"),
    ("statistics", "total_devices", "INTEGER DEFAULT 1"),
    ("statistics", "device_model", "TEXT DEFAULT ''"),
    ("statistics", "device_name", "TEXT DEFAULT ''"),
    ("daily_stats", "photos", "INTEGER DEFAULT 0"),
];

impl Db {
    pub fn schema_version(&self) -> Result<u32> {
        Ok(self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?)
    }

    /// Applies every migration newer than the stored `user_version`, in order,
    /// inside one transaction. Returns the names of the applied migrations.
    pub fn migrate(&mut self) -> Result<Vec<&'static str>> {
        let current = self.schema_version()?;
        if current > SCHEMA_VERSION {
            return Err(DbError::UnsupportedSchema {
                found: current,
                supported: SCHEMA_VERSION,
            });
        }
        let tx = self.conn.transaction()?;
        let mut applied = Vec::new();
        for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
            (migration.apply)(&tx)?;
            tx.pragma_update(None, "user_version", migration.version)?;
            applied.push(migration.name);
        }
        tx.commit()?;
        Ok(applied)
    }
}

fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(MIGRATION_0001)?;
    Ok(())
}

// Databases written before versioning may already carry some of these.
fn add_device_details(conn: &Connection) -> Result<()> {
    for (table, column, definition) in DEVICE_DETAIL_COLUMNS {
        if !table_has_column(conn, table, column)? {
            conn.execute(
                &format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, definition),
                [],
            )?;
        }
    }
    Ok(())
}

fn collapse_duplicate_devices(conn: &Connection) -> Result<()> {
    conn.execute_batch(MIGRATION_0003)?;
    Ok(())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

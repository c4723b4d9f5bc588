//! Schema migration registry for the schemes database.
//!
//! # Invariants
//! - Registry versions are strictly increasing.
//! - The installed version is mirrored to `PRAGMA user_version`.
//! - Pending migrations apply inside a single transaction.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: [Migration; 2] = [
    Migration {
        version: 1,
        name: "schemes",
        sql: include_str!("0001_schemes.sql"),
    },
    Migration {
        version: 2,
        name: "steps",
        sql: include_str!("0002_steps.sql"),
    },
];

/// Latest schema version this binary knows how to produce.
pub fn latest_version() -> u32 {
    MIGRATIONS[MIGRATIONS.len() - 1].version
}

/// Brings the connection's schema up to [`latest_version`].
///
/// A database already ahead of this binary is rejected, never modified.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let installed = installed_version(conn)?;
    let latest = latest_version();

    if installed > latest {
        return Err(DbError::SchemaTooNew {
            found: installed,
            supported: latest,
        });
    }

    let pending: Vec<&Migration> = MIGRATIONS
        .iter()
        .filter(|migration| migration.version > installed)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in &pending {
        tx.execute_batch(migration.sql)?;
        info!(
            "event=db_migrate module=db status=ok version={} name={}",
            migration.version, migration.name
        );
    }
    tx.pragma_update(None, "user_version", latest)?;
    tx.commit()?;

    Ok(())
}

fn installed_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

//! Store bootstrap for file and in-memory databases.
//!
//! # Invariants
//! - Returned stores have connection pragmas applied per [`StoreOptions`].
//! - Returned stores have the schema fully initialized.

use super::migrations::initialize_schema;
use super::{DbResult, Store, StoreOptions};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::Instant;

/// Opens (or creates) a database file with default options.
///
/// # Side effects
/// - Creates the file when it does not exist yet.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Store> {
    open_db_with(path, StoreOptions::default())
}

/// Opens (or creates) a database file with explicit connection options.
pub fn open_db_with(path: impl AsRef<Path>, options: StoreOptions) -> DbResult<Store> {
    open_logged("file", options, || Connection::open(path))
}

/// Opens a private in-memory database with default options.
pub fn open_db_in_memory() -> DbResult<Store> {
    open_db_in_memory_with(StoreOptions::default())
}

/// Opens a private in-memory database with explicit connection options.
pub fn open_db_in_memory_with(options: StoreOptions) -> DbResult<Store> {
    open_logged("memory", options, Connection::open_in_memory)
}

fn open_logged(
    mode: &'static str,
    options: StoreOptions,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Store> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match connect() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn, options) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} foreign_keys={} duration_ms={}",
                options.enforce_foreign_keys,
                started_at.elapsed().as_millis()
            );
            Ok(Store::from_connection(conn))
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection, options: StoreOptions) -> DbResult<()> {
    let pragma = if options.enforce_foreign_keys {
        "PRAGMA foreign_keys = ON;"
    } else {
        "PRAGMA foreign_keys = OFF;"
    };
    conn.execute_batch(pragma)?;
    conn.busy_timeout(options.busy_timeout)?;
    initialize_schema(conn)?;
    Ok(())
}

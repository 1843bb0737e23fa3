//! SQLite storage bootstrap, schema initialization and statement execution.
//!
//! # Responsibility
//! - Open and configure the single SQLite connection owned by [`Store`].
//! - Create the `groups`/`todos` schema idempotently on every startup.
//! - Provide the one generic execution path all reads and writes pass through.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - No application data is read or written before schema initialization succeeds.
//! - Every statement runs in its own transaction; failures roll back fully.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub mod migrations;
mod open;
pub mod statements;
mod store;

pub use open::{open_db, open_db_in_memory, open_db_in_memory_with, open_db_with};
pub use rusqlite::types::Value;
pub use store::{QueryResult, Store, StoreRow};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// A previous holder of the connection lock panicked mid-statement.
    ConnectionPoisoned,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::ConnectionPoisoned => write!(f, "database connection lock is poisoned"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::ConnectionPoisoned => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Connection options applied when a store is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Turns on `PRAGMA foreign_keys`, so tasks naming a missing category are
    /// rejected by SQLite instead of stored as orphans.
    pub enforce_foreign_keys: bool,
    pub busy_timeout: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            enforce_foreign_keys: true,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

//! Single-connection store and its statement execution contract.
//!
//! # Responsibility
//! - Own the process-wide SQLite connection for its whole lifetime.
//! - Run any one statement as a self-contained transaction.
//! - Materialize result rows so callers never hold connection borrows.
//!
//! # Invariants
//! - At most one transaction is prepared at a time (connection mutex).
//! - A failed statement leaves no partial writes behind.
//! - `last_insert_id` is only reported for `INSERT` statements that wrote a row.

use super::migrations::initialize_schema;
use super::{DbError, DbResult};
use log::{debug, warn};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

/// One materialized result row, keeping column order.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRow {
    values: Vec<(String, Value)>,
}

impl StoreRow {
    /// Returns the raw value of `column`, or `None` when no such column exists.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Returns the integer stored in `column`, `None` for NULL or other types.
    pub fn get_i64(&self, column: &str) -> Option<i64> {
        match self.get(column) {
            Some(Value::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    /// Returns the text stored in `column`, `None` for NULL or other types.
    pub fn get_text(&self, column: &str) -> Option<&str> {
        match self.get(column) {
            Some(Value::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(name, _)| name.as_str())
    }
}

/// Outcome of one successful [`Store::execute`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    /// Rows in the order SQLite produced them; empty for write statements.
    pub rows: Vec<StoreRow>,
    /// Rows changed by a write statement; `0` for reads.
    pub rows_affected: usize,
    /// Rowid assigned by an `INSERT` that wrote a row.
    pub last_insert_id: Option<i64>,
}

/// Durable storage for categories and tasks.
///
/// Open one per process with [`super::open_db`] and pass it by reference to
/// repositories and views.
#[derive(Debug)]
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    pub(crate) fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Re-runs idempotent schema initialization on the owned connection.
    pub fn initialize_schema(&self) -> DbResult<()> {
        let mut conn = self.lock()?;
        initialize_schema(&mut conn)
    }

    /// Runs `sql` with positional `params` inside its own transaction.
    ///
    /// # Errors
    /// - Malformed SQL, bind mismatches, constraint violations and I/O
    ///   failures return [`DbError::Sqlite`] after rolling back.
    /// - A poisoned connection lock returns [`DbError::ConnectionPoisoned`].
    pub fn execute(&self, sql: &str, params: &[Value]) -> DbResult<QueryResult> {
        let started_at = Instant::now();
        let mut conn = self.lock()?;
        let result = run_in_transaction(&mut conn, sql, params);

        match &result {
            Ok(outcome) => debug!(
                "event=store_execute module=db status=ok kind={} rows={} affected={} duration_ms={}",
                statement_kind(sql),
                outcome.rows.len(),
                outcome.rows_affected,
                started_at.elapsed().as_millis()
            ),
            Err(err) => warn!(
                "event=store_execute module=db status=error kind={} duration_ms={} error={}",
                statement_kind(sql),
                started_at.elapsed().as_millis(),
                err
            ),
        }

        result
    }

    /// Callback form of [`Store::execute`].
    ///
    /// Exactly one of `on_success` / `on_failure` runs, once, before this
    /// function returns.
    pub fn execute_with<S, F>(&self, sql: &str, params: &[Value], on_success: S, on_failure: F)
    where
        S: FnOnce(QueryResult),
        F: FnOnce(DbError),
    {
        match self.execute(sql, params) {
            Ok(outcome) => on_success(outcome),
            Err(err) => on_failure(err),
        }
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::ConnectionPoisoned)
    }
}

fn run_in_transaction(conn: &mut Connection, sql: &str, params: &[Value]) -> DbResult<QueryResult> {
    // Dropping `tx` on any early return rolls the statement back.
    let tx = conn.transaction()?;
    let outcome = {
        let mut stmt = tx.prepare(sql)?;
        if stmt.column_count() > 0 {
            let names: Vec<String> = stmt
                .column_names()
                .into_iter()
                .map(str::to_owned)
                .collect();
            let mut rows = stmt.query(params_from_iter(params.iter()))?;
            let mut collected = Vec::new();
            while let Some(row) = rows.next()? {
                let mut values = Vec::with_capacity(names.len());
                for (index, name) in names.iter().enumerate() {
                    values.push((name.clone(), row.get::<_, Value>(index)?));
                }
                collected.push(StoreRow { values });
            }
            QueryResult {
                rows: collected,
                ..QueryResult::default()
            }
        } else {
            let changed = stmt.execute(params_from_iter(params.iter()))?;
            let last_insert_id =
                (statement_kind(sql) == "insert" && changed > 0).then(|| tx.last_insert_rowid());
            QueryResult {
                rows: Vec::new(),
                rows_affected: changed,
                last_insert_id,
            }
        }
    };
    tx.commit()?;
    Ok(outcome)
}

fn statement_kind(sql: &str) -> &'static str {
    let keyword = sql
        .trim_start()
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match keyword.as_str() {
        "select" => "select",
        "insert" => "insert",
        "update" => "update",
        "delete" => "delete",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::statement_kind;

    #[test]
    fn statement_kind_reads_leading_keyword() {
        assert_eq!(statement_kind("  insert INTO groups (name) VALUES (?)"), "insert");
        assert_eq!(statement_kind("SELECT * FROM todos"), "select");
        assert_eq!(statement_kind("PRAGMA user_version"), "other");
        assert_eq!(statement_kind(""), "other");
    }
}

use rusqlite::{Batch, Connection};
use rusqlite::types::ValueRef;
use std::sync::Mutex;

use super::types::{StoreRows, Value};
use crate::error::ExecutionError;

/// Demo table created on startup unless seeding is disabled.
pub const SEED_TABLE: &str = "kv";

/// The embedded store a node executes owned statements against.
///
/// Implementations handle their own concurrency; callers share one instance
/// across all request handlers without extra locking.
pub trait DataStore: Send + Sync {
    /// Runs `statement` as given and returns every row it produces.
    fn query(&self, statement: &str) -> Result<StoreRows, ExecutionError>;
}

/// SQLite-backed [`DataStore`].
///
/// SQLite serializes access to a connection anyway, so a single
/// mutex-guarded connection is shared by all handlers.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &str) -> rusqlite::Result<Self> {
        let conn = Connection::open(path)?;
        tracing::debug!("Opened SQLite store at {}", path);
        Ok(Self::from_connection(conn))
    }

    /// Private in-memory database, gone when the process exits.
    pub fn open_in_memory() -> rusqlite::Result<Self> {
        let conn = Connection::open_in_memory()?;
        tracing::debug!("Opened in-memory SQLite store");
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Creates the `kv(k text, v text)` demo table and fills it with
    /// `('a','1'),('b','2')` if it is empty.
    pub fn seed_demo(&self) -> Result<(), ExecutionError> {
        let conn = self.lock()?;
        conn.execute_batch("create table if not exists kv(k text, v text)")?;

        let existing: i64 = conn.query_row("select count(*) from kv", [], |row| row.get(0))?;
        if existing == 0 {
            conn.execute_batch("insert into kv values('a','1'),('b','2')")?;
            tracing::info!("Seeded table {} with demo rows", SEED_TABLE);
        }
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, ExecutionError> {
        self.conn
            .lock()
            .map_err(|_| ExecutionError::new("store connection lock poisoned"))
    }
}

impl DataStore for SqliteStore {
    /// Runs every statement in `statement` in order. The rows returned are
    /// those of the last statement that yields result columns; statements
    /// that are empty or only comments are skipped.
    fn query(&self, statement: &str) -> Result<StoreRows, ExecutionError> {
        let conn = self.lock()?;
        let mut batch = Batch::new(&conn, statement);
        let mut out = StoreRows::default();

        while let Some(mut stmt) = batch.next()? {
            let columns: Vec<String> = stmt
                .column_names()
                .into_iter()
                .map(String::from)
                .collect();

            let mut collected = Vec::new();
            let mut rows = stmt.query([])?;
            while let Some(row) = rows.next()? {
                let mut values = Vec::with_capacity(columns.len());
                for i in 0..columns.len() {
                    values.push(read_value(row.get_ref(i)?));
                }
                collected.push(values);
            }

            if !columns.is_empty() {
                out = StoreRows {
                    columns,
                    rows: collected,
                };
            }
        }

        Ok(out)
    }
}

/// Invalid UTF-8 in text cells is replaced with U+FFFD rather than failing
/// the query.
fn read_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(n) => Value::Integer(n),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::Blob(bytes.to_vec()),
    }
}

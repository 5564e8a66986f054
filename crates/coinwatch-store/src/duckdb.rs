//! `DuckDB` connection management for the ticker store.

use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use ::duckdb::Connection;

struct ManagerInner {
    db_path: PathBuf,
    max_idle: usize,
    idle: Mutex<Vec<Connection>>,
}

/// Shared handle to the store's database file.
///
/// Read connections are pooled and reused across requests; write
/// connections are opened on demand and closed when dropped. Dropping the
/// last clone of the manager closes every pooled connection, so the store's
/// lifecycle is bounded by whoever owns the repository.
#[derive(Clone)]
pub struct ConnectionManager {
    inner: Arc<ManagerInner>,
}

impl ConnectionManager {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, max_idle: usize) -> Self {
        Self {
            inner: Arc::new(ManagerInner {
                db_path: path.into(),
                max_idle: max_idle.max(1),
                idle: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Acquire a read connection, reusing an idle one when available.
    ///
    /// # Errors
    /// Returns an error if the database file cannot be opened.
    ///
    /// # Panics
    /// Panics if the pool mutex is poisoned.
    pub fn reader(&self) -> Result<PooledConnection, ::duckdb::Error> {
        let pooled = self
            .inner
            .idle
            .lock()
            .expect("connection pool mutex poisoned")
            .pop();

        let connection = match pooled {
            Some(connection) => connection,
            None => open_connection(self.inner.db_path.as_path())?,
        };

        Ok(PooledConnection {
            pool: Arc::clone(&self.inner),
            connection: Some(connection),
        })
    }

    /// Open a fresh write connection. Writes are rare (migrations and
    /// seeding), so these are not pooled.
    ///
    /// # Errors
    /// Returns an error if the database file cannot be opened.
    pub fn writer(&self) -> Result<Connection, ::duckdb::Error> {
        open_connection(self.inner.db_path.as_path())
    }

    #[must_use]
    pub fn db_path(&self) -> &Path {
        self.inner.db_path.as_path()
    }
}

/// A read connection that returns to the pool when dropped.
pub struct PooledConnection {
    pool: Arc<ManagerInner>,
    connection: Option<Connection>,
}

impl Deref for PooledConnection {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        self.connection
            .as_ref()
            .expect("pooled connection unexpectedly missing")
    }
}

impl DerefMut for PooledConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.connection
            .as_mut()
            .expect("pooled connection unexpectedly missing")
    }
}

impl Drop for PooledConnection {
    fn drop(&mut self) {
        let Some(connection) = self.connection.take() else {
            return;
        };

        let mut idle = self
            .pool
            .idle
            .lock()
            .expect("connection pool mutex poisoned");
        if idle.len() < self.pool.max_idle {
            idle.push(connection);
        }
    }
}

fn open_connection(path: &Path) -> Result<Connection, ::duckdb::Error> {
    let connection = Connection::open(path)?;
    connection.execute_batch("PRAGMA disable_progress_bar;")?;
    Ok(connection)
}

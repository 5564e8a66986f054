//! DuckDB-backed ticker store for coinwatch.
//!
//! Holds time-stamped price snapshots in a `coins` table and answers the
//! one query the service needs: all rows for a symbol strictly inside a
//! time window, ordered ascending by update time. All user input reaches
//! the database through bound parameters.

pub mod duckdb;
mod migrations;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use ::duckdb::{params, Connection};
use thiserror::Error;

pub use self::duckdb::{ConnectionManager, PooledConnection};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    DuckDb(#[from] ::duckdb::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed record: {0}")]
    MalformedRecord(String),
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub max_idle_connections: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let db_path = resolve_coinwatch_home().join("data").join("coins.duckdb");
        Self {
            db_path,
            max_idle_connections: 4,
        }
    }
}

/// A ticker row exactly as stored. Timestamps are carried as
/// `yyyy-MM-dd HH:mm:ss` strings; the domain layer owns parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerRecord {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub market_cap: f64,
    pub last_updated: String,
}

#[derive(Clone)]
pub struct TickerRepository {
    manager: ConnectionManager,
}

impl TickerRepository {
    /// Open the store at the default location (`$COINWATCH_HOME` or
    /// `~/.coinwatch`).
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(StoreConfig::default())
    }

    /// Open the store, creating the database file and schema if needed.
    ///
    /// # Errors
    /// Returns an error if the parent directory cannot be created or the
    /// database cannot be opened or migrated.
    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        if let Some(parent) = config.db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let manager = ConnectionManager::new(config.db_path, config.max_idle_connections);
        let repository = Self { manager };
        repository.initialize()?;
        Ok(repository)
    }

    fn initialize(&self) -> Result<(), StoreError> {
        let connection = self.manager.writer()?;
        migrations::apply_migrations(&connection)?;
        Ok(())
    }

    #[must_use]
    pub fn db_path(&self) -> &Path {
        self.manager.db_path()
    }

    /// All rows for `symbol` with `last_updated` strictly between `start`
    /// and `end`, ascending by `last_updated`.
    ///
    /// Both bounds are exclusive: a row stamped exactly at `start` or `end`
    /// is not returned. The symbol match is exact and case-sensitive. The
    /// full result set is materialized; there is no limit.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn find_in_range(
        &self,
        symbol: &str,
        start: &str,
        end: &str,
    ) -> Result<Vec<TickerRecord>, StoreError> {
        let connection = self.manager.reader()?;
        let mut statement = connection.prepare(
            r#"
SELECT symbol, name, price, market_cap, CAST(last_updated AS VARCHAR)
FROM coins
WHERE symbol = ?
  AND last_updated > CAST(? AS TIMESTAMP)
  AND last_updated < CAST(? AS TIMESTAMP)
ORDER BY last_updated ASC
"#,
        )?;

        let rows = statement.query_map(params![symbol, start, end], |row| {
            Ok(TickerRecord {
                symbol: row.get(0)?,
                name: row.get(1)?,
                price: row.get(2)?,
                market_cap: row.get(3)?,
                last_updated: row.get(4)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Insert ticker rows in a single transaction.
    ///
    /// The HTTP surface exposes no write path; this exists for seeding
    /// tooling and tests.
    ///
    /// # Errors
    /// Returns an error if any insert fails; the transaction is rolled back.
    pub fn insert_tickers(&self, rows: &[TickerRecord]) -> Result<(), StoreError> {
        if rows.is_empty() {
            return Ok(());
        }

        let connection = self.manager.writer()?;
        connection.execute_batch("BEGIN TRANSACTION")?;
        let result = (|| -> Result<(), StoreError> {
            let mut statement = connection.prepare(
                r#"
INSERT INTO coins (symbol, name, price, market_cap, last_updated)
VALUES (?, ?, ?, ?, CAST(? AS TIMESTAMP))
"#,
            )?;
            for row in rows {
                statement.execute(params![
                    row.symbol,
                    row.name,
                    row.price,
                    row.market_cap,
                    row.last_updated,
                ])?;
            }
            Ok(())
        })();

        finalize_transaction(&connection, result)
    }
}

fn finalize_transaction<T>(
    connection: &Connection,
    result: Result<T, StoreError>,
) -> Result<T, StoreError> {
    match result {
        Ok(value) => {
            connection.execute_batch("COMMIT")?;
            Ok(value)
        }
        Err(error) => {
            let _ = connection.execute_batch("ROLLBACK");
            Err(error)
        }
    }
}

fn resolve_coinwatch_home() -> PathBuf {
    if let Ok(home) = env::var("COINWATCH_HOME") {
        if !home.trim().is_empty() {
            return PathBuf::from(home);
        }
    }

    env::var("HOME")
        .map(|home| Path::new(&home).join(".coinwatch"))
        .unwrap_or_else(|_| PathBuf::from(".coinwatch"))
}

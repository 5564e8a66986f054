use ::duckdb::{params, Connection};

struct Migration {
    version: &'static str,
    sql: &'static str,
}

// No primary key on coins: duplicate (symbol, last_updated) rows are
// permitted and returned as stored.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "0001_coins",
        sql: r#"
CREATE TABLE IF NOT EXISTS coins (
    symbol TEXT NOT NULL,
    name TEXT NOT NULL,
    price DOUBLE NOT NULL,
    market_cap DOUBLE NOT NULL,
    last_updated TIMESTAMP NOT NULL
);
"#,
    },
    Migration {
        version: "0002_coins_range_index",
        sql: r#"
CREATE INDEX IF NOT EXISTS idx_coins_symbol_last_updated ON coins(symbol, last_updated);
"#,
    },
];

pub fn apply_migrations(connection: &Connection) -> Result<(), ::duckdb::Error> {
    connection.execute_batch(
        r#"
CREATE TABLE IF NOT EXISTS schema_migrations (
    version TEXT PRIMARY KEY,
    applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);
"#,
    )?;

    for migration in MIGRATIONS {
        let applied: i64 = connection.query_row(
            "SELECT COUNT(*) FROM schema_migrations WHERE version = ?",
            params![migration.version],
            |row| row.get(0),
        )?;

        if applied == 0 {
            connection.execute_batch(migration.sql)?;
            connection.execute(
                "INSERT INTO schema_migrations (version) VALUES (?)",
                params![migration.version],
            )?;
        }
    }

    Ok(())
}

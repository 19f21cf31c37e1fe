use crate::{DbError, Result};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use log::info;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const MAX_CONNECTIONS: u32 = 5;

/// Open a pool for the `DefaultConnection` string.
///
/// Accepts a `sqlite:` URL (`sqlite://app.db`, `sqlite::memory:`), a
/// `Data Source=app.db;Cache=Shared` style string, or a bare file path.
/// The database file is created if missing. In-memory databases get a single
/// connection so every query sees the same database.
pub async fn connect(connection_string: &str) -> Result<SqlitePool> {
    let options = connect_options(connection_string)?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS);
    if is_in_memory(connection_string) {
        // The database lives only as long as its one connection.
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }
    let max_connections = pool_options.get_max_connections();

    let pool = pool_options.connect_with(options).await?;

    info!("Database pool opened ({max_connections} connection(s))");

    Ok(pool)
}

/// Apply every pending migration.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

#[track_caller]
pub fn connect_options(connection_string: &str) -> Result<SqliteConnectOptions> {
    let connection_string = connection_string.trim();

    if connection_string.is_empty() {
        return Err(DbError::ConnectionString {
            message: String::from("connection string is empty"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    if connection_string.starts_with("sqlite:") {
        return Ok(SqliteConnectOptions::from_str(connection_string)?);
    }

    if !connection_string.contains('=') {
        return Ok(SqliteConnectOptions::new().filename(connection_string));
    }

    let mut options = SqliteConnectOptions::new();
    let mut has_source = false;

    for pair in connection_string.split(';').filter(|p| !p.trim().is_empty()) {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(DbError::ConnectionString {
                message: format!("'{pair}' is not a key=value pair"),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        match key.trim().to_ascii_lowercase().as_str() {
            "data source" | "datasource" | "filename" => {
                options = options.filename(value.trim());
                has_source = true;
            }
            "cache" => options = options.shared_cache(value.trim().eq_ignore_ascii_case("shared")),
            _ => {}
        }
    }

    if !has_source {
        return Err(DbError::ConnectionString {
            message: String::from("no 'Data Source' in connection string"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(options)
}

fn is_in_memory(connection_string: &str) -> bool {
    connection_string.contains(":memory:") || connection_string.contains("mode=memory")
}

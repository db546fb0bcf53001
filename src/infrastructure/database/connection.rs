use diesel::{
    PgConnection,
    r2d2::{self, ConnectionManager},
};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use std::env;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/");

#[derive(Debug)]
pub enum DatabaseError {
    ConfigurationError(String),
    PoolError(String),
    MigrationError(String),
}

impl std::fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            DatabaseError::PoolError(msg) => write!(f, "Pool error: {}", msg),
            DatabaseError::MigrationError(msg) => write!(f, "Migration error: {}", msg),
        }
    }
}

impl std::error::Error for DatabaseError {}

/// Connection settings for the chunk store. The pool is sized per
/// deployment: ingestion and chat share it.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, DatabaseError> {
        let url = env::var("DATABASE_URL")
            .map_err(|_| DatabaseError::ConfigurationError("DATABASE_URL not set".to_string()))?;

        let pool_size = match env::var("DATABASE_POOL_SIZE") {
            Ok(raw) => raw.parse::<u32>().map_err(|_| {
                DatabaseError::ConfigurationError(format!(
                    "DATABASE_POOL_SIZE has invalid value '{}'",
                    raw
                ))
            })?,
            Err(_) => 10,
        };

        let config = Self { url, pool_size };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DatabaseError> {
        if self.pool_size == 0 {
            return Err(DatabaseError::ConfigurationError(
                "pool_size must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

pub fn create_connection_pool(config: &DatabaseConfig) -> Result<DbPool, DatabaseError> {
    let manager = ConnectionManager::<PgConnection>::new(&config.url);

    r2d2::Pool::builder()
        .max_size(config.pool_size)
        .build(manager)
        .map_err(|e| DatabaseError::PoolError(e.to_string()))
}

pub fn get_connection_from_pool(pool: &DbPool) -> Result<DbConnection, DatabaseError> {
    pool.get()
        .map_err(|e| DatabaseError::PoolError(e.to_string()))
}

pub fn run_migrations(conn: &mut PgConnection) -> Result<(), DatabaseError> {
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;
    Ok(())
}

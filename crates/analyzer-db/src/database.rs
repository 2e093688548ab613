use analyzer_core::AppError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::check_repository::CheckRepository;
use crate::config::DatabaseConfig;
use crate::site_repository::SiteRepository;

/// Central database facade: owns the connection pool, runs migrations,
/// and vends repository instances.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL with the given configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(|e| AppError::StorageUnavailable(format!("Failed to connect: {e}")))?;

        tracing::info!(max_connections = config.max_connections, "Database connected");
        Ok(Self { pool })
    }

    /// Create a `Database` from an existing pool (useful for testing).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run all pending migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::StorageUnavailable(format!("Migration failed: {e}")))?;
        Ok(())
    }

    /// Get a [`SiteRepository`] backed by this pool.
    pub fn site_repo(&self) -> SiteRepository {
        SiteRepository::new(self.pool.clone())
    }

    /// Get a [`CheckRepository`] backed by this pool.
    pub fn check_repo(&self) -> CheckRepository {
        CheckRepository::new(self.pool.clone())
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;
        Ok(())
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

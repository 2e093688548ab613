use analyzer_core::error::AppError;
use analyzer_core::models::{Check, NewCheck};
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

/// Append-only repository for site checks in PostgreSQL.
#[derive(Clone)]
pub struct CheckRepository {
    pool: Pool<Postgres>,
}

impl CheckRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a check and return the stored row.
    pub async fn record_check(&self, check: &NewCheck) -> Result<Check, AppError> {
        let row = sqlx::query_as::<_, CheckRow>(
            r#"
            INSERT INTO url_checks (url_id, status_code, h1, title, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, url_id, status_code, h1, title, description, created_at
            "#,
        )
        .bind(check.site_id)
        .bind(check.status_code.map(i32::from))
        .bind(&check.seo.h1)
        .bind(&check.seo.title)
        .bind(&check.seo.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;

        Ok(row.into())
    }

    /// Check history for a site, newest first.
    pub async fn list_checks(&self, site_id: Uuid) -> Result<Vec<Check>, AppError> {
        let rows = sqlx::query_as::<_, CheckRow>(
            r#"
            SELECT id, url_id, status_code, h1, title, description, created_at
            FROM url_checks
            WHERE url_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(site_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct CheckRow {
    id: Uuid,
    url_id: Uuid,
    status_code: Option<i32>,
    h1: String,
    title: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl From<CheckRow> for Check {
    fn from(row: CheckRow) -> Self {
        Check {
            id: row.id,
            site_id: row.url_id,
            status_code: row.status_code.map(|code| code as u16),
            h1: row.h1,
            title: row.title,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

// -- Trait implementation --

impl analyzer_core::traits::CheckStore for CheckRepository {
    async fn record_check(&self, check: &NewCheck) -> Result<Check, AppError> {
        CheckRepository::record_check(self, check).await
    }

    async fn list_checks(&self, site_id: Uuid) -> Result<Vec<Check>, AppError> {
        CheckRepository::list_checks(self, site_id).await
    }
}

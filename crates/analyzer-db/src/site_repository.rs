use analyzer_core::error::AppError;
use analyzer_core::models::{Site, SiteSummary};
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

/// Repository for registered sites in PostgreSQL.
#[derive(Clone)]
pub struct SiteRepository {
    pool: Pool<Postgres>,
}

impl SiteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get-or-create a site by canonical name.
    ///
    /// The insert defers to the `uq_urls_name` constraint; when it loses
    /// (the name exists, possibly inserted concurrently and already
    /// committed) the follow-up read returns the existing id.
    pub async fn register(&self, name: &str) -> Result<(Uuid, bool), AppError> {
        let inserted: Option<(Uuid,)> = sqlx::query_as(
            r#"
            INSERT INTO urls (name)
            VALUES ($1)
            ON CONFLICT (name) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;

        if let Some((id,)) = inserted {
            return Ok((id, true));
        }

        let (id,): (Uuid,) = sqlx::query_as(r#"SELECT id FROM urls WHERE name = $1"#)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::StorageUnavailable(e.to_string()))?
            .ok_or_else(|| {
                AppError::StorageUnavailable(format!(
                    "site '{name}' conflicted on insert but could not be read back"
                ))
            })?;

        Ok((id, false))
    }

    pub async fn get_site(&self, id: Uuid) -> Result<Option<Site>, AppError> {
        let row = sqlx::query_as::<_, SiteRow>(
            r#"SELECT id, name, created_at FROM urls WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Site>, AppError> {
        let row = sqlx::query_as::<_, SiteRow>(
            r#"SELECT id, name, created_at FROM urls WHERE name = $1"#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    /// Every site joined with its latest check, newest site first.
    pub async fn list_sites(&self) -> Result<Vec<SiteSummary>, AppError> {
        let rows = sqlx::query_as::<_, SiteSummaryRow>(
            r#"
            SELECT u.id, u.name, u.created_at,
                   latest.created_at AS last_checked_at,
                   latest.status_code AS last_status_code
            FROM urls u
            LEFT JOIN LATERAL (
                SELECT c.created_at, c.status_code
                FROM url_checks c
                WHERE c.url_id = u.id
                ORDER BY c.created_at DESC, c.id DESC
                LIMIT 1
            ) latest ON TRUE
            ORDER BY u.created_at DESC, u.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

// -- Internal row types for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct SiteRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<SiteRow> for Site {
    fn from(row: SiteRow) -> Self {
        Site {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SiteSummaryRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    last_checked_at: Option<DateTime<Utc>>,
    last_status_code: Option<i32>,
}

impl From<SiteSummaryRow> for SiteSummary {
    fn from(row: SiteSummaryRow) -> Self {
        SiteSummary {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            last_checked_at: row.last_checked_at,
            last_status_code: row.last_status_code.map(|code| code as u16),
        }
    }
}

// -- Trait implementation --

impl analyzer_core::traits::SiteStore for SiteRepository {
    async fn register(&self, name: &str) -> Result<(Uuid, bool), AppError> {
        SiteRepository::register(self, name).await
    }

    async fn get_site(&self, id: Uuid) -> Result<Option<Site>, AppError> {
        SiteRepository::get_site(self, id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Site>, AppError> {
        SiteRepository::find_by_name(self, name).await
    }

    async fn list_sites(&self) -> Result<Vec<SiteSummary>, AppError> {
        SiteRepository::list_sites(self).await
    }
}

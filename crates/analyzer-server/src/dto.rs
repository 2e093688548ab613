use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use analyzer_core::models::{Check, CheckReport, Registration, Site, SiteSummary};

// ---------------------------------------------------------------------------
// Sites
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateUrlRequest {
    /// Website address as typed by the user
    pub url: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RegistrationResponse {
    pub id: Uuid,
    /// Canonical `scheme://host` name
    pub name: String,
    /// False when the site was already registered
    pub is_new: bool,
}

impl From<Registration> for RegistrationResponse {
    fn from(r: Registration) -> Self {
        Self {
            id: r.id,
            name: r.name,
            is_new: r.is_new,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SiteResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Site> for SiteResponse {
    fn from(site: Site) -> Self {
        Self {
            id: site.id,
            name: site.name,
            created_at: site.created_at,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SiteSummaryResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_checked_at: Option<DateTime<Utc>>,
    pub last_status_code: Option<u16>,
}

impl From<SiteSummary> for SiteSummaryResponse {
    fn from(s: SiteSummary) -> Self {
        Self {
            id: s.id,
            name: s.name,
            created_at: s.created_at,
            last_checked_at: s.last_checked_at,
            last_status_code: s.last_status_code,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SiteListResponse {
    pub sites: Vec<SiteSummaryResponse>,
    pub total: usize,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SiteDetailResponse {
    pub site: SiteResponse,
    /// Check history, newest first
    pub checks: Vec<CheckResponse>,
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CheckResponse {
    pub id: Uuid,
    pub site_id: Uuid,
    /// Absent when the page could not be fetched
    pub status_code: Option<u16>,
    pub h1: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<Check> for CheckResponse {
    fn from(c: Check) -> Self {
        Self {
            id: c.id,
            site_id: c.site_id,
            status_code: c.status_code,
            h1: c.h1,
            title: c.title,
            description: c.description,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CheckRunResponse {
    pub check: CheckResponse,
    /// Transport failure reason; the attempt is recorded either way
    pub error: Option<String>,
}

impl From<CheckReport> for CheckRunResponse {
    fn from(report: CheckReport) -> Self {
        Self {
            check: report.check.into(),
            error: report.fetch_error,
        }
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

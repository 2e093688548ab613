use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered website, identified by its canonical `scheme://host` name.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Site {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// One inspection of a site at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Check {
    pub id: Uuid,
    pub site_id: Uuid,
    /// `None` when the fetch failed before any response arrived.
    pub status_code: Option<u16>,
    pub h1: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// DTO for appending a check to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCheck {
    pub site_id: Uuid,
    pub status_code: Option<u16>,
    pub seo: PageSeo,
}

impl NewCheck {
    /// A check for a page that answered with `status_code`.
    pub fn completed(site_id: Uuid, status_code: u16, seo: PageSeo) -> Self {
        Self {
            site_id,
            status_code: Some(status_code),
            seo,
        }
    }

    /// A check attempt whose fetch never produced a response.
    pub fn failed(site_id: Uuid) -> Self {
        Self {
            site_id,
            status_code: None,
            seo: PageSeo::default(),
        }
    }
}

/// A site joined with its most recent check, as shown in the site list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SiteSummary {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_checked_at: Option<DateTime<Utc>>,
    pub last_status_code: Option<u16>,
}

/// SEO-relevant fields pulled out of a page. Missing elements are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct PageSeo {
    pub h1: String,
    pub title: String,
    pub description: String,
}

/// Raw result of a single GET: whatever status the server answered with, plus the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status_code: u16,
    pub body: String,
}

/// Outcome of get-or-create registration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Registration {
    pub id: Uuid,
    pub name: String,
    pub is_new: bool,
}

/// Outcome of one check run. The check is always recorded; `fetch_error`
/// carries the transport failure when the page could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CheckReport {
    pub check: Check,
    pub fetch_error: Option<String>,
}

impl CheckReport {
    pub fn is_success(&self) -> bool {
        self.fetch_error.is_none()
    }
}

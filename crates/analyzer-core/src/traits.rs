use std::future::Future;

use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Check, FetchedPage, NewCheck, PageSeo, Site, SiteSummary};

/// Performs the outbound GET for a site check.
///
/// Any status the server answers with is a success. Transport failures
/// (timeout, redirect loop, DNS, refused connection) are `AppError::FetchFailed`.
/// Implementations make exactly one attempt per call.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchedPage, AppError>> + Send;
}

/// Extracts `<h1>`, `<title>` and the meta description from a page.
///
/// Best-effort: malformed markup yields empty fields, never an error.
pub trait Inspector: Send + Sync + Clone {
    fn inspect(&self, html: &str) -> PageSeo;
}

/// Persistence for sites.
pub trait SiteStore: Send + Sync + Clone {
    /// Get-or-create a site by canonical name. Returns the id and whether it was created.
    ///
    /// Must be safe under concurrent calls for the same name: at most one row per name.
    fn register(&self, name: &str) -> impl Future<Output = Result<(Uuid, bool), AppError>> + Send;

    fn get_site(&self, id: Uuid) -> impl Future<Output = Result<Option<Site>, AppError>> + Send;

    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Site>, AppError>> + Send;

    /// All sites with their latest check, newest site first.
    fn list_sites(&self) -> impl Future<Output = Result<Vec<SiteSummary>, AppError>> + Send;
}

/// Append-only persistence for checks.
pub trait CheckStore: Send + Sync + Clone {
    /// Append a check. Returns the stored row.
    fn record_check(&self, check: &NewCheck)
    -> impl Future<Output = Result<Check, AppError>> + Send;

    /// Check history for a site, newest first.
    fn list_checks(&self, site_id: Uuid)
    -> impl Future<Output = Result<Vec<Check>, AppError>> + Send;
}

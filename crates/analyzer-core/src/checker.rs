use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Check, CheckReport, NewCheck, Site};
use crate::registry::find_site;
use crate::traits::{CheckStore, Fetcher, Inspector, SiteStore};

/// Runs a site check: resolve → fetch → inspect → record.
///
/// Generic over all external collaborators so it can be exercised without
/// real HTTP or a database.
pub struct CheckService<F, I, S, C>
where
    F: Fetcher,
    I: Inspector,
    S: SiteStore,
    C: CheckStore,
{
    fetcher: F,
    inspector: I,
    sites: S,
    checks: C,
}

impl<F, I, S, C> CheckService<F, I, S, C>
where
    F: Fetcher,
    I: Inspector,
    S: SiteStore,
    C: CheckStore,
{
    pub fn new(fetcher: F, inspector: I, sites: S, checks: C) -> Self {
        Self {
            fetcher,
            inspector,
            sites,
            checks,
        }
    }

    /// Check a site once and record the outcome.
    ///
    /// A transport failure is still recorded, with no status code and empty
    /// fields, and reported through [`CheckReport::fetch_error`]. Unknown sites
    /// and storage failures are returned as errors.
    pub async fn check_site(&self, site_id: Uuid) -> Result<CheckReport, AppError> {
        let site = find_site(&self.sites, site_id).await?;

        tracing::info!(%site_id, name = %site.name, "Checking site");
        let (new_check, fetch_error) = match self.fetcher.fetch(&site.name).await {
            Ok(page) => {
                tracing::info!(
                    status_code = page.status_code,
                    bytes = page.body.len(),
                    "Fetched page"
                );
                let seo = self.inspector.inspect(&page.body);
                (NewCheck::completed(site_id, page.status_code, seo), None)
            }
            Err(AppError::FetchFailed(reason)) => {
                tracing::warn!(%site_id, name = %site.name, %reason, "Fetch failed");
                (NewCheck::failed(site_id), Some(reason))
            }
            Err(e) => return Err(e),
        };

        let check = self.checks.record_check(&new_check).await?;
        tracing::info!(check_id = %check.id, "Check recorded");

        Ok(CheckReport { check, fetch_error })
    }
}

/// A site together with its check history, newest first.
pub async fn site_details<S, C>(
    sites: &S,
    checks: &C,
    site_id: Uuid,
) -> Result<(Site, Vec<Check>), AppError>
where
    S: SiteStore,
    C: CheckStore,
{
    let site = find_site(sites, site_id).await?;
    let history = checks.list_checks(site_id).await?;
    Ok((site, history))
}

use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Registration, Site};
use crate::normalize::normalize_url;
use crate::traits::SiteStore;

/// Normalize `raw` and get-or-create the matching site.
///
/// Invalid input is rejected before the store is touched.
pub async fn register_url<S: SiteStore>(store: &S, raw: &str) -> Result<Registration, AppError> {
    let name = normalize_url(raw)?;
    let (id, is_new) = store.register(&name).await?;

    if is_new {
        tracing::info!(%id, %name, "Site registered");
    } else {
        tracing::info!(%id, %name, "Site already registered");
    }

    Ok(Registration { id, name, is_new })
}

/// Fetch a site by id, mapping absence to `AppError::NotFound`.
pub async fn find_site<S: SiteStore>(store: &S, id: Uuid) -> Result<Site, AppError> {
    store
        .get_site(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("site {id}")))
}

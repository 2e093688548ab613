pub mod checker;
pub mod error;
pub mod models;
pub mod normalize;
pub mod registry;
pub mod traits;

#[cfg(test)]
pub mod testutil;

pub use checker::{CheckService, site_details};
pub use error::AppError;
pub use models::{
    Check, CheckReport, FetchedPage, NewCheck, PageSeo, Registration, Site, SiteSummary,
};
pub use normalize::{InvalidUrl, MAX_NAME_LENGTH, normalize_url};
pub use registry::{find_site, register_url};
pub use traits::{CheckStore, Fetcher, Inspector, SiteStore};

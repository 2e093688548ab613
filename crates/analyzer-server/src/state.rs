use analyzer_client::{ReqwestFetcher, ScraperInspector};
use analyzer_db::Database;

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub db: Database,
    pub fetcher: ReqwestFetcher,
    pub inspector: ScraperInspector,
}

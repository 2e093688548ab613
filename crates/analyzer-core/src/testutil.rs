//! Test utilities: mock implementations of all core traits.
//!
//! Handwritten mocks for dependency injection in unit tests.
//! All mocks use `Arc<Mutex<_>>` for interior mutability, allowing
//! test assertions on recorded calls.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Check, FetchedPage, NewCheck, PageSeo, Site, SiteSummary};
use crate::traits::{CheckStore, Fetcher, Inspector, SiteStore};

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher that returns queued responses and records requested URLs.
#[derive(Clone)]
pub struct MockFetcher {
    /// Queue of responses. Each call pops the first element.
    /// If empty, returns an empty 200 page.
    responses: Arc<Mutex<Vec<Result<FetchedPage, AppError>>>>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new(page: FetchedPage) -> Self {
        Self::with_responses(vec![Ok(page)])
    }

    pub fn with_error(error: AppError) -> Self {
        Self::with_responses(vec![Err(error)])
    }

    pub fn with_responses(responses: Vec<Result<FetchedPage, AppError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, AppError> {
        self.requested.lock().unwrap().push(url.to_string());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(FetchedPage {
                status_code: 200,
                body: String::new(),
            })
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// MockInspector
// ---------------------------------------------------------------------------

/// Mock inspector that returns the same fields for every page.
#[derive(Clone)]
pub struct MockInspector {
    seo: PageSeo,
}

impl MockInspector {
    pub fn new(seo: PageSeo) -> Self {
        Self { seo }
    }
}

impl Inspector for MockInspector {
    fn inspect(&self, _html: &str) -> PageSeo {
        self.seo.clone()
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MemoryState {
    sites: Vec<Site>,
    checks: Vec<Check>,
    register_calls: usize,
    last_timestamp: Option<DateTime<Utc>>,
}

impl MemoryState {
    /// Strictly increasing timestamps so ordering in tests is deterministic.
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let ts = match self.last_timestamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_timestamp = Some(ts);
        ts
    }
}

/// In-memory site and check store with the same ordering rules as the SQL store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails with `StorageUnavailable`.
    pub fn unavailable() -> Self {
        Self {
            state: Arc::default(),
            unavailable: true,
        }
    }

    pub fn site_count(&self) -> usize {
        self.state.lock().unwrap().sites.len()
    }

    pub fn check_count(&self) -> usize {
        self.state.lock().unwrap().checks.len()
    }

    pub fn register_calls(&self) -> usize {
        self.state.lock().unwrap().register_calls
    }

    fn ensure_available(&self) -> Result<(), AppError> {
        if self.unavailable {
            Err(AppError::StorageUnavailable("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

impl SiteStore for MemoryStore {
    async fn register(&self, name: &str) -> Result<(Uuid, bool), AppError> {
        self.ensure_available()?;
        let mut state = self.state.lock().unwrap();
        state.register_calls += 1;
        if let Some(site) = state.sites.iter().find(|s| s.name == name) {
            return Ok((site.id, false));
        }
        let site = Site {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: state.next_timestamp(),
        };
        let id = site.id;
        state.sites.push(site);
        Ok((id, true))
    }

    async fn get_site(&self, id: Uuid) -> Result<Option<Site>, AppError> {
        self.ensure_available()?;
        let state = self.state.lock().unwrap();
        Ok(state.sites.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Site>, AppError> {
        self.ensure_available()?;
        let state = self.state.lock().unwrap();
        Ok(state.sites.iter().find(|s| s.name == name).cloned())
    }

    async fn list_sites(&self) -> Result<Vec<SiteSummary>, AppError> {
        self.ensure_available()?;
        let state = self.state.lock().unwrap();
        let mut summaries: Vec<SiteSummary> = state
            .sites
            .iter()
            .map(|site| {
                let latest = state
                    .checks
                    .iter()
                    .filter(|c| c.site_id == site.id)
                    .max_by_key(|c| (c.created_at, c.id));
                SiteSummary {
                    id: site.id,
                    name: site.name.clone(),
                    created_at: site.created_at,
                    last_checked_at: latest.map(|c| c.created_at),
                    last_status_code: latest.and_then(|c| c.status_code),
                }
            })
            .collect();
        summaries.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(summaries)
    }
}

impl CheckStore for MemoryStore {
    async fn record_check(&self, check: &NewCheck) -> Result<Check, AppError> {
        self.ensure_available()?;
        let mut state = self.state.lock().unwrap();
        let row = Check {
            id: Uuid::new_v4(),
            site_id: check.site_id,
            status_code: check.status_code,
            h1: check.seo.h1.clone(),
            title: check.seo.title.clone(),
            description: check.seo.description.clone(),
            created_at: state.next_timestamp(),
        };
        state.checks.push(row.clone());
        Ok(row)
    }

    async fn list_checks(&self, site_id: Uuid) -> Result<Vec<Check>, AppError> {
        self.ensure_available()?;
        let state = self.state.lock().unwrap();
        let mut checks: Vec<Check> = state
            .checks
            .iter()
            .filter(|c| c.site_id == site_id)
            .cloned()
            .collect();
        checks.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(checks)
    }
}

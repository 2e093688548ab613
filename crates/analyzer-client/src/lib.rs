pub mod config;
pub mod fetcher;
pub mod inspector;

pub use config::FetcherConfig;
pub use fetcher::ReqwestFetcher;
pub use inspector::ScraperInspector;

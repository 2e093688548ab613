pub mod check_repository;
pub mod config;
pub mod database;
pub mod site_repository;

pub use check_repository::CheckRepository;
pub use config::DatabaseConfig;
pub use database::Database;
pub use site_repository::SiteRepository;

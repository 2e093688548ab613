use analyzer_client::FetcherConfig;
use analyzer_core::AppError;
use analyzer_db::DatabaseConfig;

/// Everything the server binary reads from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `ANALYZER_SERVER_PORT`, defaults to 3000
    pub port: u16,
    pub database: DatabaseConfig,
    pub fetcher: FetcherConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let port = match std::env::var("ANALYZER_SERVER_PORT") {
            Err(_) => 3000,
            Ok(raw) => raw.parse().map_err(|_| {
                AppError::ConfigError(format!(
                    "Invalid ANALYZER_SERVER_PORT '{raw}': must be a port number"
                ))
            })?,
        };

        Ok(Self {
            port,
            database: DatabaseConfig::from_env()?,
            fetcher: FetcherConfig::from_env()?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

use std::time::Duration;

use analyzer_core::AppError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_MAX_REDIRECTS: usize = 10;
pub const DEFAULT_USER_AGENT: &str = concat!("PageAnalyzer/", env!("CARGO_PKG_VERSION"));

/// Settings for outbound page fetches.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetcherConfig {
    /// Read configuration from environment variables.
    ///
    /// - `ANALYZER_FETCH_TIMEOUT_SECS` (optional, defaults to 15, must be at least 1)
    /// - `ANALYZER_MAX_REDIRECTS` (optional, defaults to 10)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("ANALYZER_FETCH_TIMEOUT_SECS") {
            let secs: u64 = raw.parse().map_err(|_| {
                AppError::ConfigError(format!(
                    "Invalid ANALYZER_FETCH_TIMEOUT_SECS '{raw}': must be a positive integer"
                ))
            })?;
            if secs == 0 {
                return Err(AppError::ConfigError(
                    "ANALYZER_FETCH_TIMEOUT_SECS must be at least 1".into(),
                ));
            }
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup("ANALYZER_MAX_REDIRECTS") {
            config.max_redirects = raw.parse().map_err(|_| {
                AppError::ConfigError(format!(
                    "Invalid ANALYZER_MAX_REDIRECTS '{raw}': must be a non-negative integer"
                ))
            })?;
        }

        Ok(config)
    }
}

use std::time::Duration;

use crate::ClientError;

/// Connection settings for [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the API, without a trailing slash.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub auth_token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Page size used for analytics and response listings.
    pub page_size: u32,
}

impl ClientConfig {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    /// Create a configuration for the given base URL with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: None,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }

    /// Load the configuration from the environment.
    ///
    /// A `.env` file in the working directory is read first if present.
    /// `SURVEY_API_URL` is required; `SURVEY_API_TOKEN`,
    /// `SURVEY_API_TIMEOUT_SECS` and `SURVEY_API_PAGE_SIZE` are optional.
    pub fn from_env() -> Result<Self, ClientError> {
        if let Err(err) = dotenvy::dotenv() {
            log::trace!("no .env file loaded: {err}");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let base_url = lookup("SURVEY_API_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ClientError::Config("SURVEY_API_URL is not set".to_string()))?;

        let mut config = Self::new(base_url);
        if let Some(token) = lookup("SURVEY_API_TOKEN").filter(|t| !t.is_empty()) {
            config = config.with_token(token);
        }
        if let Some(secs) = lookup("SURVEY_API_TIMEOUT_SECS") {
            let secs = parse::<u64>("SURVEY_API_TIMEOUT_SECS", &secs)?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(size) = lookup("SURVEY_API_PAGE_SIZE") {
            let size = parse::<u32>("SURVEY_API_PAGE_SIZE", &size)?;
            if size == 0 {
                return Err(ClientError::Config(
                    "SURVEY_API_PAGE_SIZE must be at least 1".to_string(),
                ));
            }
            config = config.with_page_size(size);
        }
        Ok(config)
    }

    /// Set the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the listing page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ClientError> {
    value
        .trim()
        .parse()
        .map_err(|_| ClientError::Config(format!("{key} has an invalid value: {value:?}")))
}

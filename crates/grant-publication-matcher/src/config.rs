//! Configuration for the grant publication matcher.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the OpenAlex API.
    pub const BASE_URL: &str = "https://api.openalex.org";

    /// Works endpoint, relative to the base URL.
    pub const WORKS_PATH: &str = "/works";

    /// Results requested per query. Only the first page is ever read.
    pub const PER_PAGE: u32 = 200;

    /// Courtesy delay between API calls in batch mode (100ms = 10 req/s).
    pub const RATE_LIMIT_DELAY: Duration = Duration::from_millis(100);

    /// Maximum distinct grant identifiers accepted in one batch.
    pub const MAX_GRANT_IDS: usize = 100;
}

/// Placeholder values for fields missing from a work.
pub mod sentinels {
    /// Stand-in for a missing DOI.
    pub const DOI: &str = "N/A";

    /// Stand-in for a missing title.
    pub const TITLE: &str = "Unknown Title";

    /// Stand-in for a missing author or institution name, or publication year.
    pub const UNKNOWN: &str = "Unknown";
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the OpenAlex API (overridable for mock servers).
    pub api_url: String,

    /// Contact address sent as `mailto` to join the OpenAlex polite pool.
    pub mailto: Option<String>,

    /// `per-page` value sent with every query.
    pub per_page: u32,

    /// Request timeout. `None` leaves the HTTP client default in place.
    pub request_timeout: Option<Duration>,

    /// Delay inserted after each API call in batch mode.
    pub rate_limit_delay: Duration,

    /// Cap on distinct grant identifiers per batch.
    pub max_grant_ids: usize,
}

impl Config {
    /// Create a new configuration with an optional polite-pool address.
    #[must_use]
    pub fn new(mailto: Option<String>) -> Self {
        Self {
            api_url: api::BASE_URL.to_string(),
            mailto,
            per_page: api::PER_PAGE,
            request_timeout: None,
            rate_limit_delay: api::RATE_LIMIT_DELAY,
            max_grant_ids: api::MAX_GRANT_IDS,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_url: base_url.to_string(),
            mailto: None,
            per_page: api::PER_PAGE,
            request_timeout: Some(Duration::from_secs(5)),
            rate_limit_delay: Duration::from_millis(0), // No delay in tests
            max_grant_ids: api::MAX_GRANT_IDS,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `OPENALEX_MAILTO` and `OPENALEX_API_URL`; blank values are ignored.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let mailto = non_blank_var("OPENALEX_MAILTO");
        let mut config = Self::new(mailto);

        if let Some(url) = non_blank_var("OPENALEX_API_URL") {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("OPENALEX_API_URL must be an http(s) URL, got {url:?}");
            }
            config.api_url = url;
        }

        Ok(config)
    }

    /// Full URL of the works endpoint.
    #[must_use]
    pub fn works_url(&self) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), api::WORKS_PATH)
    }

    /// Check if a polite-pool address is configured.
    #[must_use]
    pub const fn has_mailto(&self) -> bool {
        self.mailto.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    std::env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

//! OpenAlex works API client.
//!
//! Provides an async HTTP client with:
//! - Connection pooling via reqwest
//! - Filtered `GET /works` queries (first page only, no pagination)
//! - Non-success statuses surfaced as [`ClientError::Status`]
//!
//! No retries and no caching: one request per call, success or failure.

mod filter;

pub use filter::WorksFilter;

use reqwest::Client;

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::WorksResponse;

/// OpenAlex API client.
#[derive(Clone)]
pub struct OpenAlexClient {
    /// HTTP client.
    client: Client,

    /// Full URL of the works endpoint.
    works_url: String,

    /// Polite-pool contact address (optional).
    mailto: Option<String>,

    /// `per-page` value for every query.
    per_page: u32,
}

impl OpenAlexClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(reqwest::header::ACCEPT, "application/json".parse()?);

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .gzip(true);

        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            works_url: config.works_url(),
            mailto: config.mailto.clone(),
            per_page: config.per_page,
        })
    }

    /// Check if a polite-pool address is configured.
    #[must_use]
    pub fn has_mailto(&self) -> bool {
        self.mailto.is_some()
    }

    /// Works whose grant annotations carry `grant_id` as award identifier.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status or malformed body.
    pub async fn works_by_grant(&self, grant_id: &str) -> ClientResult<WorksResponse> {
        self.works(&WorksFilter::new().award_id(grant_id)).await
    }

    /// Works matching both the award identifier and the funder.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status or malformed body.
    pub async fn works_by_grant_and_funder(
        &self,
        grant_id: &str,
        funder_id: &str,
    ) -> ClientResult<WorksResponse> {
        self.works(&WorksFilter::new().award_id(grant_id).funder(funder_id)).await
    }

    /// Run a filtered works query.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn works(&self, filter: &WorksFilter) -> ClientResult<WorksResponse> {
        let mut params = vec![
            ("filter".to_string(), filter.to_string()),
            ("per-page".to_string(), self.per_page.to_string()),
        ];
        if let Some(ref mailto) = self.mailto {
            params.push(("mailto".to_string(), mailto.clone()));
        }

        self.get(&self.works_url, &params).await
    }

    /// Make a GET request.
    async fn get<T>(&self, url: &str, params: &[(String, String)]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        tracing::debug!(url, ?params, "GET");

        let response = self.client.get(url).query(params).send().await?;
        let response = self.handle_response(response).await?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(ClientError::from)
    }

    /// Turn any non-success status into an error carrying the response body.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        Err(ClientError::status_error(status, text))
    }
}

impl std::fmt::Debug for OpenAlexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAlexClient")
            .field("works_url", &self.works_url)
            .field("has_mailto", &self.has_mailto())
            .finish()
    }
}

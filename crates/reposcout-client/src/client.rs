//! GitHub-style search API client
//!
//! One request attempt per call, no internal retry. The per-call timeout
//! comes from configuration and surfaces as a `Network` error.

use std::time::Duration;

use async_trait::async_trait;
use reposcout_common::{CorrelationId, DomainError, DomainResult};
use reposcout_config::ApiConfig;

use crate::models::{Repository, SearchCriteria, SearchResults};
use crate::payload::{RepositoryItem, SearchResponseBody};

/// Media type the GitHub REST API expects.
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Seam between the coordinator and the remote repository-search API.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Execute one search request for the given criteria.
    async fn search(
        &self,
        criteria: &SearchCriteria,
        correlation_id: &CorrelationId,
    ) -> DomainResult<SearchResults<Repository>>;

    /// Fetch a single repository by id. Absent ids are `Ok(None)`, not errors.
    async fn get_repository(
        &self,
        id: u64,
        correlation_id: &CorrelationId,
    ) -> DomainResult<Option<Repository>>;
}

/// Production [`SearchClient`] backed by `reqwest`.
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
}

impl GithubClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `Unknown` if the underlying HTTP client cannot be constructed
    /// (TLS backend initialization is the only realistic cause).
    pub fn new(config: &ApiConfig) -> DomainResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| DomainError::unknown(format!("failed to build http client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Authoritative mapping from non-success statuses to domain errors.
    ///
    /// 404 is not handled here: its meaning depends on the endpoint, so the
    /// callers deal with it before delegating.
    async fn error_for_status(status: reqwest::StatusCode, response: reqwest::Response) -> DomainError {
        let body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            403 => DomainError::network("rate limit exceeded"),
            422 => DomainError::InvalidCriteria,
            s if s >= 500 => DomainError::network("service unavailable"),
            s => DomainError::network(format!("unexpected status {s}: {body}")),
        }
    }
}

/// Map a `reqwest` transport failure into the taxonomy.
fn map_transport_error(err: &reqwest::Error) -> DomainError {
    if err.is_timeout() {
        DomainError::network("request timed out")
    } else if err.is_connect() {
        DomainError::network(format!("connection failed: {err}"))
    } else if err.is_builder() {
        DomainError::unknown(err.to_string())
    } else {
        DomainError::network(err.to_string())
    }
}

#[async_trait]
impl SearchClient for GithubClient {
    #[tracing::instrument(
        skip(self, criteria),
        fields(query = %criteria.query, page = criteria.page, correlation_id = %correlation_id)
    )]
    async fn search(
        &self,
        criteria: &SearchCriteria,
        correlation_id: &CorrelationId,
    ) -> DomainResult<SearchResults<Repository>> {
        let url = format!("{}/search/repositories", self.base_url);

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, GITHUB_ACCEPT)
            .query(&[("q", criteria.query.as_str())])
            .query(&[("page", criteria.page), ("per_page", criteria.per_page)])
            .send()
            .await
            .map_err(|e| map_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "search request rejected");
            return Err(Self::error_for_status(status, response).await);
        }

        let text = response.text().await.map_err(|e| map_transport_error(&e))?;
        let body: SearchResponseBody = serde_json::from_str(&text)?;

        tracing::debug!(total = body.total_count, "search completed");
        Ok(body.into())
    }

    #[tracing::instrument(skip(self), fields(correlation_id = %correlation_id))]
    async fn get_repository(
        &self,
        id: u64,
        correlation_id: &CorrelationId,
    ) -> DomainResult<Option<Repository>> {
        let url = format!("{}/repositories/{id}", self.base_url);

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, GITHUB_ACCEPT)
            .send()
            .await
            .map_err(|e| map_transport_error(&e))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!("repository does not exist");
            return Ok(None);
        }
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "lookup request rejected");
            return Err(Self::error_for_status(status, response).await);
        }

        let text = response.text().await.map_err(|e| map_transport_error(&e))?;
        let item: RepositoryItem = serde_json::from_str(&text)?;
        Ok(Some(item.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let config = ApiConfig {
            base_url: "https://api.github.com/".to_string(),
            ..ApiConfig::default()
        };
        let client = GithubClient::new(&config).expect("client must build");
        assert_eq!(client.base_url, "https://api.github.com");
    }
}

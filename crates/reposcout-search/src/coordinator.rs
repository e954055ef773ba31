//! Cache-first repository coordination
//!
//! The coordinator is the only writer to the cache store. Policy, in strict
//! order: fresh cache -> remote -> stale cache -> mapped error.

use std::sync::Arc;

use async_trait::async_trait;
use reposcout_cache::CacheStore;
use reposcout_client::{Repository, SearchClient, SearchCriteria, SearchResults};
use reposcout_common::{CorrelationId, DomainError, DomainResult};

/// Seam between the use case and the data layer.
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    /// Search repositories, serving from cache when possible.
    async fn search_repositories(
        &self,
        criteria: &SearchCriteria,
        correlation_id: &CorrelationId,
    ) -> DomainResult<SearchResults<Repository>>;

    /// Look up one repository by id, serving from cache when possible.
    async fn get_repository(
        &self,
        id: u64,
        correlation_id: &CorrelationId,
    ) -> DomainResult<Option<Repository>>;

    /// Like [`get_repository`](Self::get_repository), for callers that
    /// require presence: absence becomes `NotFound`.
    async fn require_repository(
        &self,
        id: u64,
        correlation_id: &CorrelationId,
    ) -> DomainResult<Repository> {
        self.get_repository(id, correlation_id)
            .await?
            .ok_or(DomainError::NotFound(id))
    }
}

/// Production [`RepositoryProvider`] combining the remote client with the
/// shared in-memory cache.
pub struct RepositoryCoordinator {
    client: Arc<dyn SearchClient>,
    cache: Arc<CacheStore>,
}

impl RepositoryCoordinator {
    pub fn new(client: Arc<dyn SearchClient>, cache: Arc<CacheStore>) -> Self {
        Self { client, cache }
    }
}

#[async_trait]
impl RepositoryProvider for RepositoryCoordinator {
    #[tracing::instrument(
        skip(self, criteria),
        fields(query = %criteria.query, cached = false, correlation_id = %correlation_id)
    )]
    async fn search_repositories(
        &self,
        criteria: &SearchCriteria,
        correlation_id: &CorrelationId,
    ) -> DomainResult<SearchResults<Repository>> {
        // A fresh entry short-circuits the remote entirely: a second
        // identical query inside the TTL window never reaches the client.
        if let Some(results) = self.cache.get_results(&criteria.query) {
            tracing::Span::current().record("cached", true);
            tracing::debug!("cache hit");
            return Ok(results);
        }

        match self.client.search(criteria, correlation_id).await {
            Ok(results) => {
                self.cache.put_results(&criteria.query, &results);
                Ok(results)
            }
            Err(err) => {
                // Stale fallback re-reads the cache ignoring TTL. If the
                // entry vanished since the freshness check (concurrent
                // clear), this reads as absent and the failure propagates.
                if let Some(stale) = self.cache.get_results_stale(&criteria.query) {
                    tracing::warn!(error = %err, "remote search failed, serving stale entry");
                    return Ok(stale);
                }
                tracing::warn!(error = %err, "remote search failed with no cached fallback");
                Err(err)
            }
        }
    }

    #[tracing::instrument(skip(self), fields(cached = false, correlation_id = %correlation_id))]
    async fn get_repository(
        &self,
        id: u64,
        correlation_id: &CorrelationId,
    ) -> DomainResult<Option<Repository>> {
        if let Some(repository) = self.cache.get_repository(id) {
            tracing::Span::current().record("cached", true);
            return Ok(Some(repository));
        }

        match self.client.get_repository(id, correlation_id).await {
            Ok(Some(repository)) => {
                self.cache.put_repository(&repository);
                Ok(Some(repository))
            }
            // Absent remotely is a definitive answer, not a fallback case.
            Ok(None) => Ok(None),
            Err(err) => {
                if let Some(stale) = self.cache.get_repository_stale(id) {
                    tracing::warn!(error = %err, "remote lookup failed, serving stale entry");
                    return Ok(Some(stale));
                }
                Err(err)
            }
        }
    }
}

//! Search use case: validation gate in front of the coordinator

use std::sync::Arc;

use async_trait::async_trait;
use reposcout_client::{Repository, SearchCriteria};
use reposcout_common::{CorrelationId, DomainResult};

use crate::coordinator::RepositoryProvider;

/// Seam between the controller and the use case, mockable in tests.
#[async_trait]
pub trait SearchExecutor: Send + Sync {
    /// Validate the criteria and run the search.
    async fn execute(
        &self,
        criteria: &SearchCriteria,
        correlation_id: &CorrelationId,
    ) -> DomainResult<Vec<Repository>>;
}

/// Stateless use case; constructed fresh per consumer by the registry.
pub struct SearchUseCase {
    provider: Arc<dyn RepositoryProvider>,
}

impl SearchUseCase {
    pub fn new(provider: Arc<dyn RepositoryProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl SearchExecutor for SearchUseCase {
    /// Every outcome is exactly one of `Ok`/`Err`; nothing panics across
    /// this boundary.
    #[tracing::instrument(skip(self, criteria), fields(correlation_id = %correlation_id))]
    async fn execute(
        &self,
        criteria: &SearchCriteria,
        correlation_id: &CorrelationId,
    ) -> DomainResult<Vec<Repository>> {
        // Invalid input never reaches the provider - no remote or cache I/O.
        criteria.validate()?;

        let results = self
            .provider
            .search_repositories(criteria, correlation_id)
            .await?;
        Ok(results.items)
    }
}

//! Test utilities: scriptable mock client and entity builders

// Allow test-specific patterns in mock implementation
#![allow(clippy::unwrap_used)] // Mocks can panic on lock poisoning
#![allow(clippy::expect_used)] // Test code can use expect
#![allow(clippy::arithmetic_side_effects)] // Test counters can overflow

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reposcout_client::{Owner, Repository, SearchClient, SearchCriteria, SearchResults};
use reposcout_common::{CorrelationId, DomainError, DomainResult};

/// Build a repository with deterministic fields, so two calls with the same
/// arguments compare equal.
pub fn sample_repository(id: u64, name: &str) -> Repository {
    Repository {
        id,
        name: name.to_string(),
        full_name: format!("acme/{name}"),
        description: Some(format!("the {name} repository")),
        owner: Owner {
            id: 100,
            login: "acme".to_string(),
            avatar_url: "https://avatars.example/acme".to_string(),
            html_url: "https://github.com/acme".to_string(),
        },
        star_count: 1_500,
        language: Some("Rust".to_string()),
        updated_at: Utc
            .with_ymd_and_hms(2026, 6, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
        html_url: format!("https://github.com/acme/{name}"),
    }
}

/// A one-page result set holding the given repositories.
pub fn sample_results(repositories: Vec<Repository>) -> SearchResults<Repository> {
    SearchResults {
        total_count: repositories.len() as u64,
        items: repositories,
        incomplete: false,
    }
}

/// Scriptable [`SearchClient`] that records calls.
///
/// Responses are keyed by trimmed, lowercased query. Failures are one-shot:
/// `fail_next` arms a single error, consumed by the next call.
pub struct MockSearchClient {
    results: Mutex<HashMap<String, SearchResults<Repository>>>,
    repositories: Mutex<HashMap<u64, Repository>>,
    delays: Mutex<HashMap<String, Duration>>,
    fail_next: Mutex<Option<DomainError>>,
    search_calls: AtomicUsize,
    lookup_calls: AtomicUsize,
}

impl Default for MockSearchClient {
    fn default() -> Self {
        Self {
            results: Mutex::new(HashMap::new()),
            repositories: Mutex::new(HashMap::new()),
            delays: Mutex::new(HashMap::new()),
            fail_next: Mutex::new(None),
            search_calls: AtomicUsize::new(0),
            lookup_calls: AtomicUsize::new(0),
        }
    }
}

impl MockSearchClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the result set returned for a query.
    pub fn insert_results(&self, query: &str, results: SearchResults<Repository>) {
        self.results
            .lock()
            .unwrap()
            .insert(query.trim().to_lowercase(), results);
    }

    /// Script the repository returned for an id lookup.
    pub fn insert_repository(&self, repository: Repository) {
        self.repositories
            .lock()
            .unwrap()
            .insert(repository.id, repository);
    }

    /// Delay responses for a query; lets tests race a slow earlier search
    /// against a faster later one.
    pub fn set_delay(&self, query: &str, delay: Duration) {
        self.delays
            .lock()
            .unwrap()
            .insert(query.trim().to_lowercase(), delay);
    }

    /// Arm a one-shot failure for the next call.
    pub fn fail_next(&self, error: DomainError) {
        *self.fail_next.lock().unwrap() = Some(error);
    }

    pub fn search_call_count(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn lookup_call_count(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    fn take_failure(&self) -> Option<DomainError> {
        self.fail_next.lock().unwrap().take()
    }

    async fn apply_delay(&self, key: &str) {
        let delay = self.delays.lock().unwrap().get(key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl SearchClient for MockSearchClient {
    async fn search(
        &self,
        criteria: &SearchCriteria,
        _correlation_id: &CorrelationId,
    ) -> DomainResult<SearchResults<Repository>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        let key = criteria.query.trim().to_lowercase();
        self.apply_delay(&key).await;

        if let Some(error) = self.take_failure() {
            return Err(error);
        }

        let scripted = self.results.lock().unwrap().get(&key).cloned();
        Ok(scripted.unwrap_or_else(|| sample_results(Vec::new())))
    }

    async fn get_repository(
        &self,
        id: u64,
        _correlation_id: &CorrelationId,
    ) -> DomainResult<Option<Repository>> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.take_failure() {
            return Err(error);
        }

        Ok(self.repositories.lock().unwrap().get(&id).cloned())
    }
}

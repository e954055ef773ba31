//! Cache-first-with-fallback policy tests

use std::sync::Arc;
use std::time::Duration;

use reposcout_cache::CacheStore;
use reposcout_client::SearchCriteria;
use reposcout_common::{CorrelationId, DomainError, ErrorKind};
use reposcout_search::test_utils::{MockSearchClient, sample_repository, sample_results};
use reposcout_search::{RepositoryCoordinator, RepositoryProvider};
use tokio_test::assert_ok;

const TTL: Duration = Duration::from_secs(60);

fn coordinator_over(client: &Arc<MockSearchClient>) -> RepositoryCoordinator {
    let cache = Arc::new(CacheStore::new(TTL));
    RepositoryCoordinator::new(
        Arc::clone(client) as Arc<dyn reposcout_client::SearchClient>,
        cache,
    )
}

fn flutter_criteria() -> SearchCriteria {
    SearchCriteria::new("flutter", 30)
}

#[tokio::test]
async fn second_identical_query_within_ttl_never_reaches_the_client() {
    let client = Arc::new(MockSearchClient::new());
    client.insert_results(
        "flutter",
        sample_results(vec![sample_repository(1, "flutter")]),
    );
    let coordinator = coordinator_over(&client);

    let first = assert_ok!(
        coordinator
            .search_repositories(&flutter_criteria(), &CorrelationId::new())
            .await
    );
    let second = assert_ok!(
        coordinator
            .search_repositories(&flutter_criteria(), &CorrelationId::new())
            .await
    );

    assert_eq!(first, second);
    assert_eq!(client.search_call_count(), 1);
}

#[tokio::test]
async fn cache_keys_normalize_case_and_whitespace() {
    let client = Arc::new(MockSearchClient::new());
    client.insert_results(
        "flutter",
        sample_results(vec![sample_repository(1, "flutter")]),
    );
    let coordinator = coordinator_over(&client);

    assert_ok!(
        coordinator
            .search_repositories(&SearchCriteria::new("  Flutter ", 30), &CorrelationId::new())
            .await
    );
    assert_ok!(
        coordinator
            .search_repositories(&SearchCriteria::new("FLUTTER", 30), &CorrelationId::new())
            .await
    );

    assert_eq!(client.search_call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn expired_entry_is_served_when_the_remote_fails() {
    let client = Arc::new(MockSearchClient::new());
    let page = sample_results(vec![sample_repository(1, "flutter")]);
    client.insert_results("flutter", page.clone());
    let coordinator = coordinator_over(&client);

    assert_ok!(
        coordinator
            .search_repositories(&flutter_criteria(), &CorrelationId::new())
            .await
    );

    tokio::time::advance(TTL + Duration::from_secs(1)).await;
    client.fail_next(DomainError::network("rate limit exceeded"));

    let fallback = assert_ok!(
        coordinator
            .search_repositories(&flutter_criteria(), &CorrelationId::new())
            .await
    );

    assert_eq!(fallback, page);
    // The expired entry forced a second remote attempt before falling back.
    assert_eq!(client.search_call_count(), 2);
}

#[tokio::test]
async fn failure_with_no_cached_entry_propagates_mapped() {
    let client = Arc::new(MockSearchClient::new());
    client.fail_next(DomainError::network("service unavailable"));
    let coordinator = coordinator_over(&client);

    let err = coordinator
        .search_repositories(&flutter_criteria(), &CorrelationId::new())
        .await
        .expect_err("no fallback entry exists");

    assert_eq!(err, DomainError::network("service unavailable"));
}

#[tokio::test]
async fn successful_search_seeds_per_repository_entries() {
    let client = Arc::new(MockSearchClient::new());
    client.insert_results(
        "flutter",
        sample_results(vec![
            sample_repository(1, "flutter"),
            sample_repository(2, "flutter-engine"),
        ]),
    );
    let coordinator = coordinator_over(&client);

    assert_ok!(
        coordinator
            .search_repositories(&flutter_criteria(), &CorrelationId::new())
            .await
    );

    // Direct lookups hit the fanned-out entries without remote calls.
    let repo = assert_ok!(coordinator.get_repository(2, &CorrelationId::new()).await);
    assert_eq!(repo, Some(sample_repository(2, "flutter-engine")));
    assert_eq!(client.lookup_call_count(), 0);
}

#[tokio::test]
async fn lookup_misses_fall_through_to_the_remote_then_cache() {
    let client = Arc::new(MockSearchClient::new());
    client.insert_repository(sample_repository(7, "tokio"));
    let coordinator = coordinator_over(&client);

    let first = assert_ok!(coordinator.get_repository(7, &CorrelationId::new()).await);
    let second = assert_ok!(coordinator.get_repository(7, &CorrelationId::new()).await);

    assert_eq!(first, second);
    assert_eq!(client.lookup_call_count(), 1);
}

#[tokio::test]
async fn absent_repository_is_none_not_an_error() {
    let client = Arc::new(MockSearchClient::new());
    let coordinator = coordinator_over(&client);

    let found = assert_ok!(coordinator.get_repository(404, &CorrelationId::new()).await);
    assert!(found.is_none());
}

#[tokio::test]
async fn required_lookups_turn_absence_into_not_found() {
    let client = Arc::new(MockSearchClient::new());
    client.insert_repository(sample_repository(7, "tokio"));
    let coordinator = coordinator_over(&client);

    let repo = assert_ok!(coordinator.require_repository(7, &CorrelationId::new()).await);
    assert_eq!(repo, sample_repository(7, "tokio"));

    let err = coordinator
        .require_repository(404, &CorrelationId::new())
        .await
        .expect_err("absent id must error");
    assert_eq!(err, DomainError::NotFound(404));
}

#[tokio::test(start_paused = true)]
async fn lookup_failure_falls_back_to_stale_entity() {
    let client = Arc::new(MockSearchClient::new());
    client.insert_repository(sample_repository(7, "tokio"));
    let coordinator = coordinator_over(&client);

    assert_ok!(coordinator.get_repository(7, &CorrelationId::new()).await);
    tokio::time::advance(TTL + Duration::from_secs(1)).await;
    client.fail_next(DomainError::network("service unavailable"));

    let stale = assert_ok!(coordinator.get_repository(7, &CorrelationId::new()).await);
    assert_eq!(stale, Some(sample_repository(7, "tokio")));
}

#[tokio::test]
async fn lookup_failure_without_fallback_propagates() {
    let client = Arc::new(MockSearchClient::new());
    client.fail_next(DomainError::network("service unavailable"));
    let coordinator = coordinator_over(&client);

    let err = coordinator
        .get_repository(7, &CorrelationId::new())
        .await
        .expect_err("no fallback entity exists");

    assert_eq!(err.kind(), ErrorKind::Network);
}

//! Bootstrap wiring and lifecycle contract tests

use std::sync::Arc;

use reposcout::bootstrap;
use reposcout::{
    ApplicationConfig, CacheStore, GithubClient, RepositoryCoordinator, SearchState, SearchUseCase,
    ServiceRegistry,
};

#[test]
fn initialize_wires_the_whole_pipeline() {
    let registry = bootstrap::initialize(ApplicationConfig::default()).expect("bootstrap");

    assert!(registry.is_registered::<GithubClient>());
    assert!(registry.is_registered::<CacheStore>());
    assert!(registry.is_registered::<RepositoryCoordinator>());
    assert!(registry.is_registered::<SearchUseCase>());
    assert!(registry.is_registered::<ApplicationConfig>());
}

#[test]
fn coordinator_is_a_singleton_for_cache_persistence() {
    let registry = bootstrap::initialize(ApplicationConfig::default()).expect("bootstrap");

    let a = registry.get::<RepositoryCoordinator>().expect("resolve");
    let b = registry.get::<RepositoryCoordinator>().expect("resolve");
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn use_case_is_a_factory_yielding_fresh_instances() {
    let registry = bootstrap::initialize(ApplicationConfig::default()).expect("bootstrap");

    let a = registry.get::<SearchUseCase>().expect("resolve");
    let b = registry.get::<SearchUseCase>().expect("resolve");
    assert!(!Arc::ptr_eq(&a, &b));
}

#[test]
fn re_wiring_without_reset_fails_fast() {
    let registry = ServiceRegistry::new();
    bootstrap::wire(&registry, ApplicationConfig::default()).expect("first wiring");

    let again = bootstrap::wire(&registry, ApplicationConfig::default());
    assert!(again.is_err(), "double initialization must fail fast");

    registry.clear();
    bootstrap::wire(&registry, ApplicationConfig::default()).expect("wiring after reset");
}

#[test]
fn environment_bootstrap_uses_defaults_when_nothing_is_set() {
    let registry = bootstrap::initialize_from_env().expect("bootstrap from env");

    let config = registry.get::<ApplicationConfig>().expect("config");
    assert_eq!(config.api.base_url, "https://api.github.com");
}

#[test]
fn invalid_configuration_is_rejected_before_wiring() {
    let mut config = ApplicationConfig::default();
    config.api.base_url = "not a url".to_string();

    assert!(bootstrap::initialize(config).is_err());
}

#[tokio::test]
async fn built_controllers_start_empty() {
    let registry = bootstrap::initialize(ApplicationConfig::default()).expect("bootstrap");
    let controller = bootstrap::build_controller(&registry).expect("controller");

    assert_eq!(controller.current_state(), SearchState::Empty);

    // Blank input is handled synchronously and needs no remote.
    controller.on_text_changed("   ");
    assert_eq!(controller.current_state(), SearchState::Empty);

    controller.dispose();
}

//! Pipeline bootstrap and service wiring
//!
//! One initialization entry point builds the remote client, the cache store
//! and the coordinator as singletons (the cache must persist across calls)
//! and the use case as a factory (stateless). The registry comes back as an
//! explicit context object for the host to pass around.

use std::sync::Arc;
use std::time::Duration;

use reposcout_cache::CacheStore;
use reposcout_client::{GithubClient, SearchClient};
use reposcout_config::{ApplicationConfig, Validate};
use reposcout_search::{
    RepositoryCoordinator, RepositoryProvider, SearchController, SearchExecutor, SearchUseCase,
};
use tracing::info;

use crate::registry::ServiceRegistry;

/// Bootstrap result type
pub type BootstrapResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Validate the configuration and wire a fresh registry.
///
/// # Errors
///
/// Fails on invalid configuration or if the HTTP client cannot be built.
pub fn initialize(config: ApplicationConfig) -> BootstrapResult<ServiceRegistry> {
    config.validate()?;
    let registry = ServiceRegistry::new();
    wire(&registry, config)?;
    Ok(registry)
}

/// Load `.env`, install the tracing subscriber, and initialize from
/// environment configuration. Convenience entry point for hosts without
/// their own setup.
///
/// # Errors
///
/// Same failure modes as [`initialize`].
pub fn initialize_from_env() -> BootstrapResult<ServiceRegistry> {
    reposcout_common::initialize_environment();
    reposcout_common::init_tracing();
    initialize(ApplicationConfig::from_env())
}

/// Wire the pipeline services into an existing registry.
///
/// Wiring into a registry that already holds any of these registrations
/// fails fast with `AlreadyRegistered`; call
/// [`ServiceRegistry::clear`] first when re-initialization is intended.
///
/// # Errors
///
/// Fails if the HTTP client cannot be built or a registration collides.
pub fn wire(registry: &ServiceRegistry, config: ApplicationConfig) -> BootstrapResult<()> {
    info!("wiring search pipeline");

    registry.register_singleton(GithubClient::new(&config.api)?)?;
    registry.register_singleton(CacheStore::new(Duration::from_secs(
        config.cache.ttl_minutes.saturating_mul(60),
    )))?;

    let client = registry.get::<GithubClient>()?;
    let cache = registry.get::<CacheStore>()?;
    registry.register_singleton(RepositoryCoordinator::new(
        client as Arc<dyn SearchClient>,
        cache,
    ))?;

    let provider = registry.get::<RepositoryCoordinator>()?;
    registry.register_factory(move || {
        SearchUseCase::new(Arc::clone(&provider) as Arc<dyn RepositoryProvider>)
    })?;

    registry.register_singleton(config)?;
    Ok(())
}

/// Build a search controller over the wired pipeline.
///
/// Controllers are per-session: build one for each input stream you drive.
///
/// # Errors
///
/// Fails if the registry was not initialized with [`wire`].
pub fn build_controller(registry: &ServiceRegistry) -> BootstrapResult<SearchController> {
    let use_case = registry.get::<SearchUseCase>()?;
    let config = registry.get::<ApplicationConfig>()?;
    Ok(SearchController::new(
        use_case as Arc<dyn SearchExecutor>,
        &config.search,
    ))
}

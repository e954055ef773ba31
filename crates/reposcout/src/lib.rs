//! reposcout: debounced, cached, error-mapped repository search
//!
//! The facade crate wires the pipeline together and re-exports the pieces a
//! host needs. Call [`bootstrap::initialize`] once at startup and pass the
//! returned [`ServiceRegistry`] to your consumers; there is no hidden global
//! state.
//!
//! ```no_run
//! use reposcout::{ApplicationConfig, bootstrap};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let registry = bootstrap::initialize(ApplicationConfig::default())?;
//! let controller = bootstrap::build_controller(&registry)?;
//! controller.on_text_changed("flutter");
//! # Ok(())
//! # }
//! ```

pub mod bootstrap;
pub mod registry;

pub use registry::{RegistryError, RegistryResult, ServiceRegistry};

pub use reposcout_cache::CacheStore;
pub use reposcout_client::{
    GithubClient, Owner, Repository, SearchClient, SearchCriteria, SearchResults,
};
pub use reposcout_common::{CorrelationId, DomainError, DomainResult, ErrorKind};
pub use reposcout_config::ApplicationConfig;
pub use reposcout_search::{
    RepositoryCoordinator, RepositoryProvider, SearchController, SearchExecutor, SearchState,
    SearchUseCase,
};

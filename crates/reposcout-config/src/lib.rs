//! Centralized configuration for reposcout
//!
//! All settings follow a simple hierarchy:
//! 1. Safe defaults (defined as constants)
//! 2. Environment variable overrides
//! 3. Runtime validation
//!
//! Configuration is constructor-time only; nothing here mutates after the
//! pipeline is wired.

pub mod error;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use validation::{Validate, validate_non_empty, validate_range, validate_url};

// =============================================================================
// SAFE DEFAULTS - Work for any environment (dev, prod, test)
// =============================================================================

// Remote API Configuration
const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
const DEFAULT_API_TIMEOUT_SECONDS: u64 = 30; // Fixed per-call timeout
const DEFAULT_API_USER_AGENT: &str = "reposcout";

// Cache Configuration
const DEFAULT_CACHE_TTL_MINUTES: u64 = 15;

// Search Configuration
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300; // Trailing-edge debounce window
const DEFAULT_SEARCH_PAGE_SIZE: u32 = 30; // Items requested per search

/// Top-level configuration for the search pipeline
///
/// All settings have safe defaults and can be overridden via `REPOSCOUT_*`
/// environment variables.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ApplicationConfig {
    /// Remote repository-search API configuration
    pub api: ApiConfig,

    /// In-memory cache configuration
    pub cache: CacheConfig,

    /// Controller/search behavior configuration
    pub search: SearchConfig,
}

/// Remote API client configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ApiConfig {
    /// Base URL of the repository-search API
    pub base_url: String,

    /// Per-call timeout in seconds; a timeout surfaces as a network error
    pub timeout_seconds: u64,

    /// User agent sent with every request (the GitHub API requires one)
    pub user_agent: String,
}

/// Cache store configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CacheConfig {
    /// Time-to-live for cached entries, in minutes
    pub ttl_minutes: u64,
}

/// Search controller configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchConfig {
    /// Debounce window applied to text-change events, in milliseconds
    pub debounce_ms: u64,

    /// Page size requested from the remote API
    pub page_size: u32,
}

impl ApiConfig {
    /// Load from environment variables with safe defaults.
    pub fn from_env() -> Self {
        let base_url = std::env::var("REPOSCOUT_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let timeout_seconds = std::env::var("REPOSCOUT_API_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_API_TIMEOUT_SECONDS);

        let user_agent = std::env::var("REPOSCOUT_API_USER_AGENT")
            .unwrap_or_else(|_| DEFAULT_API_USER_AGENT.to_string());

        Self {
            base_url,
            timeout_seconds,
            user_agent,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_API_TIMEOUT_SECONDS,
            user_agent: DEFAULT_API_USER_AGENT.to_string(),
        }
    }
}

impl Validate for ApiConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_url(&self.base_url)?;
        validate_non_empty(&self.user_agent, "user_agent")?;
        validate_range(self.timeout_seconds, 1, 300, "timeout_seconds")?;
        Ok(())
    }
}

impl CacheConfig {
    /// Load from environment variables with safe defaults.
    pub fn from_env() -> Self {
        let ttl_minutes = std::env::var("REPOSCOUT_CACHE_TTL_MINUTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_CACHE_TTL_MINUTES);

        Self { ttl_minutes }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: DEFAULT_CACHE_TTL_MINUTES,
        }
    }
}

impl Validate for CacheConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_range(self.ttl_minutes, 1, 24 * 60, "ttl_minutes")
    }
}

impl SearchConfig {
    /// Load from environment variables with safe defaults.
    pub fn from_env() -> Self {
        let debounce_ms = std::env::var("REPOSCOUT_SEARCH_DEBOUNCE_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS);

        let page_size = std::env::var("REPOSCOUT_SEARCH_PAGE_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SEARCH_PAGE_SIZE);

        Self {
            debounce_ms,
            page_size,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            page_size: DEFAULT_SEARCH_PAGE_SIZE,
        }
    }
}

impl Validate for SearchConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_range(self.debounce_ms, 0, 5_000, "debounce_ms")?;
        validate_range(u64::from(self.page_size), 1, 100, "page_size")?;
        Ok(())
    }
}

impl ApplicationConfig {
    /// Load the full configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            api: ApiConfig::from_env(),
            cache: CacheConfig::from_env(),
            search: SearchConfig::from_env(),
        }
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            cache: CacheConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Validate for ApplicationConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.api.validate()?;
        self.cache.validate()?;
        self.search.validate()?;
        Ok(())
    }
}

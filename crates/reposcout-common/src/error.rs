//! Domain error taxonomy shared across the pipeline
//!
//! Every failure that crosses a layer boundary is collapsed into this closed
//! set of kinds. Layers map their own failures at the boundary where they
//! occur (the HTTP client maps transport errors, the use case maps anything
//! that slipped through), so callers only ever match on `DomainError`.

use thiserror::Error;

/// Closed set of domain failures produced by the search pipeline.
///
/// Each variant carries a human-readable message via its `Display`
/// implementation and a stable [`ErrorKind`] tag used for UI message mapping
/// and for equality assertions in tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Search criteria failed validation (query too short, page out of range).
    #[error("search criteria are invalid")]
    InvalidCriteria,

    /// A repository lookup required an entity that does not exist.
    #[error("repository {0} not found")]
    NotFound(u64),

    /// Transport-level failure: connection, timeout, or an HTTP status that
    /// maps to an unavailable or rate-limited service.
    #[error("network failure: {0}")]
    Network(String),

    /// The remote answered but the payload did not match the expected shape.
    #[error("could not process response: {0}")]
    Parsing(String),

    /// Anything that does not fit the categories above.
    #[error("unexpected failure: {0}")]
    Unknown(String),
}

/// Stable categorical tag for a [`DomainError`].
///
/// The tag survives message changes, so UI mapping and tests key on it
/// rather than on rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidCriteria,
    NotFound,
    Network,
    Parsing,
    Unknown,
}

impl DomainError {
    /// The stable kind tag for this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCriteria => ErrorKind::InvalidCriteria,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Network(_) => ErrorKind::Network,
            Self::Parsing(_) => ErrorKind::Parsing,
            Self::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// Build a `Network` error from any displayable detail.
    pub fn network(detail: impl Into<String>) -> Self {
        Self::Network(detail.into())
    }

    /// Build a `Parsing` error from any displayable detail.
    pub fn parsing(detail: impl Into<String>) -> Self {
        Self::Parsing(detail.into())
    }

    /// Build an `Unknown` error from any displayable detail.
    pub fn unknown(detail: impl Into<String>) -> Self {
        Self::Unknown(detail.into())
    }
}

// Catch-all mapping for failures no other boundary claimed.
impl From<anyhow::Error> for DomainError {
    fn from(err: anyhow::Error) -> Self {
        Self::Unknown(format!("{err:#}"))
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parsing(err.to_string())
    }
}

/// Result type for operations that fail with a [`DomainError`].
pub type DomainResult<T> = std::result::Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_are_stable() {
        assert_eq!(DomainError::InvalidCriteria.kind(), ErrorKind::InvalidCriteria);
        assert_eq!(DomainError::NotFound(7).kind(), ErrorKind::NotFound);
        assert_eq!(DomainError::network("down").kind(), ErrorKind::Network);
        assert_eq!(DomainError::parsing("bad json").kind(), ErrorKind::Parsing);
        assert_eq!(DomainError::unknown("boom").kind(), ErrorKind::Unknown);
    }

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(
            DomainError::NotFound(42).to_string(),
            "repository 42 not found"
        );
        assert_eq!(
            DomainError::network("rate limit exceeded").to_string(),
            "network failure: rate limit exceeded"
        );
    }

    #[test]
    fn unclaimed_failures_map_to_unknown() {
        let err: DomainError = anyhow::anyhow!("something odd").into();
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }

    #[test]
    fn json_failures_map_to_parsing() {
        let bad = serde_json::from_str::<serde_json::Value>("{not json");
        let err: DomainError = bad.expect_err("must fail").into();
        assert_eq!(err.kind(), ErrorKind::Parsing);
    }

    #[test]
    fn errors_compare_by_kind_and_payload() {
        assert_eq!(DomainError::network("a"), DomainError::network("a"));
        assert_ne!(DomainError::network("a"), DomainError::parsing("a"));
    }
}

//! Domain entities and the search criteria value object

use chrono::{DateTime, Duration, Utc};
use reposcout_common::{DomainError, DomainResult};

/// Star count above which a repository counts as popular.
const POPULAR_STAR_THRESHOLD: u32 = 1_000;

/// A repository counts as active when pushed to within this many days.
const ACTIVE_WINDOW_DAYS: i64 = 180;

/// Minimum meaningful query length after trimming.
const MIN_QUERY_LEN: usize = 2;

/// Largest page size the remote API accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// Validated-on-demand search request parameters.
///
/// Constructed fresh per search attempt and never mutated. Invalid values are
/// representable on purpose: validation is a use-case step, so tests can
/// drive the gate with bad input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub query: String,
    pub page: u32,
    pub per_page: u32,
}

impl SearchCriteria {
    /// Criteria for the first page with the given page size.
    pub fn new(query: impl Into<String>, per_page: u32) -> Self {
        Self {
            query: query.into(),
            page: 1,
            per_page,
        }
    }

    /// Same criteria, different page.
    pub fn with_page(self, page: u32) -> Self {
        Self { page, ..self }
    }

    /// Check the criteria invariant.
    ///
    /// Valid iff the trimmed query has at least two characters, `page >= 1`,
    /// and `per_page` is within `[1, 100]`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidCriteria`] on any violation.
    pub fn validate(&self) -> DomainResult<()> {
        if self.query.trim().chars().count() < MIN_QUERY_LEN {
            return Err(DomainError::InvalidCriteria);
        }
        if self.page < 1 {
            return Err(DomainError::InvalidCriteria);
        }
        if self.per_page < 1 || self.per_page > MAX_PER_PAGE {
            return Err(DomainError::InvalidCriteria);
        }
        Ok(())
    }
}

/// Owner of a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub id: u64,
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
}

/// A repository returned by the search API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub owner: Owner,
    pub star_count: u32,
    pub language: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub html_url: String,
}

impl Repository {
    /// More than a thousand stars.
    pub const fn is_popular(&self) -> bool {
        self.star_count > POPULAR_STAR_THRESHOLD
    }

    /// Updated within the last 180 days.
    pub fn is_active(&self) -> bool {
        Utc::now() - self.updated_at < Duration::days(ACTIVE_WINDOW_DAYS)
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub incomplete: bool,
}

impl<T> SearchResults<T> {
    /// Whether the remote holds more items beyond this page.
    pub fn has_more(&self) -> bool {
        self.total_count > self.items.len() as u64
    }
}

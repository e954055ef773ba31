//! Remote repository-search client
//!
//! Owns the domain entities, the wire payload types, and the [`SearchClient`]
//! seam. [`GithubClient`] is the production implementation: one HTTP attempt
//! per call, a fixed per-call timeout, and every transport or payload failure
//! mapped into the domain error taxonomy before it leaves this crate.

pub mod client;
pub mod models;
pub mod payload;

pub use client::{GithubClient, SearchClient};
pub use models::{Owner, Repository, SearchCriteria, SearchResults};

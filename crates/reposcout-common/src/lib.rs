//! Shared building blocks for the reposcout crates
//!
//! Holds the closed domain error taxonomy that crosses layer boundaries,
//! correlation ids for tracing requests through the pipeline, and one-time
//! environment/tracing initialization.

pub mod correlation;
pub mod error;
pub mod init;

pub use correlation::CorrelationId;
pub use error::{DomainError, DomainResult, ErrorKind};
pub use init::{init_tracing, initialize_environment};

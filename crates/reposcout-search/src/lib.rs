//! Search pipeline core: coordinator, use case, and controller
//!
//! Data flow: text-change event -> [`SearchController`] (debounce/cancel) ->
//! [`SearchUseCase`] (validate) -> [`RepositoryCoordinator`] (cache check ->
//! remote fetch -> cache write -> fallback) -> result -> controller emits a
//! new [`SearchState`].

pub mod controller;
pub mod coordinator;
pub mod use_case;

pub use controller::{SearchController, SearchState, user_message};
pub use coordinator::{RepositoryCoordinator, RepositoryProvider};
pub use use_case::{SearchExecutor, SearchUseCase};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

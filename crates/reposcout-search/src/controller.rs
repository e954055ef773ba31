//! Search controller state machine
//!
//! Receives raw text-change events, debounces them on the trailing edge, and
//! drives the use case. States are published through a `watch` channel and
//! replaced, never mutated. Only the most recently accepted event may
//! transition state: each dispatch takes a generation number and a result is
//! dropped on arrival if a newer event has been accepted since (switch-latest
//! semantics, so a slow response for a superseded query cannot overwrite a
//! faster later one).

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reposcout_client::{Repository, SearchCriteria};
use reposcout_common::{CorrelationId, ErrorKind};
use reposcout_config::SearchConfig;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::use_case::SearchExecutor;

/// UI-agnostic controller states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    /// Nothing to show; initial state and the state after blank input.
    Empty,
    /// A debounced search has been dispatched and is in flight.
    Loading,
    /// The most recent search succeeded.
    Success(Vec<Repository>),
    /// The most recent search failed; carries the mapped user-facing message.
    Error(String),
}

/// Fixed user-facing message for each error kind.
///
/// The controller never surfaces raw error text, only these.
pub const fn user_message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::InvalidCriteria => "enter at least 2 characters",
        ErrorKind::Network => "check your connection and try again",
        ErrorKind::Parsing => "could not process results",
        ErrorKind::NotFound => "no repositories found",
        ErrorKind::Unknown => "something went wrong, try again",
    }
}

/// Debouncing, cancellation-aware driver for the search use case.
///
/// Lives for the duration of the owning session; [`dispose`](Self::dispose)
/// releases pending timers and in-flight work.
pub struct SearchController {
    executor: Arc<dyn SearchExecutor>,
    debounce: Duration,
    page_size: u32,
    /// Highest accepted event. Bumped synchronously on every event, checked
    /// by dispatched tasks before every state transition.
    generation: Arc<AtomicU64>,
    state_tx: watch::Sender<SearchState>,
    shutdown: CancellationToken,
}

impl SearchController {
    pub fn new(executor: Arc<dyn SearchExecutor>, config: &SearchConfig) -> Self {
        let (state_tx, _) = watch::channel(SearchState::Empty);
        Self {
            executor,
            debounce: Duration::from_millis(config.debounce_ms),
            page_size: config.page_size,
            generation: Arc::new(AtomicU64::new(0)),
            state_tx,
            shutdown: CancellationToken::new(),
        }
    }

    /// Watch the controller's state. The receiver always holds the current
    /// state; every transition is observable as a change.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state_tx.subscribe()
    }

    /// Snapshot of the current state.
    pub fn current_state(&self) -> SearchState {
        self.state_tx.borrow().clone()
    }

    /// Feed one raw text-change event into the state machine.
    ///
    /// Blank input transitions to `Empty` synchronously and logically cancels
    /// any in-flight search. Non-blank input schedules a trailing-edge
    /// debounced evaluation; events arriving inside the window supersede the
    /// pending one.
    pub fn on_text_changed(&self, text: &str) {
        // Accepting the event supersedes everything dispatched before it.
        let generation = self
            .generation
            .fetch_add(1, Ordering::SeqCst)
            .wrapping_add(1);

        if text.trim().is_empty() {
            self.state_tx.send_replace(SearchState::Empty);
            return;
        }

        let executor = Arc::clone(&self.executor);
        let counter = Arc::clone(&self.generation);
        let state_tx = self.state_tx.clone();
        let shutdown = self.shutdown.clone();
        let debounce = self.debounce;
        let criteria = SearchCriteria::new(text, self.page_size);

        tokio::spawn(async move {
            tokio::select! {
                () = shutdown.cancelled() => return,
                () = tokio::time::sleep(debounce) => {}
            }

            // Trailing edge: a newer event restarted the window.
            if counter.load(Ordering::SeqCst) != generation {
                return;
            }

            state_tx.send_replace(SearchState::Loading);

            let correlation_id = CorrelationId::new();
            let outcome = executor.execute(&criteria, &correlation_id).await;

            // A newer event was accepted while we were in flight; its
            // outcome owns the state now, ours is discarded on arrival.
            if counter.load(Ordering::SeqCst) != generation {
                tracing::debug!(%correlation_id, "discarding superseded search result");
                return;
            }

            match outcome {
                Ok(items) => {
                    tracing::debug!(%correlation_id, count = items.len(), "search succeeded");
                    state_tx.send_replace(SearchState::Success(items));
                }
                Err(err) => {
                    tracing::debug!(%correlation_id, error = %err, "search failed");
                    state_tx.send_replace(SearchState::Error(
                        user_message(err.kind()).to_string(),
                    ));
                }
            }
        });
    }

    /// Release pending timers and in-flight work. Nothing transitions state
    /// after this.
    pub fn dispose(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.shutdown.cancel();
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

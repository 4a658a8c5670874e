//! Debounced address autocomplete
//!
//! Adapts free-text input into a candidate list from the geocoding port.
//! Keystrokes are debounced, at most one lookup is in flight per field, and
//! a generation token makes sure only the latest query's response is ever
//! applied, regardless of the order responses arrive in.

use std::sync::Arc;
use std::time::Duration;

use domain::entities::GeocodeCandidate;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

use crate::ports::{GeocodeHit, GeocodingPort};

/// Configuration for the address autocomplete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet window after the last keystroke before the lookup fires
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Trimmed queries shorter than this never reach the network
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    /// Maximum number of candidates requested per lookup
    #[serde(default = "default_limit")]
    pub limit: u8,
}

const fn default_debounce_ms() -> u64 {
    300
}

const fn default_min_query_len() -> usize {
    2
}

const fn default_limit() -> u8 {
    5
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_len: default_min_query_len(),
            limit: default_limit(),
        }
    }
}

impl SearchConfig {
    /// Configuration with a near-zero debounce window for tests
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            debounce_ms: 10,
            ..Self::default()
        }
    }
}

struct SearchState {
    generation: u64,
    pending: Option<JoinHandle<()>>,
    options: Vec<GeocodeCandidate>,
}

struct SearchInner {
    geocoder: Arc<dyn GeocodingPort>,
    config: SearchConfig,
    state: Mutex<SearchState>,
}

impl SearchInner {
    /// Install `options` if `generation` still identifies the latest query
    ///
    /// Returns `false` when a newer keystroke has superseded the query; the
    /// stale response is dropped without touching the list.
    fn apply_if_current(&self, generation: u64, options: Vec<GeocodeCandidate>) -> bool {
        let mut state = self.state.lock();
        if state.generation != generation {
            debug!(generation, current = state.generation, "Discarding stale search response");
            return false;
        }
        state.options = options;
        state.pending = None;
        true
    }
}

/// Debounced, race-safe autocomplete over the geocoding port
///
/// Cheap to clone; clones share the option list and debounce state.
#[derive(Clone)]
pub struct AddressSearch {
    inner: Arc<SearchInner>,
}

impl std::fmt::Debug for AddressSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddressSearch").finish_non_exhaustive()
    }
}

impl AddressSearch {
    /// Create a new autocomplete over the given geocoder
    #[must_use]
    pub fn new(geocoder: Arc<dyn GeocodingPort>, config: SearchConfig) -> Self {
        Self {
            inner: Arc::new(SearchInner {
                geocoder,
                config,
                state: Mutex::new(SearchState {
                    generation: 0,
                    pending: None,
                    options: Vec::new(),
                }),
            }),
        }
    }

    /// React to a keystroke
    ///
    /// Cancels the previously scheduled lookup. Short queries clear the
    /// option list immediately; longer ones schedule a lookup after the
    /// debounce window. Must be called from within a tokio runtime.
    #[instrument(skip(self))]
    pub fn input_changed(&self, text: &str) {
        let query = text.trim().to_string();
        let mut state = self.inner.state.lock();
        state.generation += 1;
        if let Some(handle) = state.pending.take() {
            handle.abort();
        }

        if query.chars().count() < self.inner.config.min_query_len {
            state.options.clear();
            return;
        }

        let generation = state.generation;
        let inner = Arc::clone(&self.inner);
        state.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(inner.config.debounce_ms)).await;
            let options = match inner.geocoder.geocode(&query, inner.config.limit).await {
                Ok(hits) => hits.iter().filter_map(GeocodeHit::candidate).collect(),
                Err(err) => {
                    debug!(query = %query, error = %err, "Geocode lookup failed");
                    Vec::new()
                },
            };
            inner.apply_if_current(generation, options);
        }));
    }

    /// Resolve a previously returned option by its exact display label
    ///
    /// Never re-queries. Returns `None` when the label no longer matches an
    /// option, e.g. because a newer response replaced the list.
    #[must_use]
    pub fn select(&self, label: &str) -> Option<GeocodeCandidate> {
        self.inner
            .state
            .lock()
            .options
            .iter()
            .find(|candidate| candidate.display_label == label)
            .cloned()
    }

    /// The current option list
    #[must_use]
    pub fn options(&self) -> Vec<GeocodeCandidate> {
        self.inner.state.lock().options.clone()
    }

    /// Drop the option list and cancel any scheduled lookup
    pub fn clear(&self) {
        let mut state = self.inner.state.lock();
        state.generation += 1;
        if let Some(handle) = state.pending.take() {
            handle.abort();
        }
        state.options.clear();
    }
}

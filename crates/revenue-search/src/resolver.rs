//! Keystroke-level stock search resolving to a single selection

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use revenue_core::{Selection, StockCandidate, StockDirectory};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::ResolverConfig;
use crate::debounce::Debouncer;
use crate::sequence::{Sequenced, SequencedSlot};

/// What [`SearchResolver::on_text_changed`] did with the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextChange {
    /// Text matched a known candidate label; it is now the selection
    Resolved(StockCandidate),
    /// A debounced lookup was (re)scheduled
    Scheduled,
    /// Input was emptied: selection cleared, default set requested
    Cleared,
    /// Input contains characters that never trigger a lookup
    Ignored,
}

/// Whether `text` is eligible for a directory lookup (non-empty ASCII alphanumerics)
pub fn is_lookup_query(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Counts one in-flight lookup until dropped, including when the lookup
/// future itself is dropped mid-request
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

struct ResolverInner {
    directory: Arc<dyn StockDirectory>,
    limit: Option<usize>,
    candidates: SequencedSlot<Vec<StockCandidate>>,
    selection: watch::Sender<Selection>,
    in_flight: AtomicUsize,
}

impl ResolverInner {
    async fn lookup(&self, query: &str) {
        let ticket = self.candidates.issue();
        let result = {
            let _in_flight = InFlight::enter(&self.in_flight);
            self.directory.search(query, self.limit).await
        };

        let candidates = match result {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!(query, error = %err, "stock directory lookup failed");
                Vec::new()
            }
        };

        let count = candidates.len();
        if self.candidates.apply(ticket, candidates) {
            debug!(query, ticket, count, "candidate set replaced");
        } else {
            debug!(query, ticket, "discarding stale directory response");
        }
    }

    fn find_candidate(&self, text: &str) -> Option<StockCandidate> {
        self.candidates
            .borrow()
            .value
            .iter()
            .find(|candidate| candidate.display_name == text)
            .cloned()
    }

    fn set_selection(&self, selection: Selection) {
        self.selection.send_if_modified(|current| {
            if *current == selection {
                return false;
            }
            match &selection {
                Some(candidate) => info!(id = %candidate.id, "stock selected"),
                None => info!("selection cleared"),
            }
            *current = selection;
            true
        });
    }
}

/// Maps free-text input to a selected [`StockCandidate`]
///
/// Owns the current candidate set and the selection. Creating a resolver
/// issues an unfiltered lookup so a default candidate set is available before
/// any input; dropping it (or calling [`shutdown`](Self::shutdown)) cancels
/// any lookup still waiting for its debounce window.
///
/// Must be created and driven from within a tokio runtime.
pub struct SearchResolver {
    inner: Arc<ResolverInner>,
    debouncer: Debouncer,
}

impl SearchResolver {
    pub fn new(directory: Arc<dyn StockDirectory>, config: ResolverConfig) -> Self {
        let (selection, _) = watch::channel(None);
        let resolver = Self {
            inner: Arc::new(ResolverInner {
                directory,
                limit: config.limit,
                candidates: SequencedSlot::new(Vec::new()),
                selection,
                in_flight: AtomicUsize::new(0),
            }),
            debouncer: Debouncer::new(config.debounce),
        };

        resolver.spawn_lookup(String::new());
        resolver
    }

    /// Handle one input mutation
    pub fn on_text_changed(&self, text: &str) -> TextChange {
        if let Some(candidate) = self.inner.find_candidate(text) {
            self.inner.set_selection(Some(candidate.clone()));
            return TextChange::Resolved(candidate);
        }

        if is_lookup_query(text) {
            let inner = Arc::clone(&self.inner);
            let query = text.to_string();
            debug!(query = %query, "scheduling debounced lookup");
            self.debouncer.schedule(async move {
                inner.lookup(&query).await;
            });
            return TextChange::Scheduled;
        }

        if text.is_empty() {
            self.debouncer.cancel();
            self.inner.set_selection(None);
            self.spawn_lookup(String::new());
            return TextChange::Cleared;
        }

        TextChange::Ignored
    }

    /// Query the directory and replace the candidate set with the response
    ///
    /// An empty `query` requests the default set. Failures are logged and
    /// leave an empty candidate set. A response older than one already
    /// applied is discarded.
    pub async fn lookup(&self, query: &str) {
        self.inner.lookup(query).await;
    }

    /// Explicitly select `candidate`
    pub fn select(&self, candidate: StockCandidate) {
        self.inner.set_selection(Some(candidate));
    }

    /// Explicitly clear the selection
    pub fn clear_selection(&self) {
        self.inner.set_selection(None);
    }

    pub fn candidates(&self) -> Vec<StockCandidate> {
        self.inner.candidates.get()
    }

    pub fn subscribe_candidates(&self) -> watch::Receiver<Sequenced<Vec<StockCandidate>>> {
        self.inner.candidates.subscribe()
    }

    pub fn selection(&self) -> Selection {
        self.inner.selection.borrow().clone()
    }

    pub fn subscribe_selection(&self) -> watch::Receiver<Selection> {
        self.inner.selection.subscribe()
    }

    /// Whether any directory lookup is in flight
    pub fn is_loading(&self) -> bool {
        self.inner.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Ticket of the most recently started lookup
    ///
    /// Compare with [`Sequenced::ticket`] on the candidate channel to tell
    /// whether the newest lookup has landed.
    pub fn latest_lookup(&self) -> u64 {
        self.inner.candidates.issued()
    }

    /// Whether a debounced lookup is waiting for its window
    pub fn has_pending_lookup(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Cancel any pending debounced lookup
    pub fn shutdown(&self) {
        self.debouncer.cancel();
    }

    fn spawn_lookup(&self, query: String) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            inner.lookup(&query).await;
        })
    }
}

//! Selection-driven revenue loading

use std::sync::Arc;

use revenue_core::{DateRange, ProcessedRevenue, RevenueSeriesProcessor, RevenueSource, Selection};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::sequence::{Sequenced, SequencedSlot};

/// Views for one selection
#[derive(Debug, Clone, PartialEq)]
pub struct RevenueState {
    /// Stock the views belong to
    pub stock: Selection,
    pub views: ProcessedRevenue,
}

impl RevenueState {
    /// No selection, both views empty
    pub fn idle() -> Self {
        Self {
            stock: None,
            views: ProcessedRevenue::empty(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.views.chart.is_loading() || self.views.table.is_loading()
    }
}

impl Default for RevenueState {
    fn default() -> Self {
        Self::idle()
    }
}

struct LoaderInner {
    source: Arc<dyn RevenueSource>,
    processor: RevenueSeriesProcessor,
    range: Option<DateRange>,
    state: SequencedSlot<RevenueState>,
}

impl LoaderInner {
    async fn load(&self, selection: Selection) {
        let ticket = self.state.issue();
        self.load_ticketed(ticket, selection).await;
    }

    async fn load_ticketed(&self, ticket: u64, selection: Selection) {
        let Some(stock) = selection else {
            self.state.apply(ticket, RevenueState::idle());
            return;
        };

        self.state.apply(
            ticket,
            RevenueState {
                stock: Some(stock.clone()),
                views: ProcessedRevenue::loading(),
            },
        );

        let views = match self.source.monthly_revenue(&stock.id, self.range).await {
            Ok(records) => {
                info!(id = %stock.id, records = records.len(), "monthly revenue fetched");
                self.processor.process(&records)
            }
            Err(err) => {
                warn!(id = %stock.id, error = %err, "monthly revenue fetch failed");
                ProcessedRevenue::empty()
            }
        };

        let state = RevenueState {
            stock: Some(stock),
            views,
        };
        if !self.state.apply(ticket, state) {
            debug!(ticket, "discarding stale revenue response");
        }
    }
}

/// Fetches and processes monthly revenue for the current selection
///
/// Every [`load`](Self::load) takes a ticket; only the newest load can
/// publish, so switching stocks quickly never shows an older stock's data.
#[derive(Clone)]
pub struct RevenueLoader {
    inner: Arc<LoaderInner>,
}

impl RevenueLoader {
    pub fn new(source: Arc<dyn RevenueSource>, processor: RevenueSeriesProcessor) -> Self {
        Self::with_range(source, processor, None)
    }

    /// Restrict fetches to `range`; `None` uses the source's default window
    pub fn with_range(
        source: Arc<dyn RevenueSource>,
        processor: RevenueSeriesProcessor,
        range: Option<DateRange>,
    ) -> Self {
        Self {
            inner: Arc::new(LoaderInner {
                source,
                processor,
                range,
                state: SequencedSlot::new(RevenueState::idle()),
            }),
        }
    }

    pub fn processor(&self) -> RevenueSeriesProcessor {
        self.inner.processor
    }

    pub fn range(&self) -> Option<DateRange> {
        self.inner.range
    }

    /// Load views for `selection`; `None` resets to [`RevenueState::idle`]
    pub async fn load(&self, selection: Selection) {
        self.inner.load(selection).await;
    }

    pub fn state(&self) -> RevenueState {
        self.inner.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<Sequenced<RevenueState>> {
        self.inner.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().value.is_loading()
    }

    /// Spawn a task that loads on every change of `selection`
    ///
    /// The current value is loaded first. Each change starts its own load
    /// so an in-flight fetch does not hold up a newer selection. The task
    /// ends when the sender side is dropped.
    pub fn follow(&self, mut selection: watch::Receiver<Selection>) -> JoinHandle<()> {
        let loader = self.clone();
        tokio::spawn(async move {
            loop {
                let current = selection.borrow_and_update().clone();
                let inner = Arc::clone(&loader.inner);
                // Ticket taken here so tickets follow selection order
                let ticket = inner.state.issue();
                tokio::spawn(async move {
                    inner.load_ticketed(ticket, current).await;
                });

                if selection.changed().await.is_err() {
                    debug!("selection channel closed");
                    break;
                }
            }
        })
    }
}

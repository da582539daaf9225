//! Search-to-selection resolution and revenue loading for revenue-rs
//!
//! - [`SearchResolver`] turns keystroke-level input into a selected
//!   [`StockCandidate`](revenue_core::StockCandidate). Lookups are debounced,
//!   the pending one is cancellable, and out-of-order responses are discarded
//!   through a per-operation request sequence.
//! - [`RevenueLoader`] follows the selection, fetches the raw monthly records
//!   and runs them through the
//!   [`RevenueSeriesProcessor`](revenue_core::RevenueSeriesProcessor).
//! - [`RevenueSession`] wires the two together the way a front-end uses them.

pub mod config;
pub mod debounce;
pub mod loader;
pub mod resolver;
pub mod sequence;
pub mod session;

pub use config::ResolverConfig;
pub use debounce::Debouncer;
pub use loader::{RevenueLoader, RevenueState};
pub use resolver::{SearchResolver, TextChange, is_lookup_query};
pub use sequence::{Sequenced, SequencedSlot};
pub use session::RevenueSession;

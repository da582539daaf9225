//! Resolver configuration

use std::time::Duration;

/// Quiet period before a typed query is looked up
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Default result-count cap for directory lookups
pub const DEFAULT_LIMIT: usize = 20;

/// Configuration for [`SearchResolver`](crate::SearchResolver)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Quiescence window collapsing bursts of keystrokes into one lookup
    pub debounce: Duration,
    /// Result-count cap passed to the directory
    pub limit: Option<usize>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            limit: Some(DEFAULT_LIMIT),
        }
    }
}

impl ResolverConfig {
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

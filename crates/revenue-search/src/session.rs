//! A resolver and a loader wired together

use std::sync::Arc;

use revenue_core::{DateRange, RevenueSeriesProcessor, RevenueSource, StockDirectory};
use tokio::task::JoinHandle;

use crate::config::ResolverConfig;
use crate::loader::RevenueLoader;
use crate::resolver::SearchResolver;

/// One search box driving one revenue display
///
/// Every selection the resolver settles on is loaded by the loader.
/// Dropping the session stops following the selection and cancels any
/// pending debounced lookup.
pub struct RevenueSession {
    resolver: SearchResolver,
    loader: RevenueLoader,
    follower: JoinHandle<()>,
}

impl RevenueSession {
    pub fn new(
        directory: Arc<dyn StockDirectory>,
        source: Arc<dyn RevenueSource>,
        config: ResolverConfig,
        processor: RevenueSeriesProcessor,
        range: Option<DateRange>,
    ) -> Self {
        let resolver = SearchResolver::new(directory, config);
        let loader = RevenueLoader::with_range(source, processor, range);
        let follower = loader.follow(resolver.subscribe_selection());

        Self {
            resolver,
            loader,
            follower,
        }
    }

    pub fn resolver(&self) -> &SearchResolver {
        &self.resolver
    }

    pub fn loader(&self) -> &RevenueLoader {
        &self.loader
    }

    /// Whether the directory or the revenue source has a request in flight
    pub fn is_loading(&self) -> bool {
        self.resolver.is_loading() || self.loader.is_loading()
    }

    pub fn shutdown(&self) {
        self.resolver.shutdown();
        self.follower.abort();
    }
}

impl Drop for RevenueSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

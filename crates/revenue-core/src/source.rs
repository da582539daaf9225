//! Collaborator traits for the stock directory and the revenue data source

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{DateRange, RevenueRecord, StockCandidate};

/// External stock directory used by search
#[async_trait]
pub trait StockDirectory: Send + Sync {
    /// Look up candidates matching `query`
    ///
    /// An empty `query` asks for the unfiltered default set. `limit` caps the
    /// number of returned candidates.
    async fn search(&self, query: &str, limit: Option<usize>) -> Result<Vec<StockCandidate>>;
}

/// External source of monthly revenue records
#[async_trait]
pub trait RevenueSource: Send + Sync {
    /// Fetch the monthly revenue records of `stock_id`
    ///
    /// Records may come back in any order and with missing months. `None`
    /// lets the source apply its default range.
    async fn monthly_revenue(
        &self,
        stock_id: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<RevenueRecord>>;
}

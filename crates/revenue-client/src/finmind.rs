//! FinMind API client

use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use revenue_core::{DateRange, RevenueRecord, RevenueSource, StockCandidate, StockDirectory};
use serde_json::Value;
use tracing::debug;

use crate::config::FinMindConfig;
use crate::envelope::{self, MonthRevenueRow, StockInfoRow};
use crate::error::{ClientError, Result};

/// Dataset listing every stock with its name and market
pub const STOCK_INFO_DATASET: &str = "TaiwanStockInfo";
/// Dataset of monthly revenue reports
pub const MONTH_REVENUE_DATASET: &str = "TaiwanStockMonthRevenue";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// FinMind API client
#[derive(Debug, Clone)]
pub struct FinMindClient {
    client: Client,
    config: Arc<FinMindConfig>,
    rate_limiter: SharedRateLimiter,
}

impl FinMindClient {
    /// Create a client from a validated configuration
    pub fn new(config: Arc<FinMindConfig>) -> Result<Self> {
        config.validate()?;

        let per_minute = NonZeroU32::new(config.rate_limit_per_minute).ok_or_else(|| {
            ClientError::ConfigError("rate_limit_per_minute must be greater than 0".to_string())
        })?;
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));

        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    /// Create from environment variable FINMIND_API_TOKEN with default settings
    pub fn from_env() -> Result<Self> {
        let config = FinMindConfig::builder().with_env_token().build()?;
        Self::new(Arc::new(config))
    }

    pub fn config(&self) -> &FinMindConfig {
        &self.config
    }

    /// Issue one dataset request and return the raw JSON body
    async fn fetch_dataset(&self, dataset: &str, params: &[(&str, String)]) -> Result<Value> {
        // Wait for rate limiter
        self.rate_limiter.until_ready().await;

        let mut query: Vec<(&str, &str)> = vec![("dataset", dataset)];
        query.extend(params.iter().map(|(k, v)| (*k, v.as_str())));

        let mut request = self.client.get(&self.config.api_base).query(&query);
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        debug!(dataset, ?params, "FinMind request");
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(ClientError::HttpStatus(response.status()));
        }

        // Decode separately so malformed bodies surface as JSON errors, not network errors
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Stock directory lookup
    ///
    /// An empty `query` returns the unfiltered listing. `limit` falls back to
    /// the configured directory limit.
    pub async fn stock_info(
        &self,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<StockCandidate>> {
        let mut params = Vec::new();
        if !query.is_empty() {
            params.push(("data_id", query.to_string()));
        }

        let body = self.fetch_dataset(STOCK_INFO_DATASET, &params).await?;
        let rows: Vec<StockInfoRow> = envelope::decode_rows(body)?;
        let total = rows.len();

        let candidates =
            envelope::candidates_from_rows(rows, limit.unwrap_or(self.config.directory_limit));
        debug!(query, total, returned = candidates.len(), "stock directory lookup");
        Ok(candidates)
    }

    /// Monthly revenue lookup
    ///
    /// Without an explicit range the last `history_years` years up to today
    /// are requested.
    pub async fn month_revenue(
        &self,
        stock_id: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<RevenueRecord>> {
        let range = range.unwrap_or_else(|| self.default_range());
        let params = [
            ("data_id", stock_id.to_string()),
            ("start_date", range.start.format("%Y-%m-%d").to_string()),
            ("end_date", range.end.format("%Y-%m-%d").to_string()),
        ];

        let body = self.fetch_dataset(MONTH_REVENUE_DATASET, &params).await?;
        let rows: Vec<MonthRevenueRow> = envelope::decode_rows(body)?;
        debug!(stock_id, records = rows.len(), "monthly revenue lookup");

        Ok(rows.into_iter().map(RevenueRecord::from).collect())
    }

    fn default_range(&self) -> DateRange {
        DateRange::trailing_years(chrono::Local::now().date_naive(), self.config.history_years)
    }
}

#[async_trait]
impl StockDirectory for FinMindClient {
    async fn search(
        &self,
        query: &str,
        limit: Option<usize>,
    ) -> revenue_core::Result<Vec<StockCandidate>> {
        Ok(self.stock_info(query, limit).await?)
    }
}

#[async_trait]
impl RevenueSource for FinMindClient {
    async fn monthly_revenue(
        &self,
        stock_id: &str,
        range: Option<DateRange>,
    ) -> revenue_core::Result<Vec<RevenueRecord>> {
        Ok(self.month_revenue(stock_id, range).await?)
    }
}

//! FinMind client for revenue-rs
//!
//! Implements the [`StockDirectory`](revenue_core::StockDirectory) and
//! [`RevenueSource`](revenue_core::RevenueSource) collaborators on top of the
//! FinMind v4 data API:
//!
//! - `TaiwanStockInfo` backs the stock directory
//! - `TaiwanStockMonthRevenue` backs the monthly revenue lookup
//!
//! Credentials and endpoints live in an explicit [`FinMindConfig`] built once
//! at startup and shared behind an `Arc`.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use revenue_client::{FinMindClient, FinMindConfig};
//! use revenue_core::StockDirectory;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(FinMindConfig::builder().with_env_token().build()?);
//!     let client = FinMindClient::new(config)?;
//!
//!     for candidate in client.search("2330", None).await? {
//!         println!("{}", candidate.display_name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod envelope;
pub mod error;
pub mod finmind;

pub use config::{FinMindConfig, FinMindConfigBuilder};
pub use error::{ClientError, Result};
pub use finmind::FinMindClient;

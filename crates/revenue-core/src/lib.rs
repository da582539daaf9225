//! Core abstractions for revenue-rs
//!
//! This crate holds everything that does not touch the network or the terminal:
//!
//! - The data model (`StockCandidate`, `Selection`, `RevenueRecord`, `DerivedPeriod`)
//! - The error taxonomy shared by every collaborator
//! - The `StockDirectory` and `RevenueSource` collaborator traits
//! - `RevenueSeriesProcessor`, which sorts raw monthly records, aligns each
//!   period with the same calendar month one year earlier and computes the
//!   year-over-year growth rate
//! - The chart and table adapters that consume the aligned series
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use revenue_core::{RevenueRecord, RevenueSeriesProcessor};
//!
//! let records: Vec<RevenueRecord> = (0..13)
//!     .filter_map(|m| {
//!         let date = NaiveDate::from_ymd_opt(2022 + m / 12, (m % 12) as u32 + 1, 1)?;
//!         Some(RevenueRecord::new(date, "2330", if m == 12 { 1200.0 } else { 1000.0 }))
//!     })
//!     .collect();
//!
//! let processed = RevenueSeriesProcessor::default().process(&records);
//! let table = processed.table.as_ready().unwrap();
//! assert_eq!(table.columns(), vec!["202301".to_string()]);
//! ```

pub mod chart;
pub mod error;
pub mod model;
pub mod series;
pub mod source;
pub mod table;
pub mod view;

pub use chart::ChartSeries;
pub use error::{Error, Result};
pub use model::{DateRange, DerivedPeriod, RevenueRecord, Selection, StockCandidate};
pub use series::{
    AlignedPeriod, Alignment, COMPARISON_LAG, PeriodFormat, ProcessedRevenue,
    RevenueSeriesProcessor, align, growth_rate,
};
pub use source::{RevenueSource, StockDirectory};
pub use table::RevenueTable;
pub use view::View;

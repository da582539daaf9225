//! Data model shared by the resolver, the loader and the adapters

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A selectable search result
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockCandidate {
    /// Unique external identifier (e.g. "2330")
    pub id: String,
    /// Human label, name followed by the id
    pub display_name: String,
}

impl StockCandidate {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    /// Build a candidate from a directory listing, labelled `"{name} ({id})"`
    pub fn from_listing(id: impl Into<String>, name: &str) -> Self {
        let id = id.into();
        let display_name = format!("{name} ({id})");
        Self { id, display_name }
    }
}

/// The single currently chosen stock, or none
pub type Selection = Option<StockCandidate>;

/// One monthly revenue observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueRecord {
    pub period_date: NaiveDate,
    pub stock_id: String,
    pub amount: f64,
}

impl RevenueRecord {
    pub fn new(period_date: NaiveDate, stock_id: impl Into<String>, amount: f64) -> Self {
        Self {
            period_date,
            stock_id: stock_id.into(),
            amount,
        }
    }
}

/// One labelled output period, ready for a presentation sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedPeriod {
    pub period_label: String,
    pub amount: f64,
    /// `None` when no valid prior-year comparison exists
    pub growth_rate_percent: Option<f64>,
}

/// Inclusive calendar date range for revenue lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::Config(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Range covering `years` calendar years ending on `end`
    pub fn trailing_years(end: NaiveDate, years: u32) -> Self {
        let start = end
            .checked_sub_months(Months::new(years.saturating_mul(12)))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_from_listing() {
        let candidate = StockCandidate::from_listing("2330", "台積電");
        assert_eq!(candidate.id, "2330");
        assert_eq!(candidate.display_name, "台積電 (2330)");
    }

    #[test]
    fn test_trailing_years() {
        let end = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let range = DateRange::trailing_years(end, 6);
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2020, 10, 17).unwrap());
        assert_eq!(range.end, end);
    }

    #[test]
    fn test_trailing_years_clamps_leap_day() {
        let end = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let range = DateRange::trailing_years(end, 1);
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert!(DateRange::new(start, end).is_err());
        assert!(DateRange::new(end, start).is_ok());
    }
}

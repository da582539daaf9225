//! Table adapter: one `YYYYMM` column per period, a revenue row and a growth row

use serde::Serialize;

use crate::model::DerivedPeriod;
use crate::series::{AlignedPeriod, PeriodFormat};
use crate::view::View;

pub const HEADER_LABEL: &str = "年度月份";
pub const REVENUE_ROW_LABEL: &str = "每月營收";
pub const GROWTH_ROW_LABEL: &str = "單月營收年增率 (%)";
/// Growth cell shown when there is no prior-year comparison
pub const MISSING_GROWTH: &str = "—";

/// Table-ready series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueTable {
    periods: Vec<DerivedPeriod>,
}

impl RevenueTable {
    pub fn from_periods(periods: &[AlignedPeriod]) -> Self {
        Self {
            periods: periods
                .iter()
                .map(|period| period.to_derived(PeriodFormat::Compact))
                .collect(),
        }
    }

    /// `NoData` when `periods` is empty
    pub fn view(periods: &[AlignedPeriod]) -> View<Self> {
        if periods.is_empty() {
            View::NoData
        } else {
            View::Ready(Self::from_periods(periods))
        }
    }

    pub fn periods(&self) -> &[DerivedPeriod] {
        &self.periods
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Keep only the most recent `count` columns
    pub fn last(&self, count: usize) -> Self {
        let skip = self.periods.len().saturating_sub(count);
        Self {
            periods: self.periods[skip..].to_vec(),
        }
    }

    pub fn columns(&self) -> Vec<String> {
        self.periods.iter().map(|p| p.period_label.clone()).collect()
    }

    pub fn growth_rates(&self) -> Vec<Option<f64>> {
        self.periods.iter().map(|p| p.growth_rate_percent).collect()
    }

    /// Header row, starting with the row-label column
    pub fn header(&self) -> Vec<String> {
        std::iter::once(HEADER_LABEL.to_string())
            .chain(self.columns())
            .collect()
    }

    /// The two formatted body rows: revenue, then growth rate
    pub fn rows(&self) -> Vec<Vec<String>> {
        let revenue = std::iter::once(REVENUE_ROW_LABEL.to_string())
            .chain(self.periods.iter().map(|p| format_amount(p.amount)))
            .collect();
        let growth = std::iter::once(GROWTH_ROW_LABEL.to_string())
            .chain(self.periods.iter().map(|p| format_growth(p.growth_rate_percent)))
            .collect();
        vec![revenue, growth]
    }
}

/// Format with thousands separators and at most three fraction digits
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && (integer != "0" || !fraction.is_empty());
    let sign = if negative { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

/// Two decimals, or an em dash when there is no comparison
pub fn format_growth(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING_GROWTH.to_string(), |v| format!("{v:.2}"))
}

//! Year-over-year alignment of monthly revenue
//!
//! Both presentation adapters are fed from [`align`], so the chart and the
//! table can never disagree about which prior-year month a period is compared
//! against.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::chart::ChartSeries;
use crate::model::{DerivedPeriod, RevenueRecord};
use crate::table::RevenueTable;
use crate::view::View;

/// Number of leading periods without any possible prior-year comparison
pub const COMPARISON_LAG: usize = 12;

/// How the "same month last year" record is located
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Match on `(year - 1, month)` across the whole collection.
    ///
    /// Robust to gaps elsewhere in the sequence; yields no comparison only
    /// when that exact prior-year month is absent.
    #[default]
    Calendar,
    /// Take the record twelve sorted positions earlier.
    ///
    /// Only correct on gap-free data: a single missing month shifts every
    /// later comparison by one month.
    Index,
}

/// Label style of an output period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodFormat {
    /// `YYYY/MM`, used on the chart axis
    Slashed,
    /// `YYYYMM`, used as table column headers
    Compact,
}

impl PeriodFormat {
    pub fn label(self, date: NaiveDate) -> String {
        match self {
            Self::Slashed => format!("{}/{:02}", date.year(), date.month()),
            Self::Compact => format!("{}{:02}", date.year(), date.month()),
        }
    }
}

/// A sorted period with its growth rate, before labelling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedPeriod {
    pub period_date: NaiveDate,
    pub amount: f64,
    pub growth_rate_percent: Option<f64>,
}

impl AlignedPeriod {
    pub fn to_derived(&self, format: PeriodFormat) -> DerivedPeriod {
        DerivedPeriod {
            period_label: format.label(self.period_date),
            amount: self.amount,
            growth_rate_percent: self.growth_rate_percent,
        }
    }
}

/// Percentage change of `current` versus `prior`
///
/// `None` when `prior` is exactly zero or either value is not finite.
#[allow(clippy::float_cmp)]
pub fn growth_rate(current: f64, prior: f64) -> Option<f64> {
    if prior == 0.0 || !prior.is_finite() || !current.is_finite() {
        return None;
    }
    Some((current / prior - 1.0) * 100.0)
}

/// Sort `records` by period and annotate each with its year-over-year growth
///
/// The first [`COMPARISON_LAG`] sorted records are dropped from the output.
/// Records sharing a period keep their input order.
pub fn align(records: &[RevenueRecord], alignment: Alignment) -> Vec<AlignedPeriod> {
    let mut sorted: Vec<&RevenueRecord> = records.iter().collect();
    sorted.sort_by_key(|record| record.period_date);

    let mut by_month: HashMap<(i32, u32), f64> = HashMap::new();
    if alignment == Alignment::Calendar {
        for record in &sorted {
            let key = (record.period_date.year(), record.period_date.month());
            by_month.entry(key).or_insert(record.amount);
        }
    }

    sorted
        .iter()
        .enumerate()
        .skip(COMPARISON_LAG)
        .map(|(position, record)| {
            let prior = match alignment {
                Alignment::Index => Some(sorted[position - COMPARISON_LAG].amount),
                Alignment::Calendar => by_month
                    .get(&(record.period_date.year() - 1, record.period_date.month()))
                    .copied(),
            };

            AlignedPeriod {
                period_date: record.period_date,
                amount: record.amount,
                growth_rate_percent: prior.and_then(|prior| growth_rate(record.amount, prior)),
            }
        })
        .collect()
}

/// Both presentation views of one revenue collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedRevenue {
    pub chart: View<ChartSeries>,
    pub table: View<RevenueTable>,
}

impl ProcessedRevenue {
    /// Both sinks in the "no data" state
    pub fn empty() -> Self {
        Self {
            chart: View::NoData,
            table: View::NoData,
        }
    }

    /// Both sinks in the "loading" state
    pub fn loading() -> Self {
        Self {
            chart: View::Loading,
            table: View::Loading,
        }
    }
}

/// Turns raw revenue records into the chart and table views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevenueSeriesProcessor {
    alignment: Alignment,
}

impl RevenueSeriesProcessor {
    pub fn new(alignment: Alignment) -> Self {
        Self { alignment }
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Aligned periods shared by both adapters
    pub fn derive(&self, records: &[RevenueRecord]) -> Vec<AlignedPeriod> {
        align(records, self.alignment)
    }

    pub fn process(&self, records: &[RevenueRecord]) -> ProcessedRevenue {
        let periods = self.derive(records);
        tracing::debug!(
            records = records.len(),
            periods = periods.len(),
            alignment = ?self.alignment,
            "processed revenue series"
        );

        ProcessedRevenue {
            chart: ChartSeries::view(&periods),
            table: RevenueTable::view(&periods),
        }
    }
}

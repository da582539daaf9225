//! Chart adapter: categorical `YYYY/MM` axis, revenue bars and a growth-rate line

use serde::Serialize;
use serde_json::{Value, json};

use crate::model::DerivedPeriod;
use crate::series::{AlignedPeriod, PeriodFormat};
use crate::view::View;

pub const REVENUE_SERIES_NAME: &str = "每月營收";
pub const GROWTH_SERIES_NAME: &str = "單月營收年增率 (%)";
/// Revenue axis unit, thousands of the reporting currency
pub const REVENUE_AXIS_NAME: &str = "千元";

/// Chart-ready series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    periods: Vec<DerivedPeriod>,
}

impl ChartSeries {
    pub fn from_periods(periods: &[AlignedPeriod]) -> Self {
        Self {
            periods: periods
                .iter()
                .map(|period| period.to_derived(PeriodFormat::Slashed))
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

    /// X-axis categories
    pub fn categories(&self) -> Vec<String> {
        self.periods.iter().map(|p| p.period_label.clone()).collect()
    }

    /// Left-axis values
    pub fn revenues(&self) -> Vec<f64> {
        self.periods.iter().map(|p| p.amount).collect()
    }

    /// Right-axis values, `None` renders as a gap
    pub fn growth_rates(&self) -> Vec<Option<f64>> {
        self.periods.iter().map(|p| p.growth_rate_percent).collect()
    }

    /// ECharts option describing a bar + line chart on two value axes
    ///
    /// Revenue is emitted in thousands so the bar values match the axis unit.
    /// Category labels stay `YYYY/MM` and are thinned with an axis-label
    /// `interval` of 12. Shortening them to the year needs a JavaScript
    /// formatter, which a JSON option cannot carry.
    pub fn to_echarts_option(&self) -> Value {
        let revenues: Vec<f64> = self.periods.iter().map(|p| p.amount / 1000.0).collect();

        json!({
            "tooltip": {
                "trigger": "axis",
                "axisPointer": { "type": "cross" }
            },
            "legend": {
                "data": [REVENUE_SERIES_NAME, GROWTH_SERIES_NAME],
                "top": 10
            },
            "grid": {
                "left": "3%",
                "right": "4%",
                "bottom": "3%",
                "containLabel": true
            },
            "xAxis": {
                "type": "category",
                "boundaryGap": true,
                "data": self.categories(),
                "axisTick": { "show": false },
                "axisLabel": { "interval": 12 }
            },
            "yAxis": [
                {
                    "type": "value",
                    "name": REVENUE_AXIS_NAME,
                    "position": "left"
                },
                {
                    "type": "value",
                    "name": "%",
                    "position": "right",
                    "axisLabel": { "formatter": "{value}%" }
                }
            ],
            "series": [
                {
                    "name": REVENUE_SERIES_NAME,
                    "type": "bar",
                    "yAxisIndex": 0,
                    "data": revenues,
                    "itemStyle": { "color": "#DAA520" },
                    "barWidth": "60%"
                },
                {
                    "name": GROWTH_SERIES_NAME,
                    "type": "line",
                    "yAxisIndex": 1,
                    "data": self.growth_rates(),
                    "itemStyle": { "color": "#DC143C" },
                    "lineStyle": { "color": "#DC143C", "width": 2 },
                    "symbol": "circle",
                    "symbolSize": 4,
                    "connectNulls": false
                }
            ]
        })
    }
}

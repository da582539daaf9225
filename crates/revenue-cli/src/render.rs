//! Terminal rendering of candidates and revenue views

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use revenue_core::table::format_growth;
use revenue_core::{ChartSeries, RevenueTable, StockCandidate, View};
use revenue_search::RevenueState;

pub const LOADING_TEXT: &str = "載入中... (loading)";
pub const NO_DATA_TEXT: &str = "無資料 (no data)";

/// Numbered candidate list for `/pick`
pub fn candidate_list(candidates: &[StockCandidate]) -> String {
    if candidates.is_empty() {
        return "No matching stocks".to_string();
    }

    let mut out = String::new();
    for (i, candidate) in candidates.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {}", i + 1, candidate.display_name);
    }
    out
}

/// Revenue table with period columns, right-aligned values
pub fn revenue_table(table: &RevenueTable) -> Table {
    let mut out = Table::new();
    out.load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(table.header());

    for row in table.rows() {
        let cells: Vec<Cell> = row
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let cell = Cell::new(value);
                if i == 0 {
                    cell
                } else {
                    cell.set_alignment(CellAlignment::Right)
                }
            })
            .collect();
        out.add_row(cells);
    }
    out
}

/// One-line description of the chart series
pub fn chart_summary(chart: &ChartSeries) -> String {
    let categories = chart.categories();
    let (Some(first), Some(last)) = (categories.first(), categories.last()) else {
        return NO_DATA_TEXT.to_string();
    };

    let latest_growth = chart.growth_rates().last().copied().flatten();
    format!(
        "{first} to {last}, {} months, latest YoY growth {}%",
        chart.len(),
        format_growth(latest_growth)
    )
}

/// Full text rendering of one loader state
///
/// `last` keeps only the most recent columns of the table.
pub fn revenue_state(state: &RevenueState, last: Option<usize>) -> String {
    let mut out = String::new();
    if let Some(stock) = &state.stock {
        let _ = writeln!(out, "{}", stock.display_name);
    }

    match &state.views.chart {
        View::Loading => return format!("{out}{LOADING_TEXT}"),
        View::NoData => return format!("{out}{NO_DATA_TEXT}"),
        View::Ready(chart) => {
            let _ = writeln!(out, "{}", chart_summary(chart));
        }
    }

    if let Some(table) = state.views.table.as_ready() {
        let table = match last {
            Some(count) => table.last(count),
            None => table.clone(),
        };
        let _ = write!(out, "{}", revenue_table(&table));
    }
    out
}

/// Write the ECharts option of `chart` as pretty JSON
pub fn write_chart_json(chart: &ChartSeries, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&chart.to_echarts_option())?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write chart option to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use revenue_core::{RevenueRecord, RevenueSeriesProcessor};

    fn state(count: u32) -> RevenueState {
        let records: Vec<RevenueRecord> = (0..count)
            .map(|i| {
                let date = NaiveDate::from_ymd_opt(2020 + (i / 12) as i32, i % 12 + 1, 10).unwrap();
                RevenueRecord::new(date, "2330", 1_000_000.0 + f64::from(i) * 1000.0)
            })
            .collect();
        RevenueState {
            stock: Some(StockCandidate::from_listing("2330", "台積電")),
            views: RevenueSeriesProcessor::default().process(&records),
        }
    }

    #[test]
    fn test_candidate_list() {
        let list = candidate_list(&[
            StockCandidate::from_listing("2330", "台積電"),
            StockCandidate::from_listing("2303", "聯電"),
        ]);
        assert!(list.contains(" 1. 台積電 (2330)"));
        assert!(list.contains(" 2. 聯電 (2303)"));
        assert_eq!(candidate_list(&[]), "No matching stocks");
    }

    #[test]
    fn test_chart_summary() {
        let state = state(25);
        let chart = state.views.chart.as_ready().unwrap();
        let summary = chart_summary(chart);
        assert!(summary.starts_with("2021/01 to 2022/01, 13 months"));
    }

    #[test]
    fn test_revenue_state_ready() {
        let text = revenue_state(&state(25), Some(3));
        assert!(text.starts_with("台積電 (2330)"));
        assert!(text.contains("年度月份"));
        assert!(text.contains("202201"));
        assert!(text.contains("1,024,000"));
        assert!(!text.contains("202110"));
    }

    #[test]
    fn test_revenue_state_no_data_and_loading() {
        assert!(revenue_state(&state(12), None).ends_with(NO_DATA_TEXT));
        assert!(revenue_state(&RevenueState::idle(), None).ends_with(NO_DATA_TEXT));

        let loading = RevenueState {
            stock: Some(StockCandidate::from_listing("2330", "台積電")),
            views: revenue_core::ProcessedRevenue::loading(),
        };
        assert!(revenue_state(&loading, None).ends_with(LOADING_TEXT));
    }
}

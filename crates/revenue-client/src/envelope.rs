//! FinMind response envelope and row decoding
//!
//! Every FinMind response is `{ "msg": ..., "status": ..., "data": [...] }`.
//! A transport-level success can still carry a failing application `status`,
//! so both layers are checked before any row is decoded.

use std::collections::HashSet;

use chrono::NaiveDate;
use revenue_core::{RevenueRecord, StockCandidate};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, Result};

/// Application status FinMind uses for success
pub const STATUS_OK: i64 = 200;

#[derive(Debug, Deserialize)]
struct Envelope {
    status: Option<i64>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

/// Row of the `TaiwanStockInfo` dataset
#[derive(Debug, Clone, Deserialize)]
pub struct StockInfoRow {
    pub stock_id: String,
    pub stock_name: String,
    #[serde(default)]
    pub industry_category: Option<String>,
    #[serde(default, rename = "type")]
    pub market: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Row of the `TaiwanStockMonthRevenue` dataset
#[derive(Debug, Clone, Deserialize)]
pub struct MonthRevenueRow {
    pub date: NaiveDate,
    pub stock_id: String,
    pub revenue: f64,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub revenue_month: Option<u32>,
    #[serde(default)]
    pub revenue_year: Option<i32>,
}

impl From<MonthRevenueRow> for RevenueRecord {
    fn from(row: MonthRevenueRow) -> Self {
        RevenueRecord::new(row.date, row.stock_id, row.revenue)
    }
}

/// Check the envelope and decode every row of `data`
pub fn decode_rows<T: DeserializeOwned>(body: Value) -> Result<Vec<T>> {
    if !body.is_object() {
        return Err(ClientError::Payload("response is not a JSON object".to_string()));
    }

    let envelope: Envelope = serde_json::from_value(body)?;
    let status = envelope
        .status
        .ok_or_else(|| ClientError::Payload("missing status field".to_string()))?;

    if status != STATUS_OK {
        return Err(ClientError::ApiStatus {
            status,
            msg: envelope.msg.unwrap_or_default(),
        });
    }

    let rows = match envelope.data {
        Some(Value::Array(rows)) => rows,
        Some(Value::Null) | None => {
            return Err(ClientError::Payload("missing data field".to_string()));
        }
        Some(_) => return Err(ClientError::Payload("data is not an array".to_string())),
    };

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            serde_json::from_value(row).map_err(|e| ClientError::Payload(format!("row {i}: {e}")))
        })
        .collect()
}

/// Directory rows to candidates, first listing per id wins, capped at `limit`
pub fn candidates_from_rows(rows: Vec<StockInfoRow>, limit: usize) -> Vec<StockCandidate> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| seen.insert(row.stock_id.clone()))
        .take(limit)
        .map(|row| StockCandidate::from_listing(row.stock_id, &row.stock_name))
        .collect()
}

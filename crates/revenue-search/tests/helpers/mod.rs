// Scripted directory and revenue fakes shared by the integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use revenue_core::{
    DateRange, Error, Result, RevenueRecord, RevenueSource, StockCandidate, StockDirectory,
};

pub fn tsmc() -> StockCandidate {
    StockCandidate::from_listing("2330", "台積電")
}

pub fn umc() -> StockCandidate {
    StockCandidate::from_listing("2303", "聯電")
}

pub fn mediatek() -> StockCandidate {
    StockCandidate::from_listing("2454", "聯發科")
}

/// `count` consecutive monthly records from January 2020, each `base` plus its index
pub fn monthly(stock_id: &str, count: u32, base: f64) -> Vec<RevenueRecord> {
    (0..count)
        .map(|i| {
            let date = NaiveDate::from_ymd_opt(2020 + (i / 12) as i32, i % 12 + 1, 10).unwrap();
            RevenueRecord::new(date, stock_id, base + f64::from(i))
        })
        .collect()
}

#[derive(Clone)]
struct Reply<T> {
    delay: Duration,
    outcome: std::result::Result<T, Error>,
}

/// Directory fake answering per query with a configurable delay
#[derive(Clone, Default)]
pub struct ScriptedDirectory {
    replies: Arc<Mutex<HashMap<String, Reply<Vec<StockCandidate>>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, query: &str, candidates: Vec<StockCandidate>) -> Self {
        self.respond_after(query, Duration::ZERO, candidates)
    }

    pub fn respond_after(
        self,
        query: &str,
        delay: Duration,
        candidates: Vec<StockCandidate>,
    ) -> Self {
        self.replies.lock().unwrap().insert(
            query.to_string(),
            Reply {
                delay,
                outcome: Ok(candidates),
            },
        );
        self
    }

    pub fn fail(self, query: &str, error: Error) -> Self {
        self.replies.lock().unwrap().insert(
            query.to_string(),
            Reply {
                delay: Duration::ZERO,
                outcome: Err(error),
            },
        );
        self
    }

    /// Queries received so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StockDirectory for ScriptedDirectory {
    async fn search(&self, query: &str, _limit: Option<usize>) -> Result<Vec<StockCandidate>> {
        self.calls.lock().unwrap().push(query.to_string());
        let reply = self.replies.lock().unwrap().get(query).cloned();
        match reply {
            Some(reply) => {
                if !reply.delay.is_zero() {
                    tokio::time::sleep(reply.delay).await;
                }
                reply.outcome
            }
            None => Ok(Vec::new()),
        }
    }
}

/// Revenue fake answering per stock id with a configurable delay
#[derive(Clone, Default)]
pub struct ScriptedSource {
    replies: Arc<Mutex<HashMap<String, Reply<Vec<RevenueRecord>>>>>,
    calls: Arc<Mutex<Vec<(String, Option<DateRange>)>>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_after(
        self,
        stock_id: &str,
        delay: Duration,
        records: Vec<RevenueRecord>,
    ) -> Self {
        self.replies.lock().unwrap().insert(
            stock_id.to_string(),
            Reply {
                delay,
                outcome: Ok(records),
            },
        );
        self
    }

    pub fn fail(self, stock_id: &str, error: Error) -> Self {
        self.replies.lock().unwrap().insert(
            stock_id.to_string(),
            Reply {
                delay: Duration::ZERO,
                outcome: Err(error),
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<(String, Option<DateRange>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RevenueSource for ScriptedSource {
    async fn monthly_revenue(
        &self,
        stock_id: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<RevenueRecord>> {
        self.calls.lock().unwrap().push((stock_id.to_string(), range));
        let reply = self.replies.lock().unwrap().get(stock_id).cloned();
        match reply {
            Some(reply) => {
                if !reply.delay.is_zero() {
                    tokio::time::sleep(reply.delay).await;
                }
                reply.outcome
            }
            None => Ok(Vec::new()),
        }
    }
}

/// Let spawned tasks run without advancing the paused clock
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

//! Monthly revenue viewer
//!
//! Searches the FinMind stock directory and shows a stock's monthly revenue
//! with year-over-year growth, as a table and an ECharts chart option.
//!
//! # Usage
//!
//! ```bash
//! export FINMIND_API_TOKEN="your-token"
//!
//! # Interactive search
//! cargo run --bin revenue
//!
//! # One-shot, last 12 months, chart written to disk
//! cargo run --bin revenue -- --stock 2330 --last 12 --chart-json chart.json
//! ```

mod commands;
mod render;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use revenue_client::{FinMindClient, FinMindConfig};
use revenue_core::{Alignment, DateRange, RevenueSeriesProcessor, StockCandidate, StockDirectory};
use revenue_search::{ResolverConfig, RevenueLoader, RevenueSession, RevenueState, TextChange};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use crate::commands::Command;

/// Extra time allowed past the request timeout before giving up on a wait
const WAIT_SLACK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AlignmentArg {
    /// Compare with the same calendar month one year earlier
    Calendar,
    /// Compare with the record twelve positions earlier
    Index,
}

impl From<AlignmentArg> for Alignment {
    fn from(arg: AlignmentArg) -> Self {
        match arg {
            AlignmentArg::Calendar => Alignment::Calendar,
            AlignmentArg::Index => Alignment::Index,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "revenue")]
#[command(about = "Taiwan-listed stock monthly revenue viewer", long_about = None)]
struct Args {
    /// Stock id to show once, without the interactive prompt
    #[arg(short, long)]
    stock: Option<String>,

    /// First day of the revenue range (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Last day of the revenue range (YYYY-MM-DD), defaults to today
    #[arg(long)]
    end_date: Option<NaiveDate>,

    /// Year-over-year comparison strategy
    #[arg(long, value_enum, default_value_t = AlignmentArg::Calendar)]
    alignment: AlignmentArg,

    /// Only render the most recent N table columns
    #[arg(short, long)]
    last: Option<usize>,

    /// Write the ECharts option of the loaded series to this file
    #[arg(long)]
    chart_json: Option<PathBuf>,

    /// FinMind API token, overrides FINMIND_API_TOKEN
    #[arg(long)]
    token: Option<String>,
}

impl Args {
    fn finmind_config(&self) -> Result<FinMindConfig> {
        let mut builder = FinMindConfig::builder();
        if let Some(token) = &self.token {
            builder = builder.api_token(token);
        }
        builder
            .with_env_token()
            .build()
            .context("Invalid FinMind configuration (set FINMIND_API_TOKEN or pass --token)")
    }

    /// Explicit range when either bound is given
    fn range(&self, history_years: u32) -> Result<Option<DateRange>> {
        if self.start_date.is_none() && self.end_date.is_none() {
            return Ok(None);
        }

        let end = self.end_date.unwrap_or_else(|| Local::now().date_naive());
        let range = match self.start_date {
            Some(start) => DateRange::new(start, end)?,
            None => DateRange::trailing_years(end, history_years),
        };
        Ok(Some(range))
    }
}

fn print_banner() {
    println!(
        r#"
╔══════════════════════════════════════════════════════════════╗
║                   Monthly Revenue Viewer                     ║
║                                                              ║
║  Type a stock id or name to search, e.g. 2330 or TSMC        ║
║    /list      - 列出候選 (List candidates)                   ║
║    /pick <n>  - 選擇候選 (Select candidate)                  ║
║    /show      - 顯示營收 (Show revenue)                      ║
║    /help      - 顯示說明 (Help)                              ║
║    /exit      - 離開 (Exit)                                  ║
╚══════════════════════════════════════════════════════════════╝
"#
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    revenue_utils::init_tracing_with("warn,revenue=info");

    let args = Args::parse();
    let config = Arc::new(args.finmind_config()?);
    let range = args.range(config.history_years)?;
    let processor = RevenueSeriesProcessor::new(args.alignment.into());
    let client = Arc::new(FinMindClient::new(Arc::clone(&config))?);

    info!(alignment = ?processor.alignment(), ?range, "starting revenue viewer");

    match &args.stock {
        Some(stock_id) => run_once(&args, client, processor, range, stock_id).await,
        None => run_interactive(&args, client, processor, range).await,
    }
}

async fn run_once(
    args: &Args,
    client: Arc<FinMindClient>,
    processor: RevenueSeriesProcessor,
    range: Option<DateRange>,
    stock_id: &str,
) -> Result<()> {
    let candidate = match client.search(stock_id, Some(1)).await {
        Ok(found) => found
            .into_iter()
            .find(|candidate| candidate.id == stock_id)
            .unwrap_or_else(|| StockCandidate::new(stock_id, stock_id)),
        Err(err) => {
            warn!(stock_id, error = %err, "directory lookup failed, using bare id");
            StockCandidate::new(stock_id, stock_id)
        }
    };

    let loader = RevenueLoader::with_range(client, processor, range);
    loader.load(Some(candidate)).await;

    let state = loader.state();
    println!("{}", render::revenue_state(&state, args.last));
    export_chart(args, &state)
}

async fn run_interactive(
    args: &Args,
    client: Arc<FinMindClient>,
    processor: RevenueSeriesProcessor,
    range: Option<DateRange>,
) -> Result<()> {
    print_banner();

    let resolver_config = ResolverConfig::default();
    let wait_limit = resolver_config.debounce + client.config().request_timeout + WAIT_SLACK;
    let session = RevenueSession::new(client.clone(), client, resolver_config, processor, range);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        let prompt = match session.resolver().selection() {
            Some(stock) => format!("[{}]> ", stock.id),
            None => "> ".to_string(),
        };
        stdout.write_all(prompt.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            println!("\nGoodbye!");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("Error: {}\n", e);
                continue;
            }
        };

        match command {
            Command::Exit => {
                println!("Goodbye!");
                break;
            }
            Command::Help => println!("{}", Command::help_text()),
            Command::List => {
                println!("{}", render::candidate_list(&session.resolver().candidates()));
            }
            Command::Pick { index } => {
                let candidates = session.resolver().candidates();
                match candidates.get(index - 1) {
                    Some(candidate) => {
                        session.resolver().select(candidate.clone());
                        show_revenue(args, &session, wait_limit).await?;
                    }
                    None => eprintln!("Error: no candidate {index}, try /list\n"),
                }
            }
            Command::Show => show_revenue(args, &session, wait_limit).await?,
            Command::Clear => {
                session.resolver().on_text_changed("");
                println!("Cleared\n");
            }
            Command::Input { text } => match session.resolver().on_text_changed(&text) {
                TextChange::Resolved(_) => show_revenue(args, &session, wait_limit).await?,
                TextChange::Scheduled => {
                    wait_for_candidates(&session, wait_limit).await;
                    println!("{}", render::candidate_list(&session.resolver().candidates()));
                }
                TextChange::Cleared => println!("Cleared\n"),
                TextChange::Ignored => {
                    eprintln!("Search takes letters and digits, or an exact candidate label\n");
                }
            },
        }
    }

    session.shutdown();
    Ok(())
}

/// Wait until the newest lookup has landed
///
/// An older lookup (such as the startup default set) landing first does not
/// end the wait.
async fn wait_for_candidates(session: &RevenueSession, limit: Duration) {
    let resolver = session.resolver();
    let mut candidates = resolver.subscribe_candidates();
    let landed = candidates.wait_for(|current| {
        !resolver.has_pending_lookup() && current.ticket == resolver.latest_lookup()
    });

    match tokio::time::timeout(limit, landed).await {
        Ok(Ok(_)) => {}
        Ok(Err(_)) => warn!("candidate channel closed"),
        Err(_) => warn!("timed out waiting for search results"),
    }
}

/// Wait for the selected stock's views to settle, then print them
async fn show_revenue(args: &Args, session: &RevenueSession, limit: Duration) -> Result<()> {
    let Some(selected) = session.resolver().selection() else {
        println!("{}\n", render::NO_DATA_TEXT);
        return Ok(());
    };

    let mut states = session.loader().subscribe();
    let settled = tokio::time::timeout(
        limit,
        states.wait_for(|state| {
            state.value.stock.as_ref() == Some(&selected) && !state.value.is_loading()
        }),
    )
    .await;

    let state = match settled {
        Ok(Ok(state)) => state.value.clone(),
        Ok(Err(_)) => bail!("revenue loader stopped"),
        Err(_) => {
            warn!(id = %selected.id, "timed out waiting for monthly revenue");
            session.loader().state()
        }
    };

    println!("{}\n", render::revenue_state(&state, args.last));
    export_chart(args, &state)
}

fn export_chart(args: &Args, state: &RevenueState) -> Result<()> {
    let Some(path) = &args.chart_json else {
        return Ok(());
    };

    match state.views.chart.as_ready() {
        Some(chart) => {
            render::write_chart_json(chart, path)?;
            info!(path = %path.display(), "chart option written");
        }
        None => warn!("no chart data to write"),
    }
    Ok(())
}

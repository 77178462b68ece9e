mod config;
mod indicators;
mod models;
mod pipeline;
mod scraper;
mod storage;
mod utils;
mod view;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::AppConfig;
use crate::indicators::compute_indicators;
use crate::pipeline::Pipeline;
use crate::scraper::NaverListingSource;
use crate::storage::SnapshotStore;
use crate::view::charts::{line_chart, market_cap_pie, LineColumn};
use crate::view::{apply_view, RateFilter, SortKey, SortOrder, StyledCell, Tone};

#[derive(Parser)]
#[command(name = "sise-etl", about = "Market listing snapshot ETL", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch one listing page and store today's snapshot for it
    Crawl {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// List page numbers with a stored snapshot for a date (default: today)
    Pages {
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Render a stored snapshot with filtering, sorting and styling
    Show {
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,

        #[arg(long, value_enum)]
        sort_by: Option<SortArg>,

        #[arg(long, value_enum, default_value_t = OrderArg::Asc)]
        order: OrderArg,
    },

    /// Per-row RSI and MACD over a stored snapshot's price column
    Indicators { file: PathBuf },

    /// Chart payload for a stored snapshot, as JSON
    Chart {
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = ChartArg::Line)]
        kind: ChartArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Gainers,
    Losers,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Name,
    Price,
    Delta,
    Rate,
    Volume,
    TradeValue,
    MarketCap,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Asc,
    Desc,
}

#[derive(Clone, Copy, ValueEnum)]
enum ChartArg {
    Line,
    Pie,
}

impl From<FilterArg> for RateFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => RateFilter::All,
            FilterArg::Gainers => RateFilter::Gainers,
            FilterArg::Losers => RateFilter::Losers,
        }
    }
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortKey::Name,
            SortArg::Price => SortKey::Price,
            SortArg::Delta => SortKey::Delta,
            SortArg::Rate => SortKey::Rate,
            SortArg::Volume => SortKey::Volume,
            SortArg::TradeValue => SortKey::TradeValue,
            SortArg::MarketCap => SortKey::MarketCap,
        }
    }
}

impl From<OrderArg> for SortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Asc => SortOrder::Ascending,
            OrderArg::Desc => SortOrder::Descending,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "sise_etl=info,warn",
        1 => "sise_etl=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::new(filter))
        .init();

    let config = AppConfig::load()?;
    let store = SnapshotStore::new(&config.storage.data_dir);

    match cli.command {
        Command::Crawl { page } => {
            let _t = utils::Timer::start("crawl");
            let source = NaverListingSource::new(&config.fetch)?;
            println!("Fetching {}", source.page_url(page));

            let report = Pipeline::new(source, store).crawl_and_store(page).await?;
            println!(
                "Saved {} ({} rows)",
                report.path.display(),
                report.rows_kept
            );
        }

        Command::Pages { date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let pages = store.list(date)?;
            if pages.is_empty() {
                println!("No snapshots for {date} — run `sise-etl crawl` first.");
            } else {
                println!("Snapshots for {date}:");
                for page in pages {
                    println!("  page {page}");
                }
            }
        }

        Command::Show {
            file,
            filter,
            sort_by,
            order,
        } => {
            let snapshot = store.load(&file)?;
            let sort = sort_by.map(|key| (key.into(), order.into()));
            let table = apply_view(&snapshot, filter.into(), sort);

            if let Some(warning) = &table.sort_warning {
                println!("warning: {warning}");
            }

            println!(
                "{:<14} {:>12} {:>14} {:>10} {:>14}  {:>16} {:>16}",
                "name", "price", "delta", "rate", "volume", "trade_value", "market_cap"
            );
            for row in &table.rows {
                println!(
                    "{:<14} {:>12} {:>14} {:>10} {:>14}  {:>16} {:>16}",
                    row.name,
                    toned(&row.price),
                    toned(&row.delta),
                    toned(&row.rate),
                    toned(&row.volume),
                    row.trade_value,
                    row.market_cap,
                );
            }
            println!("{} rows", table.rows.len());
        }

        Command::Indicators { file } => {
            let snapshot = store.load(&file)?;
            let set = compute_indicators(&snapshot);

            println!(
                "{:<14} {:>12} {:>8} {:>12} {:>12}",
                "name", "price", "RSI", "MACD", "signal"
            );
            for (i, record) in snapshot.records.iter().enumerate() {
                println!(
                    "{:<14} {:>12} {:>8} {:>12} {:>12}",
                    record.name,
                    opt(record.price, 0),
                    opt(set.rsi[i], 2),
                    opt(set.macd_line[i], 4),
                    opt(set.signal_line[i], 4),
                );
            }
        }

        Command::Chart { file, kind } => {
            let snapshot = store.load(&file)?;
            let json = match kind {
                ChartArg::Line => {
                    let chart = line_chart(
                        &snapshot,
                        &[LineColumn::Price, LineColumn::Volume, LineColumn::Rate],
                    );
                    serde_json::to_string_pretty(&chart)?
                }
                ChartArg::Pie => {
                    let chart = market_cap_pie(&snapshot, 5)?;
                    serde_json::to_string_pretty(&chart)?
                }
            };
            println!("{json}");
        }
    }

    Ok(())
}

fn toned(cell: &StyledCell) -> String {
    let code = match cell.tone {
        Tone::Up => "\x1b[31m",
        Tone::Down => "\x1b[34m",
        Tone::Flat => "\x1b[90m",
        Tone::Plain => return cell.text.clone(),
    };
    format!("{code}{}\x1b[0m", cell.text)
}

fn opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "—".to_string(),
    }
}

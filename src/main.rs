//! TradeCapture - Main Entry Point
//!
//! Replays a file of price ticks through a single tick responder backed
//! by the paper order service.

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use trade_capture::config::load_config;
use trade_capture::{parse_ticks, OrderService, PaperOrderService, Tick, TickResponder};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// File of `CODE PRICE` lines to replay (reads stdin when omitted)
    #[arg(short, long)]
    ticks: Option<PathBuf>,

    /// Buy threshold; overrides the config file
    #[arg(long)]
    threshold: Option<Decimal>,

    /// Only replay ticks for this security code
    #[arg(long)]
    code: Option<String>,

    /// Number of concurrent replay tasks
    #[arg(long)]
    workers: Option<usize>,

    /// Make the paper order service reject every order with this reason
    #[arg(long)]
    reject: Option<String>,
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

async fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading ticks from {}", path.display())),
        None => {
            let mut input = String::new();
            tokio::io::stdin()
                .read_to_string(&mut input)
                .await
                .context("reading ticks from stdin")?;
            Ok(input)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let config = load_config(Some(&args.config))?;

    let level = parse_level(args.log_level.as_deref().unwrap_or(&config.settings.log_level));
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let threshold = args.threshold.unwrap_or(config.order.threshold);
    let code_filter = args.code.or(config.order.code);
    let workers = args.workers.unwrap_or(config.settings.workers).max(1);

    info!("Starting TradeCapture");
    info!(config = %args.config, threshold = %threshold, workers, "Configuration loaded");

    let paper = Arc::new(match args.reject {
        Some(reason) => PaperOrderService::new().with_rejection(reason),
        None => PaperOrderService::new(),
    });
    let executor: Arc<dyn OrderService> = paper.clone();
    let responder = Arc::new(TickResponder::new(executor, threshold));

    responder.on_placed(|n| info!(code = %n.code, price = %n.price, "Placed"));
    responder.on_errored(|n| warn!(code = %n.code, price = %n.price, error = %n.cause, "Errored"));

    let input = read_input(args.ticks.as_ref()).await?;
    let ticks: Vec<Tick> = parse_ticks(&input)?
        .into_iter()
        .filter(|tick| code_filter.as_deref().map_or(true, |code| tick.code == code))
        .collect();

    info!(ticks = ticks.len(), "Replaying ticks");

    // round-robin the ticks over the workers
    let mut batches: Vec<Vec<Tick>> = vec![Vec::new(); workers];
    for (i, tick) in ticks.into_iter().enumerate() {
        batches[i % workers].push(tick);
    }

    let handles: Vec<_> = batches
        .into_iter()
        .map(|batch| {
            let responder = Arc::clone(&responder);
            tokio::task::spawn_blocking(move || {
                for tick in &batch {
                    responder.respond_to_tick(&tick.code, tick.price);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.await?;
    }

    info!(
        state = %responder.state(),
        orders = paper.orders().len(),
        "Replay finished"
    );

    Ok(())
}

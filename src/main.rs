mod models;
mod service;
mod store;
mod types;
mod validator;

use std::io::{Write, stderr, stdout};
use std::process::exit;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::Value;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

use crate::service::WalletService;
use crate::types::SlotIndex;

#[tokio::main]
async fn main() {
    //NOTE: The commands are few enough that hand-rolled argument handling stays
    //      readable; clap starts paying for itself once subcommands grow flags.
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        print_usage();
        exit(2);
    }

    let log_level = std::env::var("WALLET_LOG")
        .map(|value| parse_log_level(&value))
        .unwrap_or(LevelFilter::ERROR);

    setup_logging(log_level);

    let service = WalletService::new(&args[1]);

    if let Err(failure) = run_command(&service, &args[2], &args[3..]).await {
        eprintln!("{failure:#}");
        exit(1);
    }
}

async fn run_command(service: &WalletService, command: &str, rest: &[String]) -> Result<()> {
    match command {
        "init" => {
            service.init().await?;
            Ok(())
        }
        "cards" => print_json(&service.list_cards().await?),
        "add-card" => {
            let payload = payload_argument(rest, 0)?;
            print_json(&service.create_card(payload).await?)
        }
        "remove-card" => {
            let index = index_argument(rest, 0)?;
            service.delete_card(index).await?;
            Ok(())
        }
        "transactions" => {
            let index = index_argument(rest, 0)?;
            print_json(&service.list_transactions(index).await?)
        }
        "add-transaction" => {
            let index = index_argument(rest, 0)?;
            let payload = payload_argument(rest, 1)?;
            print_json(&service.create_transaction(index, payload).await?)
        }
        other => {
            print_usage();
            bail!("unknown command '{other}'");
        }
    }
}

fn payload_argument(rest: &[String], position: usize) -> Result<Value> {
    let raw = rest.get(position).context("missing JSON payload argument")?;

    serde_json::from_str(raw).context("payload argument is not valid JSON")
}

fn index_argument(rest: &[String], position: usize) -> Result<SlotIndex> {
    rest.get(position)
        .context("missing index argument")?
        .parse()
        .context("index argument is not a number")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut output = stdout().lock();

    writeln!(output, "{}", serde_json::to_string(value)?)?;
    output.flush()?;

    Ok(())
}

fn print_usage() {
    eprintln!("Usage: wallet-store [data-dir] [command]");
    eprintln!("Commands:");
    eprintln!("  init                                seed empty card and transaction files");
    eprintln!("  cards                               list every card slot, cleared ones included");
    eprintln!("  add-card [json]                     validate a card payload and store it");
    eprintln!("  remove-card [index]                 clear the card slot at the given index");
    eprintln!("  transactions [card-index]           list the transactions of one card");
    eprintln!("  add-transaction [card-index] [json] record a transaction against one card");
    eprintln!("Set WALLET_LOG to error, warn, info, debug or trace (default: error)");
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries command results, so diagnostics have to go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

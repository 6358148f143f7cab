//! Converter CLI
//!
//! Terminal front-end for the currency converter: one-shot conversions,
//! rate listings and an interactive session driven by the converter service.

mod config;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use converter_engine::{ConversionEngine, ConverterHandle, ConverterService};
use converter_types::{ConversionSnapshot, CurrencyCode, RequestId, StaticRates};
use render::{format_rate, render_currency, render_snapshot};

#[derive(Parser)]
#[command(name = "converter")]
#[command(author, version, about = "Currency converter with static rates", long_about = None)]
struct Cli {
    /// Simulated conversion latency in milliseconds (overrides CONVERTER_LATENCY_MS)
    #[arg(long, global = true)]
    latency_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between two currencies
    Convert {
        /// Amount in the source currency
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Source currency code
        #[arg(long, default_value = "USD")]
        from: String,
        /// Target currency code
        #[arg(long, default_value = "BRL")]
        to: String,
        /// Print the full snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the unit rate of every currency against a base
    Rates {
        #[arg(long, default_value = "USD")]
        base: String,
    },
    /// List supported currencies
    Currencies,
    /// Start an interactive conversion session
    Interactive,
}

fn parse_currency(s: &str) -> Result<CurrencyCode> {
    s.parse().with_context(|| {
        let supported: Vec<&str> = CurrencyCode::all().iter().map(|c| c.code()).collect();
        format!("Supported: {}", supported.join(", "))
    })
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn start_converter(config: &config::Config) -> ConverterHandle {
    let engine = ConversionEngine::new(StaticRates);
    ConverterService::new(engine, config.converter_config()).start()
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = config::Config::from_env()?.with_latency_override(cli.latency_ms);

    tracing::debug!(latency = ?config.latency, "Loaded configuration");

    match cli.command {
        Commands::Convert {
            amount,
            from,
            to,
            json,
        } => {
            let from = parse_currency(&from)?;
            let to = parse_currency(&to)?;

            let handle = start_converter(&config);
            handle.set_source_currency(from).await?;
            handle.set_target_currency(to).await?;
            handle.set_amount_input(amount).await?;
            let snapshot = handle.settled().await?;
            handle.shutdown().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                println!("{}", render_snapshot(&snapshot));
            }
        }

        Commands::Rates { base } => {
            let base = parse_currency(&base)?;
            let rates = exchange_rates::rates_from(base);
            for code in CurrencyCode::all() {
                if let Some(&rate) = rates.get(code) {
                    println!("{}", format_rate(base, *code, rate));
                }
            }
        }

        Commands::Currencies => {
            for &code in CurrencyCode::all() {
                println!("{}", render_currency(code));
            }
        }

        Commands::Interactive => {
            let handle = start_converter(&config);
            interactive(&handle).await?;
        }
    }

    Ok(())
}

const HELP: &str = "\
commands:
  amount <value>   set the amount to convert
  from <CODE>      set the source currency
  to <CODE>        set the target currency
  swap             swap source and target
  show             print the current state
  quit             leave";

async fn interactive(handle: &ConverterHandle) -> Result<()> {
    let printer = tokio::spawn(print_settled(handle.subscribe()));

    println!("{}", HELP);
    handle.refresh().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, arg) = line
            .split_once(char::is_whitespace)
            .map(|(c, a)| (c, a.trim()))
            .unwrap_or((line, ""));

        match command {
            "" => {}
            "amount" => {
                handle.set_amount_input(arg).await?;
            }
            "from" | "to" => match parse_currency(arg) {
                Ok(code) if command == "from" => {
                    handle.set_source_currency(code).await?;
                }
                Ok(code) => {
                    handle.set_target_currency(code).await?;
                }
                Err(e) => eprintln!("{:#}", e),
            },
            "swap" => {
                handle.swap().await?;
            }
            "show" => println!("{}", render_snapshot(&handle.snapshot())),
            "quit" | "exit" => break,
            _ => println!("{}", HELP),
        }
    }

    handle.shutdown().await?;
    printer.await?;
    Ok(())
}

/// Prints each result once it has settled. Superseded requests never settle,
/// so fast typing only prints the final conversion.
async fn print_settled(mut rx: watch::Receiver<ConversionSnapshot>) {
    let mut last_printed: Option<RequestId> = None;
    while rx.changed().await.is_ok() {
        let snapshot = rx.borrow_and_update().clone();
        if !snapshot.pending && last_printed != Some(snapshot.request_id) {
            last_printed = Some(snapshot.request_id);
            println!("{}", render_snapshot(&snapshot));
        }
    }
}

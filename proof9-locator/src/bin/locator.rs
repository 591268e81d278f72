//! Content locator CLI entry point.
//!
//! Resolves a content reference to a reachable gateway URL.

use anyhow::Result;
use clap::Parser;
use proof9_locator::{GatewayResolver, LocatorConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Locator CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "locator")]
#[command(about = "Proof9 content locator - resolve content references to gateway URLs")]
struct Args {
    /// Content reference: bare identifier, ipfs:// URI, or gateway URL.
    reference: String,

    /// Configuration file (TOML). Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print every candidate URL in priority order, without probing.
    #[arg(long)]
    all: bool,

    /// Print only the most-preferred candidate, without probing.
    #[arg(long)]
    no_probe: bool,

    /// Per-gateway probe timeout in milliseconds (overrides configuration).
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let config = match &args.config {
        Some(path) => LocatorConfig::from_file(path)?,
        None => LocatorConfig::default(),
    };
    let resolver = GatewayResolver::new(&config);

    tracing::info!("resolving reference: {}", args.reference);

    if args.all {
        let candidates = resolver.candidate_urls(&args.reference);
        if candidates.is_empty() {
            eprintln!("no content identifier found in reference");
            std::process::exit(1);
        }
        for url in candidates {
            println!("{url}");
        }
        return Ok(());
    }

    if args.no_probe {
        match resolver.primary_url(&args.reference) {
            Some(url) => {
                println!("{url}");
                return Ok(());
            }
            None => {
                eprintln!("no content identifier found in reference");
                std::process::exit(1);
            }
        }
    }

    let resolved = match args.timeout_ms {
        Some(ms) => {
            resolver
                .resolve_working_url_with_timeout(&args.reference, Duration::from_millis(ms))
                .await
        }
        None => resolver.resolve_working_url(&args.reference).await,
    };

    match resolved {
        Some(url) => {
            println!("{url}");
            Ok(())
        }
        None => {
            eprintln!("no reachable gateway for reference");
            std::process::exit(1);
        }
    }
}

//! CLI entry point for the iDRAC spray tool.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use idrac_spray::{Dispatcher, ProbeClient, TargetList, report};
use tracing::{debug, info, warn};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Logs go to stderr; stdout carries nothing but per-host result lines.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let targets = TargetList::load(&args.file)
        .with_context(|| format!("failed to read target file {}", args.file.display()))?;

    if targets.is_empty() {
        info!("No targets found in input file");
        return Ok(());
    }

    info!(
        targets = targets.len(),
        blank_lines = targets.blank_lines(),
        concurrency = args.concurrency,
        timeout_secs = args.timeout,
        "Starting probe run"
    );

    let client = ProbeClient::new().context("failed to build HTTP client")?;
    let dispatcher = Dispatcher::new(
        client,
        usize::from(args.concurrency),
        Duration::from_secs(args.timeout),
    )?;

    let summary = dispatcher
        .run(targets.into_targets(), |result| {
            println!("{}", report::render(result));
        })
        .await?;

    info!(
        probed = summary.probed(),
        authenticated = summary.authenticated(),
        errored = summary.errored(),
        "Probe run complete"
    );
    if summary.panicked() > 0 {
        warn!(panicked = summary.panicked(), "some probe tasks crashed");
    }

    Ok(())
}

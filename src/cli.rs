//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use idrac_spray::{DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS};

/// Probe hosts for Dell iDRAC/BMC web interfaces and spray the vendor
/// default credentials.
///
/// Reads a file of host URLs (one per line), identifies the management
/// interface generation answering at each, and reports whether the factory
/// default login still works. Results stream to stdout as probes finish.
#[derive(Parser, Debug)]
#[command(name = "idrac-spray")]
#[command(author, version, about)]
pub struct Args {
    /// File of host URLs to probe, one per line
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Maximum concurrent host probes (1-10000)
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY as u16, value_parser = clap::value_parser!(u16).range(1..=10_000))]
    pub concurrency: u16,

    /// Per-request timeout in seconds (1-600)
    #[arg(short = 't', long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=600))]
    pub timeout: u64,
}

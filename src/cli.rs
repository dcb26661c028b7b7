use clap::Parser;
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_TIME"),
    ")"
);

#[derive(Parser, Debug, Clone)]
#[command(
    name = "subprobe",
    version,
    long_version = LONG_VERSION,
    about = "Wordlist-driven subdomain enumeration over DNS",
    long_about = "subprobe resolves <label>.<domain> for every label in a wordlist, running a bounded number of lookups concurrently, and reports the names that resolve."
)]
pub struct Args {
    /// Target domain, e.g. example.com
    #[arg(value_name = "DOMAIN")]
    pub domain: String,

    /// Newline-delimited file of candidate labels
    #[arg(short = 'w', long = "wordlist", value_name = "FILE")]
    pub wordlist: PathBuf,

    /// Write found subdomains to this file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_file: Option<String>,

    /// Maximum number of concurrent lookups [default: 10]
    #[arg(short = 't', long = "threads", value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub threads: Option<u64>,

    /// Nameserver to query (ip:port), may be repeated; defaults to the system resolver
    #[arg(short = 'r', long = "resolver", value_name = "ADDR")]
    pub resolvers: Vec<String>,

    /// Per-lookup resolver timeout in seconds
    #[arg(long = "timeout", value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Output in JSON format
    #[arg(long = "json", conflicts_with = "csv")]
    pub json: bool,

    /// Output in CSV format
    #[arg(long = "csv")]
    pub csv: bool,

    /// Configuration file path (TOML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Silent mode (no banner, no not-found notices)
    #[arg(long = "silent")]
    pub silent: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

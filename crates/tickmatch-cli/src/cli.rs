//! CLI argument definitions for tickmatch.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `resolve` | Resolve company references to ticker and exchange |
//! | `providers` | List supported providers and the configured chain |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--provider` | `alphavantage` | Primary provider |
//! | `--fallback` | `alphavantage` | Fallback provider (repeatable) |
//! | `--api-key` | env / `demo` | Alpha Vantage API key |
//! | `--timeout-ms` | `5000` | Per-request timeout in ms |
//! | `--mock` | `false` | Serve providers from offline catalogs |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--verbose` | `false` | Debug logging on stderr |
//!
//! # Examples
//!
//! ```bash
//! tickmatch resolve "NASDAQ:AAPL" Tesla
//! tickmatch resolve Telsa --explain --pretty
//! tickmatch --provider yahoo --fallback catalog resolve "Apple Inc"
//! tickmatch --mock providers
//! ```

use clap::{Args, Parser, Subcommand};
use tickmatch_core::{DEFAULT_THRESHOLD, ProviderId};

/// Resolve company names and EXCHANGE:TICKER references.
#[derive(Debug, Parser)]
#[command(
    name = "tickmatch",
    author,
    version,
    about = "Resolve company references to ticker and exchange",
    long_about = "tickmatch turns free-form company references (\"Tesla\", \"nasdaq:aapl\") \
into a canonical record of company name, ticker and exchange.\n\
\n\
Structured EXCHANGE:TICKER input is confirmed against the provider; anything else \
is matched by fuzzy search. Providers are tried in order, primary first.\n\
\n\
Use 'tickmatch <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Primary provider (alphavantage, yahoo, catalog).
    #[arg(long, global = true, default_value_t = ProviderId::Alphavantage.as_str().to_owned())]
    pub provider: String,

    /// Fallback provider tried after the primary. Repeat to add more.
    ///
    /// Defaults to alphavantage when omitted.
    #[arg(long = "fallback", global = true)]
    pub fallbacks: Vec<String>,

    /// Alpha Vantage API key. Overrides TICKMATCH_ALPHAVANTAGE_API_KEY.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Request timeout in milliseconds.
    #[arg(long, global = true, default_value_t = 5000)]
    pub timeout_ms: u64,

    /// Use offline catalogs instead of live provider APIs.
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Log provider decisions to stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve one or more company references.
    ///
    /// # Examples
    ///
    ///   tickmatch resolve NASDAQ:AAPL
    ///   tickmatch resolve Tesla "NYSE:IBM" --explain
    Resolve(ResolveArgs),

    /// List supported providers and the configured chain.
    Providers,
}

/// Arguments for the `resolve` command.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Company names or EXCHANGE:TICKER references.
    #[arg(required = true, num_args = 1..)]
    pub inputs: Vec<String>,

    /// Include matching stage, score and provider attempts.
    #[arg(long, default_value_t = false)]
    pub explain: bool,

    /// Minimum fuzzy score (0-100) for free-text matches.
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: u8,
}

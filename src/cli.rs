// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using a
// plain Rust struct and attributes (the #[...] things).
//
//   site-crawler https://example.com --nthreads 8 --all-links
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use site_crawler::{CrawlConfig, LinkMode, Termination};

#[derive(Parser, Debug)]
#[command(
    name = "site-crawler",
    version,
    about = "Crawls every page of a website and lists the links found on each page",
    long_about = "site-crawler starts from URL and follows every link that stays on the same \
                  scheme and host. For each page it visits it records the in-scope links found \
                  there, writes them to a file and prints them to the terminal."
)]
pub struct Cli {
    /// Website URL to start from (e.g., https://example.com)
    pub url: String,

    /// Number of concurrent workers
    #[arg(
        short = 'n',
        long = "nthreads",
        visible_alias = "workers",
        default_value_t = 5,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub nthreads: u16,

    /// Output path for the page -> links JSON file
    #[arg(short, long, default_value = "endpoints.txt")]
    pub output: PathBuf,

    /// Include every element with an href or src attribute, not just <a> links
    #[arg(long)]
    pub all_links: bool,

    /// Request timeout in seconds
    #[arg(long, default_value = "3", value_parser = parse_seconds)]
    pub timeout: Duration,

    /// Retries for timeouts, connection errors and 5xx responses
    #[arg(long, default_value_t = 3)]
    pub retries: u32,

    /// Retry n waits BACKOFF_FACTOR * 2^(n-1) seconds
    #[arg(long, default_value_t = 1.0, value_parser = parse_backoff_factor)]
    pub backoff_factor: f64,

    /// Pause in seconds each worker takes after every page
    #[arg(long, default_value = "1", value_parser = parse_seconds)]
    pub delay: Duration,

    /// Seconds the first worker runs alone before the others start
    /// [default: same as --timeout]
    #[arg(long, value_parser = parse_seconds)]
    pub startup_delay: Option<Duration>,

    /// Let each worker stop as soon as it sees an empty queue, instead of
    /// waiting for the other workers to finish their pages
    #[arg(long)]
    pub best_effort: bool,

    /// Where to append the crawl log
    #[arg(long, default_value = "crawler.log")]
    pub log_file: PathBuf,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            workers: usize::from(self.nthreads),
            request_timeout: self.timeout,
            max_retries: self.retries,
            backoff_factor: self.backoff_factor,
            politeness_delay: self.delay,
            startup_delay: self.startup_delay.unwrap_or(self.timeout),
            link_mode: if self.all_links {
                LinkMode::All
            } else {
                LinkMode::Anchors
            },
            termination: if self.best_effort {
                Termination::BestEffort
            } else {
                Termination::Quiescence
            },
            ..CrawlConfig::default()
        }
    }
}

// Accepts "3", "0.5", ... and rejects negative or non-numeric values
fn parse_seconds(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number of seconds"))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!("'{value}' must be zero or a positive number of seconds"));
    }
    Duration::try_from_secs_f64(seconds).map_err(|e| format!("'{value}' is out of range: {e}"))
}

fn parse_backoff_factor(value: &str) -> Result<f64, String> {
    let factor: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if !factor.is_finite() || factor < 0.0 {
        return Err(format!("'{value}' must be zero or a positive number"));
    }
    Ok(factor)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a custom value_parser instead of plain f64 fields?
//    - clap happily parses "inf", "NaN" and "1e30" as f64
//    - Duration can't hold those, and Duration::from_secs_f64 panics on them
//    - The parser turns them into a normal "invalid value" error instead
//
// 2. What is Option<Duration> for --startup-delay?
//    - None means the flag wasn't given
//    - crawl_config() then falls back to the request timeout
//
// 3. Why u16 for --nthreads?
//    - It keeps absurd worker counts out, and range(1..) rejects zero
//    - usize::from() widens it losslessly when building the config
// -----------------------------------------------------------------------------

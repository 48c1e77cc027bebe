// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Check the seed URL (exit code 1 if it is not a crawlable URL)
// 3. Set up the log file
// 4. Run the crawl (Ctrl-C stops it early; partial results are kept)
// 5. Write the results file and print the results
// 6. Exit with proper code (0 = done, 1 = invalid URL, 2 = error)
// =============================================================================

mod cli;
mod logging;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use site_crawler::{report, validate_seed, Crawler};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = crawl finished (or was interrupted) and results were reported
//   Ok(1) = the seed URL is not valid
//   Err   = unexpected error
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let seed = match validate_seed(&cli.url) {
        Ok(seed) => seed,
        Err(_) => {
            println!("The url you have entered is not valid. URL: {}", cli.url);
            return Ok(1);
        }
    };

    // Dropped at the end of run(), which flushes the log file before exit
    let _log_guard = logging::init_logging(&cli.log_file)?;

    let config = cli.crawl_config();
    info!(
        url = %seed,
        workers = config.workers,
        output = %cli.output.display(),
        "starting crawler"
    );

    let crawler = Crawler::new(config)?;

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupted, stopping after the pages in progress");
                cancel.cancel();
            }
        }
    });

    let report = crawler.run(&seed, cancel).await?;

    // A failed write is logged; the terminal listing still happens
    match report::write_results_file(&cli.output, &report.pages) {
        Ok(()) => info!(path = %cli.output.display(), "Successfully wrote output file"),
        Err(e) => error!("could not write output file: {e:#}"),
    }

    let stdout = std::io::stdout();
    report::print_results(&mut stdout.lock(), &report.pages)?;

    Ok(0)
}

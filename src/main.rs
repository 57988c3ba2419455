use clap::Parser;
use std::error::Error;
use std::io::Write;
use storybook_audit::{Auditor, Browser, RunSummary, WebDriverBrowser, report};

mod args;
use args::Args;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();
    let report_path = args.report.clone();
    let config = args.into_config()?;

    ::log::info!(
        "Auditing {} pages on {}",
        config.targets.len(),
        config.base_url
    );
    ::log::info!("Using WebDriver at {}", config.webdriver_url);

    let mut browser = WebDriverBrowser::connect(&config).await?;

    let start_time = std::time::Instant::now();
    let stdout = std::io::stdout();
    let outcome = Auditor::new(&mut browser, &config, stdout.lock()).run().await;

    // Release the session whether or not the run succeeded
    if let Err(e) = browser.close().await {
        ::log::warn!("Failed to close browser session: {}", e);
    }

    let results = outcome?;
    ::log::info!(
        "Audit complete - {} pages in {:.2} seconds",
        results.len(),
        start_time.elapsed().as_secs_f64()
    );

    let mut out = stdout.lock();
    report::write_summary(&mut out, &RunSummary::from_results(&results))?;
    out.flush()?;

    if let Some(path) = report_path {
        report::write_json_report(&path, &results)?;
    }

    Ok(())
}

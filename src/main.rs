// src/main.rs

use anyhow::Result;
use cfbscraper::{
    config::ScrapeConfig,
    fetch::{http::HttpConnector, urls::generate_urls},
    scrape::Scraper,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) build the page list ──────────────────────────────────────
    let config = ScrapeConfig::default();
    let urls = generate_urls(&config);
    info!(
        pages = urls.len(),
        output = %config.output_path.display(),
        "startup"
    );

    // ─── 3) scrape & write ───────────────────────────────────────────
    let output = config.output_path.clone();
    let connector = HttpConnector::new(&config);
    let mut scraper = Scraper::new(connector, config);
    let summary = scraper.run_to_file(&urls, &output)?;

    info!(
        rows = summary.rows,
        failed = summary.failed(),
        "all done"
    );
    Ok(())
}

// src/scrape.rs

use anyhow::Result;
use std::{collections::BTreeMap, path::Path, thread, time::Instant};
use tracing::{debug, info, instrument, warn};

use crate::{
    config::ScrapeConfig,
    dataset::Dataset,
    fetch::{scrape_table, Connector},
};

/// What a run did, for the closing log line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Pages requested, successful or not.
    pub requests: usize,
    /// Pages that contributed at least one row.
    pub pages_with_rows: usize,
    pub rows: usize,
    /// Sessions opened, including the first one.
    pub sessions: usize,
    /// Failed pages keyed by `FetchError::kind`.
    pub failures: BTreeMap<&'static str, usize>,
}

impl RunSummary {
    pub fn failed(&self) -> usize {
        self.failures.values().sum()
    }
}

/// Walks a URL list one page at a time, rotating sessions and pausing
/// between requests so the site does not rate limit us.
pub struct Scraper<C: Connector> {
    connector: C,
    config: ScrapeConfig,
}

impl<C: Connector> Scraper<C> {
    pub fn new(connector: C, config: ScrapeConfig) -> Self {
        Self { connector, config }
    }

    /// Fetch every URL in order and collect the tagged tables.
    ///
    /// Page failures are logged and skipped. Only failing to open the first
    /// session aborts the run; if a rotation cannot open a new session the
    /// current one is kept.
    pub fn run(&mut self, urls: &[String]) -> Result<(Dataset, RunSummary)> {
        let per_session = self.config.requests_per_session.max(1);
        let mut dataset = Dataset::new();
        let mut summary = RunSummary::default();

        let mut session = self.connector.connect()?;
        summary.sessions += 1;
        let mut counter = 0usize;

        for (index, url) in urls.iter().enumerate() {
            info!(index, %url, "processing");

            let (batch, failure) = scrape_table(&session, url);
            if let Some(kind) = failure {
                *summary.failures.entry(kind).or_default() += 1;
            }
            if !batch.is_empty() {
                summary.pages_with_rows += 1;
            }
            summary.rows += dataset.push(batch);
            summary.requests += 1;

            counter += 1;
            if counter >= per_session {
                debug!(requests = counter, "rotating session");
                match self.connector.connect() {
                    Ok(next) => {
                        session = next;
                        summary.sessions += 1;
                    }
                    Err(e) => warn!(error = %e, "could not open a new session, keeping the current one"),
                }
                counter = 0;
            }

            thread::sleep(self.config.delay);
        }

        Ok((dataset, summary))
    }

    /// [`run`](Self::run), then write the dataset to `path` once, however
    /// many pages failed.
    #[instrument(level = "info", skip(self, urls, path), fields(urls = urls.len()))]
    pub fn run_to_file<P: AsRef<Path>>(&mut self, urls: &[String], path: P) -> Result<RunSummary> {
        let start = Instant::now();
        let (dataset, summary) = self.run(urls)?;
        dataset.write_csv(path)?;
        info!(
            requests = summary.requests,
            rows = summary.rows,
            failed = summary.failed(),
            sessions = summary.sessions,
            elapsed = ?start.elapsed(),
            "scrape finished"
        );
        Ok(summary)
    }
}

// src/config.rs

use std::{ops::Range, path::PathBuf, time::Duration};

/// Conference index pages live under this prefix.
pub const BASE_URL: &str = "https://www.sports-reference.com/cfb/conferences";

/// Power-five conference slugs, in the order each year is visited.
pub static CONFERENCES: &[&str] = &["pac-12", "acc", "big-12", "big-ten", "sec"];

/// Seasons to collect, end exclusive.
pub const YEARS: Range<i32> = 2014..2024;

/// The site starts throttling a cookie session after a burst of requests,
/// so the client is rebuilt after this many.
pub const REQUESTS_PER_SESSION: usize = 15;

/// Keeps us under 20 requests per minute.
pub const REQUEST_DELAY: Duration = Duration::from_millis(3010);

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const USER_AGENT: &str = concat!("cfbscraper/", env!("CARGO_PKG_VERSION"));

pub const OUTPUT_FILE: &str = "cfb_p5_adv_data.csv";

/// Every policy knob of a scrape run in one place.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub conferences: Vec<String>,
    pub years: Range<i32>,
    pub requests_per_session: usize,
    pub delay: Duration,
    pub timeout: Duration,
    pub user_agent: String,
    pub output_path: PathBuf,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            conferences: CONFERENCES.iter().map(|c| c.to_string()).collect(),
            years: YEARS,
            requests_per_session: REQUESTS_PER_SESSION,
            delay: REQUEST_DELAY,
            timeout: REQUEST_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
            output_path: PathBuf::from(OUTPUT_FILE),
        }
    }
}

impl ScrapeConfig {
    /// Number of pages a run over this config will request.
    pub fn page_count(&self) -> usize {
        self.years.len() * self.conferences.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_run() {
        let cfg = ScrapeConfig::default();
        assert_eq!(cfg.page_count(), 50);
        assert_eq!(cfg.requests_per_session, 15);
        assert_eq!(cfg.delay, Duration::from_millis(3010));
        assert_eq!(cfg.output_path, PathBuf::from("cfb_p5_adv_data.csv"));
    }
}

// src/fetch/urls.rs
use url::Url;

use super::FetchError;
use crate::config::ScrapeConfig;

/// Build the full list of ratings pages: every conference for a year before
/// moving on to the next year.
pub fn generate_urls(config: &ScrapeConfig) -> Vec<String> {
    let base = config.base_url.trim_end_matches('/');
    let mut urls = Vec::with_capacity(config.page_count());
    for year in config.years.clone() {
        for conf in &config.conferences {
            urls.push(format!("{}/{}/{}-ratings.html", base, conf, year));
        }
    }
    urls
}

/// Recover `(CONFERENCE, year)` from a `.../<conf>/<year>-ratings.html` URL.
pub fn page_tags(url: &str) -> Result<(String, i32), FetchError> {
    let bad = || FetchError::BadUrl(url.to_string());

    let parsed = Url::parse(url).map_err(|_| bad())?;
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.collect())
        .unwrap_or_default();

    let (conf, page) = match segments.as_slice() {
        [.., conf, page] => (*conf, *page),
        _ => return Err(bad()),
    };

    // "2014-ratings.html" -> "2014"
    let year = page
        .split('-')
        .next()
        .unwrap_or(page)
        .parse::<i32>()
        .map_err(|_| bad())?;

    Ok((conf.to_uppercase(), year))
}

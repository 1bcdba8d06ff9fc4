// src/fetch/mod.rs

use thiserror::Error;
use tracing::{debug, warn};

use crate::process::{parse_first_table, Batch};

pub mod http;
pub mod urls;

/// Everything that can go wrong with a single page. None of these stop a run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {status} {reason}")]
    Http { status: u16, reason: String },

    #[error("error connecting: {0}")]
    Connect(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("request error: {0}")]
    Request(String),

    #[error("no table found")]
    NoTable,

    #[error("cannot derive conference/year from {0}")]
    BadUrl(String),
}

impl FetchError {
    /// Stable label used in log fields and run summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Http { .. } => "http",
            FetchError::Connect(_) => "connect",
            FetchError::Timeout(_) => "timeout",
            FetchError::Request(_) => "request",
            FetchError::NoTable => "no_table",
            FetchError::BadUrl(_) => "bad_url",
        }
    }

    /// One diagnostic line per failed page.
    pub fn report(&self, url: &str) {
        warn!(%url, kind = self.kind(), "{}", self);
    }
}

/// A live connection context. Cookies and pooled connections stay with it
/// until it is dropped.
pub trait Session {
    /// GET `url` and return the body of a successful response.
    fn get(&self, url: &str) -> Result<String, FetchError>;
}

/// Opens fresh sessions for the driver when it rotates.
pub trait Connector {
    type Session: Session;

    fn connect(&mut self) -> anyhow::Result<Self::Session>;
}

/// Fetch one ratings page, take its first table and tag every row with the
/// conference and year from the URL.
pub fn try_scrape_table<S: Session + ?Sized>(session: &S, url: &str) -> Result<Batch, FetchError> {
    let body = session.get(url)?;
    let raw = parse_first_table(&body).ok_or(FetchError::NoTable)?;
    let (conference, year) = urls::page_tags(url)?;
    debug!(%url, rows = raw.rows.len(), columns = raw.headers.len(), "parsed table");
    Ok(Batch::tagged(raw, &conference, year))
}

/// Like [`try_scrape_table`] but a failure is logged and comes back as an
/// empty batch, along with its [`FetchError::kind`].
pub fn scrape_table<S: Session + ?Sized>(
    session: &S,
    url: &str,
) -> (Batch, Option<&'static str>) {
    match try_scrape_table(session, url) {
        Ok(batch) => (batch, None),
        Err(e) => {
            e.report(url);
            (Batch::default(), Some(e.kind()))
        }
    }
}

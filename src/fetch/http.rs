// src/fetch/http.rs
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

use super::{Connector, FetchError, Session};
use crate::config::ScrapeConfig;

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            FetchError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            }
        } else if e.is_timeout() {
            FetchError::Timeout(e.to_string())
        } else if e.is_connect() {
            FetchError::Connect(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

/// Builds a new cookie-carrying blocking client per session.
pub struct HttpConnector {
    user_agent: String,
    timeout: Duration,
    opened: usize,
}

impl HttpConnector {
    pub fn new(config: &ScrapeConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            timeout: config.timeout,
            opened: 0,
        }
    }
}

impl Connector for HttpConnector {
    type Session = HttpSession;

    fn connect(&mut self) -> Result<HttpSession> {
        let client = Client::builder()
            .user_agent(self.user_agent.as_str())
            .cookie_store(true)
            .gzip(true)
            .timeout(self.timeout)
            .build()
            .context("building HTTP client")?;
        self.opened += 1;
        debug!(session = self.opened, "opened HTTP session");
        Ok(HttpSession { client })
    }
}

pub struct HttpSession {
    client: Client,
}

impl Session for HttpSession {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        Ok(self.client.get(url).send()?.error_for_status()?.text()?)
    }
}

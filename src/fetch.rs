//! Plain HTTP fetching of the scanned page.
//!
//! One [`Fetcher`] owns a pooled `reqwest` client and is shared by all scans.
//! It performs the page fetch used for analysis and the separate timed
//! request behind the load speed figure.

use std::time::{Duration, Instant};

use reqwest::{Client, ClientBuilder};
use url::Url;

use crate::analysis::round2;
use crate::error::{AppError, Result};

/// Timeouts and pooling for outbound requests.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    /// Whole-request timeout, headers and body included.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub pool_max_idle_per_host: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
            pool_max_idle_per_host: 10,
        }
    }
}

/// A page as returned by a single successful GET.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
    pub elapsed_seconds: f64,
}

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    // Keeps no idle connections, so every timed request pays for connect
    timing_client: Client,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config, config.pool_max_idle_per_host)?,
            timing_client: build_client(config, 0)?,
        })
    }

    /// GETs `url` and returns the decoded body. Non-2xx statuses are errors.
    pub async fn fetch_page(&self, url: &Url) -> Result<FetchedPage> {
        let start = Instant::now();
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::FetchError(format!("{} responded with HTTP {}", url, status)));
        }

        let body = response.text().await?;

        Ok(FetchedPage {
            status: status.as_u16(),
            body,
            elapsed_seconds: round2(start.elapsed().as_secs_f64()),
        })
    }

    /// Times one full round trip to `url` on a fresh connection, body
    /// included, in seconds.
    pub async fn measure_load_speed(&self, url: &Url) -> Result<f64> {
        let start = Instant::now();
        let response = self
            .timing_client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AppError::LoadSpeedError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::LoadSpeedError(format!("{} responded with HTTP {}", url, status)));
        }

        response
            .bytes()
            .await
            .map_err(|e| AppError::LoadSpeedError(e.to_string()))?;

        Ok(round2(start.elapsed().as_secs_f64()))
    }
}

fn build_client(config: &FetchConfig, max_idle: usize) -> Result<Client> {
    ClientBuilder::new()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .pool_max_idle_per_host(max_idle)
        .build()
        .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))
}

//! Open-Meteo weather source.
//!
//! Fetches hourly atmospheric and marine series from the free Open-Meteo
//! APIs (no key required). Both feeds are fetched concurrently on
//! separate tasks.
//!
//! API: `https://api.open-meteo.com/v1/forecast`
//!      `https://marine-api.open-meteo.com/v1/marine`
//! Auth: None required.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::{RawObservations, WeatherSource};
use crate::config::UpstreamConfig;
use crate::types::{Coordinate, FeedKind, FetchError};

const SOURCE_NAME: &str = "open-meteo";

/// HTTP client for the two Open-Meteo feeds.
#[derive(Clone)]
pub struct OpenMeteoClient {
    http: Client,
    config: UpstreamConfig,
}

impl OpenMeteoClient {
    pub fn new(config: UpstreamConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.total_timeout_secs))
            .danger_accept_invalid_certs(!config.ssl_verify)
            .user_agent(concat!("cyclone-risk/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build Open-Meteo HTTP client")?;
        Ok(Self { http, config })
    }

    fn endpoint(&self, kind: FeedKind) -> &str {
        match kind {
            FeedKind::Atmospheric => &self.config.atmospheric_url,
            FeedKind::Marine => &self.config.marine_url,
        }
    }

    fn query(&self, kind: FeedKind, coordinate: Coordinate) -> [(&'static str, String); 6] {
        [
            ("latitude", coordinate.latitude.to_string()),
            ("longitude", coordinate.longitude.to_string()),
            ("elevation", "0".to_string()),
            ("forecast_days", self.config.forecast_days.to_string()),
            ("timezone", "auto".to_string()),
            ("hourly", kind.hourly_variables().to_string()),
        ]
    }

    fn spawn_fetch(&self, kind: FeedKind, coordinate: Coordinate) -> JoinHandle<Result<Value, FetchError>> {
        let client = self.clone();
        tokio::spawn(async move { client.fetch(kind, coordinate).await })
    }

    /// Fetch one raw hourly payload.
    ///
    /// Transport failures and non-200 statuses are `Network` errors;
    /// an empty or non-JSON body is `InvalidData`.
    pub async fn fetch(&self, kind: FeedKind, coordinate: Coordinate) -> Result<Value, FetchError> {
        let url = self.endpoint(kind);
        info!(feed = %kind, url, %coordinate, "Calling Open-Meteo");
        let started = Instant::now();

        let resp = self
            .http
            .get(url)
            .query(&self.query(kind, coordinate))
            .send()
            .await
            .map_err(|e| {
                let elapsed = started.elapsed().as_secs_f64();
                error!(feed = %kind, elapsed_secs = elapsed, error = %e, "Open-Meteo request failed");
                FetchError::Network {
                    feed: kind,
                    message: format!("request failed: {e}"),
                }
            })?;

        let status = resp.status();
        info!(
            feed = %kind,
            status = status.as_u16(),
            elapsed_secs = started.elapsed().as_secs_f64(),
            "Open-Meteo response received"
        );

        if status != StatusCode::OK {
            error!(feed = %kind, status = status.as_u16(), "Open-Meteo returned non-200 status");
            return Err(FetchError::Network {
                feed: kind,
                message: format!("API returned non-200 status: {status}"),
            });
        }

        let body = resp.text().await.map_err(|e| FetchError::Network {
            feed: kind,
            message: format!("failed to read response body: {e}"),
        })?;

        parse_body(kind, &body)
    }
}

/// Decode a response body, rejecting empty or non-JSON content.
fn parse_body(kind: FeedKind, body: &str) -> Result<Value, FetchError> {
    if body.trim().is_empty() {
        error!(feed = %kind, "Open-Meteo response body was empty");
        return Err(FetchError::InvalidData {
            feed: kind,
            message: "response body was empty".to_string(),
        });
    }

    serde_json::from_str(body).map_err(|e| {
        error!(feed = %kind, error = %e, "Failed to decode Open-Meteo JSON");
        FetchError::InvalidData {
            feed: kind,
            message: format!("failed to decode JSON: {e}"),
        }
    })
}

/// Await a spawned fetch. A panicked or cancelled task is `Internal`.
async fn join_feed(
    kind: FeedKind,
    handle: JoinHandle<Result<Value, FetchError>>,
) -> Result<Value, FetchError> {
    handle.await.map_err(|e| {
        error!(feed = %kind, error = %e, "Open-Meteo fetch task failed");
        FetchError::Internal(format!("{kind} fetch task failed: {e}"))
    })?
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    async fn fetch_components(&self, coordinate: Coordinate) -> Result<RawObservations, FetchError> {
        let atmospheric = self.spawn_fetch(FeedKind::Atmospheric, coordinate);
        let marine = self.spawn_fetch(FeedKind::Marine, coordinate);
        let (atmospheric, marine) = futures::future::try_join(
            join_feed(FeedKind::Atmospheric, atmospheric),
            join_feed(FeedKind::Marine, marine),
        )
        .await?;
        Ok(RawObservations { atmospheric, marine })
    }

    fn name(&self) -> &'static str {
        SOURCE_NAME
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

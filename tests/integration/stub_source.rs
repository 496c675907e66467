//! Stub weather source for integration testing.
//!
//! Returns canned payloads (or a canned error) and records every
//! coordinate it was asked for — all in-memory, no network.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use cyclone_risk::data::{RawObservations, WeatherSource};
use cyclone_risk::types::{Coordinate, FeedKind, FetchError};

#[derive(Clone)]
enum Outcome {
    Payloads(RawObservations),
    NetworkError(String),
    InvalidData(String),
}

/// A deterministic `WeatherSource` for tests.
pub struct StubSource {
    outcome: Outcome,
    calls: Arc<Mutex<Vec<Coordinate>>>,
}

impl StubSource {
    pub fn with_payloads(atmospheric: Value, marine: Value) -> Self {
        Self::new(Outcome::Payloads(RawObservations { atmospheric, marine }))
    }

    /// Hourly series as Open-Meteo would send them.
    pub fn with_series(atmospheric: Value, marine: Value) -> Self {
        Self::with_payloads(
            json!({ "latitude": 13.4, "longitude": -59.5, "hourly": atmospheric }),
            json!({ "latitude": 13.4, "longitude": -59.5, "hourly": marine }),
        )
    }

    pub fn network_error(msg: &str) -> Self {
        Self::new(Outcome::NetworkError(msg.to_string()))
    }

    pub fn invalid_data(msg: &str) -> Self {
        Self::new(Outcome::InvalidData(msg.to_string()))
    }

    fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the recorded coordinates, usable after the stub is moved.
    pub fn calls(&self) -> Arc<Mutex<Vec<Coordinate>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl WeatherSource for StubSource {
    async fn fetch_components(&self, coordinate: Coordinate) -> Result<RawObservations, FetchError> {
        self.calls.lock().unwrap().push(coordinate);
        match &self.outcome {
            Outcome::Payloads(raw) => Ok(raw.clone()),
            Outcome::NetworkError(msg) => Err(FetchError::Network {
                feed: FeedKind::Atmospheric,
                message: msg.clone(),
            }),
            Outcome::InvalidData(msg) => Err(FetchError::InvalidData {
                feed: FeedKind::Marine,
                message: msg.clone(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

//! Weather data sources.
//!
//! Defines the `WeatherSource` trait, the boundary between fetching raw
//! observations and evaluating them. The service depends only on this
//! trait; tests substitute a mock.

pub mod open_meteo;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::Value;

use crate::types::{Coordinate, FetchError};

/// Raw hourly payloads for one coordinate, as returned upstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawObservations {
    pub atmospheric: Value,
    pub marine: Value,
}

/// Abstraction over providers of atmospheric and marine observations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetch both raw payloads for a coordinate.
    async fn fetch_components(&self, coordinate: Coordinate) -> Result<RawObservations, FetchError>;

    /// Source name for logging.
    fn name(&self) -> &'static str;
}

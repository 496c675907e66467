//! Risk assessment pipeline.
//!
//! Asks a [`WeatherSource`] for the raw payloads of a coordinate, folds
//! them into a [`WeatherSnapshot`] and hands that to the
//! [`RiskEvaluator`]. Fetch failures propagate untouched so the HTTP
//! layer can map them to status codes; the snapshot and evaluator
//! never fail.

use std::sync::Arc;
use tracing::{debug, error, info};

use crate::data::WeatherSource;
use crate::risk::RiskEvaluator;
use crate::snapshot::WeatherSnapshot;
use crate::types::{Coordinate, FetchError, Locale, RiskVerdict};

/// Ties a weather source to an evaluator. Cheap to share across requests.
pub struct RiskService {
    source: Arc<dyn WeatherSource>,
    evaluator: RiskEvaluator,
}

impl RiskService {
    pub fn new(source: Arc<dyn WeatherSource>, evaluator: RiskEvaluator) -> Self {
        Self { source, evaluator }
    }

    pub fn locale(&self) -> Locale {
        self.evaluator.locale()
    }

    /// Fetch observations for `coordinate` and classify them.
    pub async fn assess(&self, coordinate: Coordinate) -> Result<RiskVerdict, FetchError> {
        let raw = self
            .source
            .fetch_components(coordinate)
            .await
            .inspect_err(|e| {
                error!(source = self.source.name(), %coordinate, error = %e, "Weather fetch failed");
            })?;

        let snapshot = WeatherSnapshot::from_payloads(&raw.atmospheric, &raw.marine);
        debug!(%coordinate, ?snapshot, "Snapshot consolidated");

        let verdict = self.evaluator.evaluate(&snapshot);
        info!(%coordinate, risk = %verdict.level, "Evaluation complete");
        Ok(verdict)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! cyclone-risk — entry point.
//!
//! Loads configuration, initialises structured logging, wires the
//! Open-Meteo source into the risk service and serves the HTTP API
//! until Ctrl+C.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use cyclone_risk::config::AppConfig;
use cyclone_risk::data::open_meteo::OpenMeteoClient;
use cyclone_risk::data::WeatherSource;
use cyclone_risk::engine::RiskService;
use cyclone_risk::logging::init_logging;
use cyclone_risk::risk::RiskEvaluator;
use cyclone_risk::server::{self, routes::ServerState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cfg = AppConfig::from_env()?;
    init_logging(&cfg.logging)?;

    info!(
        locale = ?cfg.locale,
        addr = %cfg.server.bind_addr(),
        atmospheric_url = %cfg.upstream.atmospheric_url,
        marine_url = %cfg.upstream.marine_url,
        ssl_verify = cfg.upstream.ssl_verify,
        "cyclone-risk starting up"
    );

    let source: Arc<dyn WeatherSource> = Arc::new(OpenMeteoClient::new(cfg.upstream.clone())?);
    let evaluator = RiskEvaluator::new(cfg.risk.clone(), cfg.locale);
    let state = Arc::new(ServerState::new(RiskService::new(source, evaluator)));

    server::serve(state, &cfg.server).await
}

//! Cyclone risk classification.
//!
//! Applies threshold rules to a [`WeatherSnapshot`] and produces a
//! [`RiskVerdict`]. Tiers are checked in order and the first match wins:
//! indeterminate (no wind or pressure), high (two or more risk factors),
//! moderate, then low.
//!
//! Thresholds are illustrative, not meteorologically validated.

use serde::Deserialize;

use crate::snapshot::WeatherSnapshot;
use crate::types::{Locale, RiskLevel, RiskVerdict};

/// Factors needed for a high verdict. Not configurable: zero or one
/// factor never yields high.
pub const HIGH_FACTOR_COUNT: usize = 2;

// ---------------------------------------------------------------------------
// Configuration (defaults — overridden by the `[risk]` table of config.toml)
// ---------------------------------------------------------------------------

/// Classification thresholds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Wind speed (km/h) at or above which "extreme wind" is a factor.
    pub extreme_wind_kmh: f64,
    /// Sea-level pressure (hPa) at or below which "low pressure" is a factor.
    pub low_pressure_hpa: f64,
    /// Wave height (m) at or above which "dangerous waves" is a factor.
    pub dangerous_wave_m: f64,
    /// Wind speed (km/h) at or above which conditions are notable.
    pub moderate_wind_kmh: f64,
    /// Wave height (m) at or above which conditions are notable.
    pub moderate_wave_m: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            extreme_wind_kmh: 120.0,
            low_pressure_hpa: 1000.0,
            dangerous_wave_m: 6.0,
            moderate_wind_kmh: 90.0,
            moderate_wave_m: 4.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Risk factors
// ---------------------------------------------------------------------------

/// A single threshold trigger contributing to a high verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskFactor {
    ExtremeWind,
    LowPressure,
    DangerousWaves,
}

impl RiskFactor {
    pub fn name(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, RiskFactor::ExtremeWind) => "extreme wind",
            (Locale::En, RiskFactor::LowPressure) => "low pressure",
            (Locale::En, RiskFactor::DangerousWaves) => "dangerous waves",
            (Locale::Fr, RiskFactor::ExtremeWind) => "vent extrême",
            (Locale::Fr, RiskFactor::LowPressure) => "basse pression",
            (Locale::Fr, RiskFactor::DangerousWaves) => "vagues dangereuses",
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

/// Classifies snapshots into risk verdicts. Pure and deterministic.
#[derive(Debug, Clone, Default)]
pub struct RiskEvaluator {
    thresholds: RiskThresholds,
    locale: Locale,
}

impl RiskEvaluator {
    pub fn new(thresholds: RiskThresholds, locale: Locale) -> Self {
        Self { thresholds, locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Classify a snapshot.
    pub fn evaluate(&self, snapshot: &WeatherSnapshot) -> RiskVerdict {
        let (Some(wind), Some(pressure)) = (snapshot.wind_speed, snapshot.sea_level_pressure)
        else {
            return self.verdict(RiskLevel::Indeterminate, self.insufficient_data_message());
        };
        let waves = snapshot.wave_height;
        let t = &self.thresholds;

        let factors = self.risk_factors(snapshot);
        if factors.len() >= HIGH_FACTOR_COUNT {
            let names: Vec<&str> = factors.iter().map(|f| f.name(self.locale)).collect();
            let message = match self.locale {
                Locale::En => format!(
                    "HIGH cyclone risk. Wind speed: {wind:.1} km/h, Pressure: {} hPa, Waves: {:.1} m. Factors: {}.",
                    whole_hpa(pressure),
                    waves.unwrap_or(0.0),
                    names.join(", "),
                ),
                Locale::Fr => format!(
                    "Risque cyclonique ÉLEVÉ. Vitesse du vent: {wind:.1} km/h, Pression: {} hPa, Vagues: {:.1} m. Facteurs: {}.",
                    whole_hpa(pressure),
                    waves.unwrap_or(0.0),
                    names.join(", "),
                ),
            };
            return self.verdict(RiskLevel::High, message);
        }

        let notable_waves = waves.is_some_and(|w| w >= t.moderate_wave_m);
        if wind >= t.moderate_wind_kmh || notable_waves {
            let waves = waves.unwrap_or(0.0);
            let message = match self.locale {
                Locale::En => {
                    format!("Notable conditions. Wind speed: {wind:.1} km/h, Waves: {waves:.1} m.")
                }
                Locale::Fr => format!(
                    "Conditions notables. Vitesse du vent: {wind:.1} km/h, Vagues: {waves:.1} m."
                ),
            };
            return self.verdict(RiskLevel::Moderate, message);
        }

        let message = match self.locale {
            Locale::En => format!(
                "Normal weather conditions. Wind speed: {wind:.1} km/h, Pressure: {} hPa.",
                whole_hpa(pressure),
            ),
            Locale::Fr => format!(
                "Conditions météorologiques normales. Vitesse du vent: {wind:.1} km/h, Pression: {} hPa.",
                whole_hpa(pressure),
            ),
        };
        self.verdict(RiskLevel::Low, message)
    }

    /// Factors triggered by a snapshot, in fixed order
    /// (wind, pressure, waves). Absent readings never trigger.
    pub fn risk_factors(&self, snapshot: &WeatherSnapshot) -> Vec<RiskFactor> {
        let t = &self.thresholds;
        let mut factors = Vec::new();
        if snapshot.wind_speed.is_some_and(|w| w >= t.extreme_wind_kmh) {
            factors.push(RiskFactor::ExtremeWind);
        }
        if snapshot.sea_level_pressure.is_some_and(|p| p <= t.low_pressure_hpa) {
            factors.push(RiskFactor::LowPressure);
        }
        if snapshot.wave_height.is_some_and(|w| w >= t.dangerous_wave_m) {
            factors.push(RiskFactor::DangerousWaves);
        }
        factors
    }

    fn insufficient_data_message(&self) -> &'static str {
        match self.locale {
            Locale::En => "insufficient wind/pressure data for evaluation",
            Locale::Fr => {
                "Données de vent ou de pression atmosphérique insuffisantes pour une évaluation."
            }
        }
    }

    fn verdict(&self, level: RiskLevel, message: impl Into<String>) -> RiskVerdict {
        RiskVerdict::new(level, message, self.locale)
    }
}

/// Pressure rendered as whole hPa (truncated toward zero).
fn whole_hpa(pressure: f64) -> i64 {
    pressure.trunc() as i64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

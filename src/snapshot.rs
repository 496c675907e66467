//! Consolidated weather snapshot.
//!
//! Open-Meteo returns hourly series under a top-level `hourly` object,
//! one array per variable. A forecast for the current day usually has
//! trailing hours that are still `null`, so each field takes the most
//! recent non-null reading of its series.

use serde_json::Value;

// Atmospheric feed variables.
const WIND_SPEED: &str = "wind_speed_10m";
const PRESSURE_MSL: &str = "pressure_msl";
const RELATIVE_HUMIDITY: &str = "relative_humidity_2m";
const TEMPERATURE: &str = "temperature_2m";
const WIND_DIRECTION: &str = "wind_direction_10m";
const PRECIPITATION: &str = "precipitation";

// Marine feed variables.
const WAVE_HEIGHT: &str = "wave_height";
const SEA_SURFACE_TEMPERATURE: &str = "sea_surface_temperature";

/// Point-in-time reading derived from the atmospheric and marine feeds.
///
/// Every field is optional: a variable whose series is missing,
/// malformed or entirely null is simply absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherSnapshot {
    /// km/h
    pub wind_speed: Option<f64>,
    /// hPa
    pub sea_level_pressure: Option<f64>,
    /// %
    pub relative_humidity: Option<f64>,
    /// °C
    pub temperature: Option<f64>,
    /// Degrees, truncated to a whole number.
    pub wind_direction: Option<i64>,
    /// mm
    pub precipitation: Option<f64>,
    /// m
    pub wave_height: Option<f64>,
    /// °C
    pub sea_surface_temperature: Option<f64>,
}

impl WeatherSnapshot {
    /// Build a snapshot from the raw atmospheric and marine payloads.
    ///
    /// Never fails: degenerate payloads yield absent fields.
    pub fn from_payloads(atmospheric: &Value, marine: &Value) -> Self {
        let atmo = hourly(atmospheric);
        let sea = hourly(marine);

        Self {
            wind_speed: most_recent_value(atmo, WIND_SPEED),
            sea_level_pressure: most_recent_value(atmo, PRESSURE_MSL),
            relative_humidity: most_recent_value(atmo, RELATIVE_HUMIDITY),
            temperature: most_recent_value(atmo, TEMPERATURE),
            wind_direction: most_recent_value(atmo, WIND_DIRECTION).map(|d| d.trunc() as i64),
            precipitation: most_recent_value(atmo, PRECIPITATION),
            wave_height: most_recent_value(sea, WAVE_HEIGHT),
            sea_surface_temperature: most_recent_value(sea, SEA_SURFACE_TEMPERATURE),
        }
    }
}

/// The `hourly` object of a payload, if it has one.
fn hourly(payload: &Value) -> Option<&Value> {
    payload.get("hourly").filter(|h| h.is_object())
}

/// Last non-null numeric entry of `hourly[key]`.
///
/// Non-numeric entries are skipped like nulls.
fn most_recent_value(hourly: Option<&Value>, key: &str) -> Option<f64> {
    hourly?
        .get(key)?
        .as_array()?
        .iter()
        .rev()
        .find_map(Value::as_f64)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

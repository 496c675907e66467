//! Shared types for the cyclone risk service.
//!
//! Coordinates, feed identifiers, risk levels, verdicts and the error
//! type raised by weather sources. Kept free of I/O so the snapshot,
//! evaluator and HTTP layers can all depend on it.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

// ---------------------------------------------------------------------------
// Coordinate
// ---------------------------------------------------------------------------

/// A point on the globe, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The two upstream Open-Meteo feeds a snapshot is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Atmospheric,
    Marine,
}

impl FeedKind {
    /// Hourly variables requested from this feed.
    pub fn hourly_variables(&self) -> &'static str {
        match self {
            FeedKind::Atmospheric => {
                "temperature_2m,relative_humidity_2m,pressure_msl,wind_speed_10m,wind_direction_10m,precipitation"
            }
            FeedKind::Marine => "sea_surface_temperature,wave_height",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedKind::Atmospheric => write!(f, "atmospheric"),
            FeedKind::Marine => write!(f, "marine"),
        }
    }
}

/// Language used for level labels and verdict messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl std::str::FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "fr" | "french" | "francais" | "français" => Ok(Locale::Fr),
            _ => Err(anyhow::anyhow!("Unknown locale: {s}")),
        }
    }
}

/// Discrete cyclone risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    Indeterminate,
    Low,
    Moderate,
    High,
    Error,
}

impl RiskLevel {
    /// Level name as shown to callers in the given locale.
    pub fn label(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, RiskLevel::Indeterminate) => "Indeterminate",
            (Locale::En, RiskLevel::Low) => "Low",
            (Locale::En, RiskLevel::Moderate) => "Moderate",
            (Locale::En, RiskLevel::High) => "High",
            (Locale::En, RiskLevel::Error) => "Error",
            (Locale::Fr, RiskLevel::Indeterminate) => "Indéterminé",
            (Locale::Fr, RiskLevel::Low) => "Faible",
            (Locale::Fr, RiskLevel::Moderate) => "Modéré",
            (Locale::Fr, RiskLevel::High) => "Élevé",
            (Locale::Fr, RiskLevel::Error) => "Erreur",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(Locale::En))
    }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Outcome of a risk evaluation.
///
/// Serializes as `{"risk": <localized label>, "message": <text>}`.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskVerdict {
    pub level: RiskLevel,
    pub message: String,
    pub locale: Locale,
}

impl RiskVerdict {
    pub fn new(level: RiskLevel, message: impl Into<String>, locale: Locale) -> Self {
        Self {
            level,
            message: message.into(),
            locale,
        }
    }

    /// Error-level verdict describing a failed upstream fetch.
    pub fn from_fetch_error(err: &FetchError, locale: Locale) -> Self {
        let message = match (locale, err) {
            (Locale::En, FetchError::Network { message, .. }) => {
                format!("Unable to reach the weather API: {message}")
            }
            (Locale::En, FetchError::InvalidData { message, .. }) => {
                format!("The weather API response was invalid: {message}")
            }
            (Locale::En, FetchError::Internal(message)) => {
                format!("An internal error occurred: {message}")
            }
            (Locale::Fr, FetchError::Network { message, .. }) => {
                format!("Impossible de contacter l'API météo : {message}")
            }
            (Locale::Fr, FetchError::InvalidData { message, .. }) => {
                format!("La réponse de l'API était invalide : {message}")
            }
            (Locale::Fr, FetchError::Internal(message)) => {
                format!("Une erreur interne est survenue : {message}")
            }
        };
        Self::new(RiskLevel::Error, message, locale)
    }

    /// Localized label for this verdict's level.
    pub fn risk_label(&self) -> &'static str {
        self.level.label(self.locale)
    }
}

impl Serialize for RiskVerdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("RiskVerdict", 2)?;
        s.serialize_field("risk", self.risk_label())?;
        s.serialize_field("message", &self.message)?;
        s.end()
    }
}

impl fmt::Display for RiskVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Failure while fetching raw observations from a weather source.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport failure or non-success HTTP status.
    #[error("Network error ({feed}): {message}")]
    Network { feed: FeedKind, message: String },

    /// Empty or unparseable response body.
    #[error("Invalid data ({feed}): {message}")]
    InvalidData { feed: FeedKind, message: String },

    /// A fetch task died before producing a result.
    #[error("Internal error: {0}")]
    Internal(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

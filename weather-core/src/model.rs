use serde::{Deserialize, Serialize};

/// Failure of a single upstream call.
///
/// The `Display` text is what ends up in [`WeatherReport::error`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    #[error("API key not configured")]
    MissingApiKey,
    #[error("Network error: Unable to connect to weather service")]
    Network,
    #[error("Invalid API key or quota exceeded")]
    InvalidCredentials,
    #[error("Weather API error: {0}")]
    Status(u16),
    #[error("Invalid response from weather service")]
    InvalidResponse,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Body of `current.json`. Every leaf is optional: a missing field is not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentPayload {
    #[serde(default)]
    pub location: PayloadLocation,
    #[serde(default)]
    pub current: PayloadCurrent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayloadLocation {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayloadCurrent {
    pub temp_c: Option<f64>,
    pub temp_f: Option<f64>,
    #[serde(default)]
    pub condition: PayloadCondition,
    pub humidity: Option<u8>,
    pub wind_kph: Option<f64>,
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayloadCondition {
    pub text: Option<String>,
    pub icon: Option<String>,
}

/// Body of `astronomy.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AstronomyPayload {
    #[serde(default)]
    pub astronomy: PayloadAstronomy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayloadAstronomy {
    #[serde(default)]
    pub astro: PayloadAstro,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayloadAstro {
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

/// Merged view of one lookup, successful or not.
///
/// When `success` is false only `location` and `error` are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    pub temp_c: Option<f64>,
    pub temp_f: Option<f64>,
    pub condition: Option<String>,
    pub icon: Option<String>,
    pub humidity: Option<u8>,
    pub wind_kph: Option<f64>,
    pub last_updated: Option<String>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub success: bool,
    pub error: Option<String>,
}

impl WeatherReport {
    pub fn failed(location: impl Into<String>, error: &UpstreamError) -> Self {
        Self { location: location.into(), error: Some(error.to_string()), ..Self::default() }
    }

    /// Page title for the report.
    pub fn title(&self) -> String {
        if self.success { format!("Weather in {}", self.location) } else { "Weather Info".into() }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Measurement convention used both for the API request and for display suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub const ALL: [UnitSystem; 2] = [UnitSystem::Metric, UnitSystem::Imperial];

    /// Value of the `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }

    pub fn wind_suffix(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "m/s",
            UnitSystem::Imperial => "mph",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown unit system '{0}'. Expected 'metric' or 'imperial'.")]
pub struct ParseUnitSystemError(String);

impl FromStr for UnitSystem {
    type Err = ParseUnitSystemError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "metric" | "c" | "celsius" => Ok(UnitSystem::Metric),
            "imperial" | "f" | "fahrenheit" => Ok(UnitSystem::Imperial),
            _ => Err(ParseUnitSystemError(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// What a single lookup asks the provider for.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    City(String),
    Coordinates(Coordinates),
}

impl Query {
    /// Builds a city query from raw user input; `None` when nothing is left after trimming.
    pub fn city(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Query::City(trimmed.to_string()))
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::City(name) => f.write_str(name),
            Query::Coordinates(c) => write!(f, "{}, {}", c.latitude, c.longitude),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Short group label, e.g. "Clouds".
    pub label: String,
    pub description: String,
    /// Provider icon id, e.g. "04d".
    pub icon: String,
}

/// Snapshot of current conditions for one location.
///
/// Values are denominated in the unit system that was active when the lookup
/// was issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location_name: String,
    pub country: Option<String>,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    pub pressure_hpa: f64,
    pub condition: Condition,
    pub utc_offset_secs: i32,
    pub observed_at: Option<DateTime<Utc>>,
}

/// Current lookup lifecycle. Exactly one variant holds at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LookupState {
    #[default]
    Idle,
    Loading,
    Success(WeatherReport),
    Failed(String),
}

impl LookupState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LookupState::Loading)
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        match self {
            LookupState::Success(report) => Some(report),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LookupState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_query_is_trimmed() {
        assert_eq!(Query::city("  Paris \n"), Some(Query::City("Paris".to_string())));
    }

    #[test]
    fn blank_city_query_is_rejected() {
        assert_eq!(Query::city(""), None);
        assert_eq!(Query::city(" \t "), None);
    }

    #[test]
    fn unit_system_parses_aliases() {
        assert_eq!("metric".parse::<UnitSystem>().unwrap(), UnitSystem::Metric);
        assert_eq!("Imperial".parse::<UnitSystem>().unwrap(), UnitSystem::Imperial);
        assert_eq!("f".parse::<UnitSystem>().unwrap(), UnitSystem::Imperial);
        assert_eq!("Celsius".parse::<UnitSystem>().unwrap(), UnitSystem::Metric);
    }

    #[test]
    fn unknown_unit_system_error() {
        let err = "kelvin".parse::<UnitSystem>().unwrap_err();
        assert!(err.to_string().contains("Unknown unit system 'kelvin'"));
    }

    #[test]
    fn unit_system_serializes_as_api_parameter() {
        for units in UnitSystem::ALL {
            let json = serde_json::to_string(&units).unwrap();
            assert_eq!(json, format!("\"{}\"", units.as_str()));
        }
    }

    #[test]
    fn state_accessors_match_variant() {
        let state = LookupState::Failed("nope".into());
        assert_eq!(state.message(), Some("nope"));
        assert!(state.report().is_none());
        assert!(!state.is_loading());

        assert!(LookupState::Loading.is_loading());
        assert!(LookupState::Idle.message().is_none());
    }
}

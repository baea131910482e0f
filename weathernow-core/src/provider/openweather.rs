use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::{fmt, time::Duration};

use crate::{
    LookupError,
    model::{Condition, Query, UnitSystem, WeatherReport},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";
const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Like [`OpenWeatherProvider::new`], but with an optional whole-request timeout.
    /// `None` keeps reqwest's default of waiting indefinitely.
    pub fn with_timeout(api_key: String, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let http = match timeout {
            Some(timeout) => Client::builder().timeout(timeout).build()?,
            None => Client::new(),
        };

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    async fn fetch_current(&self, query: &Query, units: UnitSystem) -> Result<WeatherReport, LookupError> {
        let url = format!("{}{}", self.base_url, CURRENT_WEATHER_PATH);

        let mut params: Vec<(&str, String)> = match query {
            Query::City(name) => vec![("q", name.clone())],
            Query::Coordinates(c) => vec![
                ("lat", c.latitude.to_string()),
                ("lon", c.longitude.to_string()),
            ],
        };
        params.push(("units", units.as_str().to_string()));
        params.push(("appid", self.api_key.clone()));

        tracing::debug!(%query, %units, "requesting current weather");

        let res = self.http.get(&url).query(&params).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(LookupError::NotFound {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        Ok(parsed.into_report())
    }
}

/// URL of the provider's large icon for `icon` (e.g. "10d").
pub fn icon_url(icon: &str) -> String {
    format!("{ICON_BASE_URL}/{icon}@4x.png")
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    #[serde(default)]
    sys: Option<OwSys>,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    timezone: i32,
    dt: Option<i64>,
}

impl OwCurrentResponse {
    fn into_report(self) -> WeatherReport {
        let condition = self
            .weather
            .into_iter()
            .next()
            .map(|w| Condition {
                label: w.main,
                description: w.description,
                icon: w.icon,
            })
            .unwrap_or_else(|| Condition {
                label: "Unknown".to_string(),
                description: "unknown".to_string(),
                icon: String::new(),
            });

        let country = self
            .sys
            .and_then(|sys| sys.country)
            .filter(|c| !c.is_empty());

        WeatherReport {
            location_name: self.name,
            country,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            temp_min: self.main.temp_min,
            temp_max: self.main.temp_max,
            humidity_pct: self.main.humidity,
            wind_speed: self.wind.speed,
            pressure_hpa: self.main.pressure,
            condition,
            utc_offset_secs: self.timezone,
            observed_at: self.dt.and_then(unix_to_utc),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(
        &self,
        query: &Query,
        units: UnitSystem,
    ) -> Result<WeatherReport, LookupError> {
        self.fetch_current(query, units).await
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
